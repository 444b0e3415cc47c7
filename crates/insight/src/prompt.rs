//! Prompt rendering for the two AI surfaces.
//!
//! Analysis gets a one-shot advisor prompt built from a bounded window
//! of recent transactions; chat gets a rolling conversation with a
//! bounded history window.

use api_types::chat::ChatTurn;
use api_types::insight::InsightTransaction;

use crate::ChatMessage;

/// Transactions rendered into one analysis prompt.
const MAX_PROMPT_TRANSACTIONS: usize = 20;
/// Prior turns kept when forwarding chat history (3 exchanges).
const MAX_HISTORY_TURNS: usize = 6;

/// Canned reply used when the chat provider is unreachable; the chat
/// surface never returns an error to the end user.
pub const CHAT_FALLBACK_REPLY: &str =
    "I'm having trouble connecting to my AI brain right now. Please try again in a moment!";

const ANALYSIS_SYSTEM_PROMPT: &str =
    "You are a helpful financial advisor focused on emotional intelligence and smart money management.";

const CHAT_SYSTEM_PROMPT: &str = "You are a friendly and helpful AI financial assistant. \
You help users understand their finances, provide budgeting advice, and answer questions about their spending habits. \
Be conversational, supportive, and give actionable advice. Keep responses concise but helpful. \
Use emojis occasionally to be friendly. If the user's data shows concerning patterns, gently point them out.";

fn render_transaction(tx: &InsightTransaction) -> String {
    let mood = tx.mood.as_deref().unwrap_or("neutral");
    format!(
        "- {}: ${} on {} - {} (Mood: {})",
        tx.kind, tx.amount, tx.category, tx.description, mood
    )
}

/// The one-shot spending-analysis prompt.
pub fn analysis_messages(transactions: &[InsightTransaction], context: &str) -> Vec<ChatMessage> {
    let summary = transactions
        .iter()
        .take(MAX_PROMPT_TRANSACTIONS)
        .map(render_transaction)
        .collect::<Vec<_>>()
        .join("\n");

    let prompt = format!(
        "You are a financial advisor analyzing spending patterns and emotional well-being.\n\n\
User's recent transactions:\n{summary}\n\n\
Context: {context}\n\n\
Provide:\n\
1. Key spending patterns\n\
2. Emotional spending insights (how mood affects spending)\n\
3. 2-3 actionable recommendations\n\n\
Keep response concise and friendly."
    );

    vec![
        ChatMessage::system(ANALYSIS_SYSTEM_PROMPT),
        ChatMessage::user(prompt),
    ]
}

/// The rolling chat conversation: system prompt, optional financial
/// context, the last six turns of history, then the new message.
pub fn chat_messages(
    message: &str,
    context: Option<&str>,
    history: &[ChatTurn],
) -> Vec<ChatMessage> {
    let mut messages = vec![ChatMessage::system(CHAT_SYSTEM_PROMPT)];

    if let Some(context) = context {
        messages.push(ChatMessage::system(format!(
            "Here's the user's financial data:\n{context}"
        )));
    }

    let start = history.len().saturating_sub(MAX_HISTORY_TURNS);
    for turn in &history[start..] {
        messages.push(ChatMessage {
            role: turn.role.clone(),
            content: turn.content.clone(),
        });
    }

    messages.push(ChatMessage::user(message));
    messages
}
