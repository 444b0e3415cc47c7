//! Conversational assistant endpoint.

use api_types::chat::{ChatRequest, ChatResponse};
use axum::{Extension, Json, extract::State};
use insight::prompt;

use crate::{
    ServerError,
    server::{CurrentUser, ServerState},
};

/// Chat always answers 200: when the provider is down the user gets a
/// canned reply instead of an error page.
pub async fn chat(
    Extension(_user): Extension<CurrentUser>,
    State(state): State<ServerState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ServerError> {
    let messages = prompt::chat_messages(
        &payload.message,
        payload.context.as_deref(),
        &payload.conversation_history,
    );

    let response = match state.insight.chat(&messages).await {
        Ok(reply) => reply,
        Err(err) => {
            tracing::warn!("chat provider failure: {err}");
            prompt::CHAT_FALLBACK_REPLY.to_string()
        }
    };

    Ok(Json(ChatResponse { response }))
}
