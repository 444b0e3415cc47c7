use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Generic `{"message": ...}` body used by delete/update acknowledgements.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

pub mod auth {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Register {
        pub email: String,
        pub password: String,
        pub name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Login {
        pub email: String,
        pub password: String,
    }

    /// Returned by both register and login.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct AuthResponse {
        pub token: String,
        pub user: UserView,
    }

    /// Public view of a user. The password hash never crosses this boundary.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserView {
        pub id: String,
        pub email: String,
        pub name: String,
        pub created_at: DateTime<Utc>,
    }
}

pub mod transaction {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum TransactionKind {
        Income,
        Expense,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionNew {
        pub amount: f64,
        pub category: String,
        pub description: String,
        #[serde(rename = "type")]
        pub kind: TransactionKind,
        pub mood: Option<String>,
        /// Defaults to "now" when omitted.
        pub date: Option<DateTime<Utc>>,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: String,
        pub user_id: String,
        pub amount: f64,
        pub category: String,
        pub description: String,
        #[serde(rename = "type")]
        pub kind: TransactionKind,
        pub mood: Option<String>,
        pub date: DateTime<Utc>,
        pub created_at: DateTime<Utc>,
    }
}

pub mod goal {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GoalNew {
        pub title: String,
        pub target_amount: f64,
        pub deadline: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GoalView {
        pub id: String,
        pub user_id: String,
        pub title: String,
        pub target_amount: f64,
        pub current_amount: f64,
        pub deadline: DateTime<Utc>,
        pub created_at: DateTime<Utc>,
    }

    /// Query string for `PATCH /goals/{id}?amount=`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct GoalProgress {
        pub amount: f64,
    }
}

pub mod stats {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DashboardResponse {
        pub balance: f64,
        pub total_income: f64,
        pub total_expenses: f64,
        pub category_spending: HashMap<String, f64>,
        pub transaction_count: usize,
        pub recent_transactions: Vec<transaction::TransactionView>,
    }
}

pub mod limits {
    use super::*;

    /// A per-category monthly spending ceiling.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct CategoryLimit {
        pub category: String,
        pub limit: f64,
    }

    /// Full-replace upsert body for `POST /category-limits`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct LimitsUpdate {
        pub limits: Vec<CategoryLimit>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LimitsResponse {
        pub limits: Vec<CategoryLimit>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LimitsUpdated {
        pub message: String,
        pub limits: Vec<CategoryLimit>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LimitWarning {
        pub category: String,
        pub limit: f64,
        pub spent: f64,
        pub percentage: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LimitCheckResponse {
        pub category_spending: HashMap<String, f64>,
        pub warnings: Vec<LimitWarning>,
    }
}

pub mod profile {
    use super::*;

    /// Free-form financial self-report, owned wholesale by the user.
    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    pub struct ProfileData {
        pub monthly_income: Option<f64>,
        pub savings_goal: Option<f64>,
        pub primary_goal: Option<String>,
        #[serde(default)]
        pub spending_triggers: Vec<String>,
        pub budget_priority: Option<String>,
        pub risk_tolerance: Option<String>,
        pub financial_experience: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ProfileView {
        pub user_id: String,
        #[serde(flatten)]
        pub data: ProfileData,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ProfileResponse {
        pub has_profile: bool,
        pub profile: Option<ProfileView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ProfileSaved {
        pub message: String,
        pub profile: ProfileView,
    }
}

pub mod insight {
    use super::*;

    /// Transaction snippet for prompt building. Callers may send partial
    /// objects, so every field falls back to a display default.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct InsightTransaction {
        #[serde(rename = "type", default = "default_kind")]
        pub kind: String,
        #[serde(default)]
        pub amount: f64,
        #[serde(default = "default_category")]
        pub category: String,
        #[serde(default)]
        pub description: String,
        #[serde(default)]
        pub mood: Option<String>,
    }

    fn default_kind() -> String {
        "expense".to_string()
    }

    fn default_category() -> String {
        "unknown".to_string()
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct InsightRequest {
        pub context: String,
        pub transactions: Vec<InsightTransaction>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct InsightResponse {
        pub insight: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MoodAnalysisResponse {
        pub mood_spending: HashMap<String, f64>,
    }
}

pub mod chat {
    use super::*;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct ChatTurn {
        pub role: String,
        pub content: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ChatRequest {
        pub message: String,
        pub context: Option<String>,
        #[serde(default)]
        pub conversation_history: Vec<ChatTurn>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ChatResponse {
        pub response: String,
    }
}
