//! AI analysis endpoints.
//!
//! `analyze` surfaces provider failures as 500; the chat surface in
//! [`crate::chatbot`] deliberately does not.

use api_types::insight::{InsightRequest, InsightResponse, MoodAnalysisResponse};
use axum::{Extension, Json, extract::State};
use insight::prompt;

use crate::{
    ServerError,
    server::{CurrentUser, ServerState},
};

pub async fn analyze(
    Extension(_user): Extension<CurrentUser>,
    State(state): State<ServerState>,
    Json(payload): Json<InsightRequest>,
) -> Result<Json<InsightResponse>, ServerError> {
    let messages = prompt::analysis_messages(&payload.transactions, &payload.context);
    let insight = state.insight.chat(&messages).await?;
    Ok(Json(InsightResponse { insight }))
}

pub async fn mood_analysis(
    Extension(user): Extension<CurrentUser>,
    State(state): State<ServerState>,
) -> Result<Json<MoodAnalysisResponse>, ServerError> {
    let mood_spending = state.engine.mood_spending(&user.0).await?;
    Ok(Json(MoodAnalysisResponse { mood_spending }))
}
