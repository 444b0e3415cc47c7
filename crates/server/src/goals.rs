//! Savings-goal API endpoints.

use api_types::MessageResponse;
use api_types::goal::{GoalNew, GoalProgress, GoalView};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};

use crate::{
    ServerError,
    server::{CurrentUser, ServerState},
};

fn map_goal(goal: engine::Goal) -> GoalView {
    GoalView {
        id: goal.id,
        user_id: goal.user_id,
        title: goal.title,
        target_amount: goal.target_amount,
        current_amount: goal.current_amount,
        deadline: goal.deadline,
        created_at: goal.created_at,
    }
}

pub async fn create(
    Extension(user): Extension<CurrentUser>,
    State(state): State<ServerState>,
    Json(payload): Json<GoalNew>,
) -> Result<Json<GoalView>, ServerError> {
    let goal = state
        .engine
        .new_goal(&user.0, &payload.title, payload.target_amount, payload.deadline)
        .await?;
    Ok(Json(map_goal(goal)))
}

pub async fn list(
    Extension(user): Extension<CurrentUser>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<GoalView>>, ServerError> {
    let goals = state.engine.goals(&user.0).await?;
    Ok(Json(goals.into_iter().map(map_goal).collect()))
}

/// `PATCH /goals/{id}?amount=` overwrites the goal's progress.
pub async fn set_progress(
    Extension(user): Extension<CurrentUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Query(progress): Query<GoalProgress>,
) -> Result<Json<MessageResponse>, ServerError> {
    state
        .engine
        .set_goal_progress(&user.0, &id, progress.amount)
        .await?;
    Ok(Json(MessageResponse {
        message: "Goal updated".to_string(),
    }))
}

pub async fn remove(
    Extension(user): Extension<CurrentUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ServerError> {
    state.engine.delete_goal(&user.0, &id).await?;
    Ok(Json(MessageResponse {
        message: "Goal deleted".to_string(),
    }))
}
