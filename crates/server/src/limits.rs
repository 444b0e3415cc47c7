//! Category spending limits: storage plus the month-to-date breach check.

use api_types::limits::{
    CategoryLimit, LimitCheckResponse, LimitWarning, LimitsResponse, LimitsUpdate, LimitsUpdated,
};
use axum::{Extension, Json, extract::State};
use chrono::Utc;

use crate::{
    ServerError,
    server::{CurrentUser, ServerState},
};

fn map_limit(limit: engine::CategoryLimit) -> CategoryLimit {
    CategoryLimit {
        category: limit.category,
        limit: limit.limit,
    }
}

pub async fn list(
    Extension(user): Extension<CurrentUser>,
    State(state): State<ServerState>,
) -> Result<Json<LimitsResponse>, ServerError> {
    let limits = state.engine.category_limits(&user.0).await?;
    Ok(Json(LimitsResponse {
        limits: limits.into_iter().map(map_limit).collect(),
    }))
}

/// Replaces the whole limit set.
pub async fn update(
    Extension(user): Extension<CurrentUser>,
    State(state): State<ServerState>,
    Json(payload): Json<LimitsUpdate>,
) -> Result<Json<LimitsUpdated>, ServerError> {
    let limits = payload
        .limits
        .into_iter()
        .map(|l| engine::CategoryLimit {
            category: l.category,
            limit: l.limit,
        })
        .collect();

    let stored = state.engine.set_category_limits(&user.0, limits).await?;
    Ok(Json(LimitsUpdated {
        message: "Category limits updated successfully".to_string(),
        limits: stored.into_iter().map(map_limit).collect(),
    }))
}

pub async fn check(
    Extension(user): Extension<CurrentUser>,
    State(state): State<ServerState>,
) -> Result<Json<LimitCheckResponse>, ServerError> {
    let report = state
        .engine
        .check_category_limits(&user.0, Utc::now())
        .await?;

    Ok(Json(LimitCheckResponse {
        category_spending: report.category_spending,
        warnings: report
            .warnings
            .into_iter()
            .map(|w| LimitWarning {
                category: w.category,
                limit: w.limit,
                spent: w.spent,
                percentage: w.percentage,
            })
            .collect(),
    }))
}
