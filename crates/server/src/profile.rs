//! Financial-profile endpoints. One document per user, replaced wholesale.

use api_types::profile::{ProfileData, ProfileResponse, ProfileSaved, ProfileView};
use axum::{Extension, Json, extract::State};

use crate::{
    ServerError,
    server::{CurrentUser, ServerState},
};

fn to_engine_data(data: ProfileData) -> engine::ProfileData {
    engine::ProfileData {
        monthly_income: data.monthly_income,
        savings_goal: data.savings_goal,
        primary_goal: data.primary_goal,
        spending_triggers: data.spending_triggers,
        budget_priority: data.budget_priority,
        risk_tolerance: data.risk_tolerance,
        financial_experience: data.financial_experience,
    }
}

fn map_profile(profile: engine::Profile) -> ProfileView {
    ProfileView {
        user_id: profile.user_id,
        data: ProfileData {
            monthly_income: profile.data.monthly_income,
            savings_goal: profile.data.savings_goal,
            primary_goal: profile.data.primary_goal,
            spending_triggers: profile.data.spending_triggers,
            budget_priority: profile.data.budget_priority,
            risk_tolerance: profile.data.risk_tolerance,
            financial_experience: profile.data.financial_experience,
        },
        created_at: profile.created_at,
    }
}

pub async fn get(
    Extension(user): Extension<CurrentUser>,
    State(state): State<ServerState>,
) -> Result<Json<ProfileResponse>, ServerError> {
    let profile = state.engine.profile(&user.0).await?;
    Ok(Json(ProfileResponse {
        has_profile: profile.is_some(),
        profile: profile.map(map_profile),
    }))
}

pub async fn save(
    Extension(user): Extension<CurrentUser>,
    State(state): State<ServerState>,
    Json(payload): Json<ProfileData>,
) -> Result<Json<ProfileSaved>, ServerError> {
    let profile = state
        .engine
        .save_profile(&user.0, to_engine_data(payload))
        .await?;

    Ok(Json(ProfileSaved {
        message: "Profile saved successfully".to_string(),
        profile: map_profile(profile),
    }))
}
