//! Registration, login and the authenticated `me` lookup.

use api_types::auth::{AuthResponse, Login, Register, UserView};
use axum::{Extension, Json, extract::State};

use crate::{
    ServerError,
    server::{CurrentUser, ServerState},
};

pub(crate) fn map_user(user: engine::User) -> UserView {
    UserView {
        id: user.id,
        email: user.email,
        name: user.name,
        created_at: user.created_at,
    }
}

pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<Register>,
) -> Result<Json<AuthResponse>, ServerError> {
    let (token, user) = state
        .engine
        .register(&payload.email, &payload.password, &payload.name)
        .await?;

    Ok(Json(AuthResponse {
        token,
        user: map_user(user),
    }))
}

pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<Login>,
) -> Result<Json<AuthResponse>, ServerError> {
    let (token, user) = state.engine.login(&payload.email, &payload.password).await?;

    Ok(Json(AuthResponse {
        token,
        user: map_user(user),
    }))
}

/// Re-reads the caller from the store; a valid token whose user row was
/// deleted comes back as 404.
pub async fn me(
    Extension(user): Extension<CurrentUser>,
    State(state): State<ServerState>,
) -> Result<Json<UserView>, ServerError> {
    let user = state.engine.user(&user.0).await?;
    Ok(Json(map_user(user)))
}
