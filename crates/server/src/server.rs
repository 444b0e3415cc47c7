use axum::{
    Json, Router,
    extract::{Request, State},
    http::{HeaderValue, Method, header},
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, patch, post},
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use std::sync::Arc;

use api_types::MessageResponse;
use engine::{Engine, EngineError};
use insight::InsightClient;

use crate::{ServerError, auth, chatbot, dashboard, goals, insights, limits, profile, transactions};

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub insight: Arc<InsightClient>,
}

/// Verified caller identity, inserted into request extensions by the
/// bearer middleware.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub String);

async fn bearer_auth(
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(ServerError::Engine(EngineError::TokenInvalid))?;

    let token = match header.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => token.trim(),
        _ => return Err(ServerError::Engine(EngineError::TokenInvalid)),
    };

    let user_id = state.engine.verify_token(token)?;
    request.extensions_mut().insert(CurrentUser(user_id));
    Ok(next.run(request).await)
}

async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "FINE API - Finance Intelligent Ecosystem".to_string(),
    })
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("skipping invalid CORS origin {origin:?}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}

fn router(state: ServerState, allowed_origins: &[String]) -> Router {
    let protected = Router::new()
        .route("/auth/me", get(auth::me))
        .route("/transactions", post(transactions::create).get(transactions::list))
        .route("/transactions/{id}", delete(transactions::remove))
        .route("/goals", post(goals::create).get(goals::list))
        .route("/goals/{id}", patch(goals::set_progress).delete(goals::remove))
        .route("/dashboard/stats", get(dashboard::stats))
        .route("/category-limits", get(limits::list).post(limits::update))
        .route("/category-limits/check", get(limits::check))
        .route("/profile", get(profile::get).post(profile::save))
        .route("/insights/analyze", post(insights::analyze))
        .route("/insights/mood-analysis", get(insights::mood_analysis))
        .route("/chatbot/chat", post(chatbot::chat))
        .route_layer(middleware::from_fn_with_state(state.clone(), bearer_auth));

    let api = Router::new()
        .route("/", get(root))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .merge(protected);

    Router::new()
        .nest("/api", api)
        // `nest` matches `/api` but not `/api/`; route the trailing-slash form too.
        .route("/api/", get(root))
        .layer(cors_layer(allowed_origins))
        .with_state(state)
}

/// The full application router, exposed for in-process testing.
pub fn app(engine: Engine, insight: InsightClient, allowed_origins: &[String]) -> Router {
    let state = ServerState {
        engine: Arc::new(engine),
        insight: Arc::new(insight),
    };
    router(state, allowed_origins)
}

pub async fn run(engine: Engine, insight: InsightClient, allowed_origins: Vec<String>) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:8000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, insight, allowed_origins, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    insight: InsightClient,
    allowed_origins: Vec<String>,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(engine, insight, &allowed_origins)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    insight: InsightClient,
    allowed_origins: Vec<String>,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, insight, allowed_origins, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
