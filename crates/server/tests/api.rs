use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use migration::MigratorTrait;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn app() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();

    let engine = engine::Engine::builder()
        .database(db)
        .secret(b"test-secret")
        .build()
        .unwrap();

    // Nothing listens on this port, so every provider call fails fast.
    let insight = insight::InsightClient::builder()
        .base_url("http://127.0.0.1:1/v1")
        .model("test-model")
        .timeout(std::time::Duration::from_millis(200))
        .build()
        .unwrap();

    server::app(engine, insight, &["*".to_string()])
}

async fn send(
    app: &Router,
    method: &str,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn register(app: &Router, email: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({"email": email, "password": "hunter2", "name": "Alice"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn root_is_public() {
    let app = app().await;
    let (status, body) = send(&app, "GET", "/api/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "FINE API - Finance Intelligent Ecosystem");
}

#[tokio::test]
async fn register_then_me() {
    let app = app().await;
    let token = register(&app, "alice@example.com").await;

    let (status, body) = send(&app, "GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "alice@example.com");
    assert_eq!(body["name"], "Alice");
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn duplicate_registration_is_a_400() {
    let app = app().await;
    register(&app, "alice@example.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({"email": "alice@example.com", "password": "x", "name": "Bob"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn bad_credentials_are_indistinguishable_401s() {
    let app = app().await;
    register(&app, "alice@example.com").await;

    let (wrong_status, wrong_body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": "alice@example.com", "password": "bad"})),
    )
    .await;
    let (unknown_status, unknown_body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": "nobody@example.com", "password": "hunter2"})),
    )
    .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body, unknown_body);
}

#[tokio::test]
async fn protected_routes_require_a_bearer_token() {
    let app = app().await;

    let (status, _) = send(&app, "GET", "/api/transactions", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/api/transactions", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn transaction_crud_flow() {
    let app = app().await;
    let token = register(&app, "alice@example.com").await;

    let (status, created) = send(
        &app,
        "POST",
        "/api/transactions",
        Some(&token),
        Some(json!({
            "amount": 42.5,
            "category": "Food",
            "description": "groceries",
            "type": "expense",
            "mood": "stressed"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["type"], "expense");
    let id = created["id"].as_str().unwrap().to_string();

    let (status, list) = send(&app, "GET", "/api/transactions", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, body) = send(
        &app,
        "DELETE",
        &format!("/api/transactions/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Transaction deleted");

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/transactions/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn goal_progress_comes_from_the_query_string() {
    let app = app().await;
    let token = register(&app, "alice@example.com").await;

    let (status, goal) = send(
        &app,
        "POST",
        "/api/goals",
        Some(&token),
        Some(json!({
            "title": "Vacation",
            "target_amount": 1200.0,
            "deadline": "2027-01-01T00:00:00Z"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = goal["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/api/goals/{id}?amount=300"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Goal updated");

    let (_, goals) = send(&app, "GET", "/api/goals", Some(&token), None).await;
    assert_eq!(goals[0]["current_amount"], 300.0);

    let (status, _) = send(
        &app,
        "PATCH",
        "/api/goals/no-such-goal?amount=1",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn fresh_user_dashboard_is_all_zeros() {
    let app = app().await;
    let token = register(&app, "alice@example.com").await;

    let (status, body) = send(&app, "GET", "/api/dashboard/stats", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["balance"], 0.0);
    assert_eq!(body["total_income"], 0.0);
    assert_eq!(body["total_expenses"], 0.0);
    assert_eq!(body["transaction_count"], 0);
    assert!(body["recent_transactions"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn limits_roundtrip_and_breach_check() {
    let app = app().await;
    let token = register(&app, "alice@example.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/category-limits",
        Some(&token),
        Some(json!({"limits": [{"category": "Food", "limit": 100.0}]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Category limits updated successfully");

    send(
        &app,
        "POST",
        "/api/transactions",
        Some(&token),
        Some(json!({
            "amount": 150.0,
            "category": "Food",
            "description": "takeout",
            "type": "expense"
        })),
    )
    .await;

    let (status, body) = send(
        &app,
        "GET",
        "/api/category-limits/check",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["category_spending"]["Food"], 150.0);
    assert_eq!(body["warnings"][0]["category"], "Food");
    assert_eq!(body["warnings"][0]["percentage"], 150.0);
}

#[tokio::test]
async fn profile_upsert_roundtrip() {
    let app = app().await;
    let token = register(&app, "alice@example.com").await;

    let (status, body) = send(&app, "GET", "/api/profile", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["has_profile"], false);

    let (status, body) = send(
        &app,
        "POST",
        "/api/profile",
        Some(&token),
        Some(json!({"monthly_income": 3000.0, "spending_triggers": ["stress"]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Profile saved successfully");

    let (_, body) = send(&app, "GET", "/api/profile", Some(&token), None).await;
    assert_eq!(body["has_profile"], true);
    assert_eq!(body["profile"]["monthly_income"], 3000.0);
}

#[tokio::test]
async fn chat_falls_back_when_the_provider_is_down() {
    let app = app().await;
    let token = register(&app, "alice@example.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/chatbot/chat",
        Some(&token),
        Some(json!({"message": "how am I doing?"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(
        body["response"]
            .as_str()
            .unwrap()
            .contains("trouble connecting")
    );
}

#[tokio::test]
async fn analyze_surfaces_provider_failure_as_500() {
    let app = app().await;
    let token = register(&app, "alice@example.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/insights/analyze",
        Some(&token),
        Some(json!({"context": "monthly check", "transactions": []})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to generate insights");
}
