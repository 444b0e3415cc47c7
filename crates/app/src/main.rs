use std::time::Duration;

use migration::{Migrator, MigratorTrait};
use settings::Database;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "fine={level},server={level},engine={level},insight={level}",
            level = settings.app.level
        ))
        .init();

    let db = parse_database(&settings.database).await?;

    let mut engine = engine::Engine::builder()
        .database(db)
        .secret(settings.auth.secret.as_bytes());
    if let Some(hours) = settings.auth.token_hours {
        engine = engine.token_hours(hours);
    }
    let engine = engine.build()?;

    let mut insight = insight::InsightClient::builder()
        .base_url(&settings.ai.base_url)
        .model(&settings.ai.model)
        .api_key(settings.ai.api_key.as_deref());
    if let Some(secs) = settings.ai.timeout_secs {
        insight = insight.timeout(Duration::from_secs(secs));
    }
    let insight = insight.build()?;

    let bind = settings.server.bind.unwrap_or_else(|| "127.0.0.1".to_string());
    let addr = format!("{}:{}", bind, settings.server.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    server::run_with_listener(engine, insight, settings.server.cors_origins, listener).await?;

    Ok(())
}

async fn parse_database(
    config: &settings::Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let url = match config {
        Database::Memory => String::from("sqlite::memory:"),
        Database::Sqlite(path) => format!("sqlite:{}?mode=rwc", path),
    };

    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}
