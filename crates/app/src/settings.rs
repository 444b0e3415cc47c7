//! Application settings, read from `settings.toml` with `FINE__*`
//! environment overrides (e.g. `FINE__AUTH__SECRET`).

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct App {
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    /// `["*"]` opens the API to every origin, without credentials.
    #[serde(default = "default_origins")]
    pub cors_origins: Vec<String>,
}

fn default_origins() -> Vec<String> {
    vec!["*".to_string()]
}

#[derive(Debug, Deserialize)]
pub struct Auth {
    pub secret: String,
    pub token_hours: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct Ai {
    /// OpenAI-compatible provider root, e.g. `http://localhost:11434/v1`.
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    pub database: Database,
    pub server: Server,
    pub auth: Auth,
    pub ai: Ai,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("settings"))
            .add_source(Environment::with_prefix("FINE").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}
