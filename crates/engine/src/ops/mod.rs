use sea_orm::DatabaseConnection;

use crate::auth::Auth;
use crate::{EngineError, ResultEngine};

mod accounts;
mod goals;
mod limits;
mod profiles;
mod reports;
mod transactions;

/// Hard cap applied to every per-user list query.
pub(crate) const LIST_CAP: u64 = 1000;

const DEFAULT_TOKEN_HOURS: i64 = 24;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
    auth: Auth,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub(crate) fn database(&self) -> &DatabaseConnection {
        &self.database
    }

    pub(crate) fn auth(&self) -> &Auth {
        &self.auth
    }
}

/// Exact-match email validation: one `@` with a dotted domain after it.
///
/// Matching stays case-sensitive with no normalization, mirroring the
/// uniqueness rule enforced at registration.
fn validate_email(value: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    let valid = trimmed
        .split_once('@')
        .is_some_and(|(local, domain)| {
            !local.is_empty()
                && !domain.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        });
    if !valid {
        return Err(EngineError::Validation(format!(
            "invalid email address: {trimmed}"
        )));
    }
    Ok(trimmed.to_string())
}

fn validate_amount(value: f64, label: &str) -> ResultEngine<f64> {
    if !value.is_finite() {
        return Err(EngineError::Validation(format!(
            "{label} must be a finite number"
        )));
    }
    Ok(value)
}

fn validate_limits(limits: &[crate::settings::CategoryLimit]) -> ResultEngine<()> {
    for limit in limits {
        validate_amount(limit.limit, "limit")?;
        if limit.limit < 0.0 {
            return Err(EngineError::Validation(format!(
                "limit for \"{}\" must not be negative",
                limit.category
            )));
        }
    }
    Ok(())
}

/// The builder for `Engine`
pub struct EngineBuilder {
    database: DatabaseConnection,
    secret: Vec<u8>,
    token_hours: i64,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            database: DatabaseConnection::default(),
            secret: Vec::new(),
            token_hours: DEFAULT_TOKEN_HOURS,
        }
    }
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Shared secret used to sign and verify bearer tokens.
    pub fn secret(mut self, secret: &[u8]) -> EngineBuilder {
        self.secret = secret.to_vec();
        self
    }

    /// Token validity window, defaults to 24 hours.
    pub fn token_hours(mut self, hours: i64) -> EngineBuilder {
        self.token_hours = hours;
        self
    }

    /// Construct `Engine`
    pub fn build(self) -> ResultEngine<Engine> {
        if self.secret.is_empty() {
            return Err(EngineError::Validation(
                "signing secret must not be empty".to_string(),
            ));
        }
        Ok(Engine {
            database: self.database,
            auth: Auth::new(&self.secret, self.token_hours),
        })
    }
}
