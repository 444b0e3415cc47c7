//! Domain core of the FINE backend: credential and ledger stores, the
//! auth service, and the pure aggregation engine.
//!
//! Everything here is HTTP-agnostic; the server crate maps
//! [`EngineError`] values to status codes at its own boundary.

pub use error::EngineError;
pub use goals::Goal;
pub use ops::{Engine, EngineBuilder};
pub use profiles::{Profile, ProfileData};
pub use settings::CategoryLimit;
pub use stats::{DashboardStats, LimitReport, LimitWarning};
pub use transactions::{Transaction, TransactionKind, TransactionNew};
pub use users::User;

mod auth;
mod error;
mod goals;
mod ops;
mod profiles;
mod settings;
pub mod stats;
mod transactions;
mod users;

type ResultEngine<T> = Result<T, EngineError>;
