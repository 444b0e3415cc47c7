//! Transaction primitives.
//!
//! A `Transaction` is a single income or expense event owned by exactly
//! one user. Rows are immutable apart from deletion.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::EngineError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(EngineError::Validation(format!(
                "invalid transaction kind: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub kind: TransactionKind,
    pub mood: Option<String>,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Fields a caller provides when recording a transaction.
#[derive(Clone, Debug)]
pub struct TransactionNew {
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub kind: TransactionKind,
    pub mood: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

impl Transaction {
    pub fn new(user_id: String, new: TransactionNew) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            amount: new.amount,
            category: new.category,
            description: new.description,
            kind: new.kind,
            mood: new.mood,
            date: new.date.unwrap_or(now),
            created_at: now,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub kind: String,
    pub mood: Option<String>,
    pub date: DateTimeUtc,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Transaction> for ActiveModel {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: ActiveValue::Set(tx.id.clone()),
            user_id: ActiveValue::Set(tx.user_id.clone()),
            amount: ActiveValue::Set(tx.amount),
            category: ActiveValue::Set(tx.category.clone()),
            description: ActiveValue::Set(tx.description.clone()),
            kind: ActiveValue::Set(tx.kind.as_str().to_string()),
            mood: ActiveValue::Set(tx.mood.clone()),
            date: ActiveValue::Set(tx.date),
            created_at: ActiveValue::Set(tx.created_at),
        }
    }
}

impl TryFrom<Model> for Transaction {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            user_id: model.user_id,
            amount: model.amount,
            category: model.category,
            description: model.description,
            kind: TransactionKind::try_from(model.kind.as_str())?,
            mood: model.mood,
            date: model.date,
            created_at: model.created_at,
        })
    }
}
