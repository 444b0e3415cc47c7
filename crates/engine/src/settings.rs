//! Per-user settings, currently only category spending ceilings.
//!
//! The limit list is replaced wholesale on every update, so it is stored
//! as a single JSON column rather than one row per category.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::EngineError;

/// A monthly spending ceiling for one category label.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryLimit {
    pub category: String,
    pub limit: f64,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    pub category_limits: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn active(user_id: &str, limits: &[CategoryLimit]) -> Result<ActiveModel, EngineError> {
        let encoded = serde_json::to_string(limits)
            .map_err(|err| EngineError::Validation(format!("invalid category limits: {err}")))?;
        Ok(ActiveModel {
            user_id: ActiveValue::Set(user_id.to_string()),
            category_limits: ActiveValue::Set(encoded),
        })
    }

    pub fn limits(&self) -> Result<Vec<CategoryLimit>, EngineError> {
        serde_json::from_str(&self.category_limits).map_err(|err| {
            EngineError::Validation(format!("corrupt category limits document: {err}"))
        })
    }
}
