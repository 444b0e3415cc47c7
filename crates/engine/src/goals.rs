//! Savings goals.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub deadline: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Goal {
    pub fn new(user_id: String, title: String, target_amount: f64, deadline: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            title,
            target_amount,
            current_amount: 0.0,
            deadline,
            created_at: Utc::now(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "goals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub deadline: DateTimeUtc,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Goal> for ActiveModel {
    fn from(goal: &Goal) -> Self {
        Self {
            id: ActiveValue::Set(goal.id.clone()),
            user_id: ActiveValue::Set(goal.user_id.clone()),
            title: ActiveValue::Set(goal.title.clone()),
            target_amount: ActiveValue::Set(goal.target_amount),
            current_amount: ActiveValue::Set(goal.current_amount),
            deadline: ActiveValue::Set(goal.deadline),
            created_at: ActiveValue::Set(goal.created_at),
        }
    }
}

impl From<Model> for Goal {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            title: model.title,
            target_amount: model.target_amount,
            current_amount: model.current_amount,
            deadline: model.deadline,
            created_at: model.created_at,
        }
    }
}
