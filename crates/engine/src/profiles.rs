//! Optional financial self-report, one document per user, upserted
//! wholesale.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::EngineError;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileData {
    pub monthly_income: Option<f64>,
    pub savings_goal: Option<f64>,
    pub primary_goal: Option<String>,
    pub spending_triggers: Vec<String>,
    pub budget_priority: Option<String>,
    pub risk_tolerance: Option<String>,
    pub financial_experience: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: String,
    pub data: ProfileData,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    pub monthly_income: Option<f64>,
    pub savings_goal: Option<f64>,
    pub primary_goal: Option<String>,
    pub spending_triggers: String,
    pub budget_priority: Option<String>,
    pub risk_tolerance: Option<String>,
    pub financial_experience: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn active(profile: &Profile) -> Result<ActiveModel, EngineError> {
        let triggers = serde_json::to_string(&profile.data.spending_triggers)
            .map_err(|err| EngineError::Validation(format!("invalid spending triggers: {err}")))?;
        Ok(ActiveModel {
            user_id: ActiveValue::Set(profile.user_id.clone()),
            monthly_income: ActiveValue::Set(profile.data.monthly_income),
            savings_goal: ActiveValue::Set(profile.data.savings_goal),
            primary_goal: ActiveValue::Set(profile.data.primary_goal.clone()),
            spending_triggers: ActiveValue::Set(triggers),
            budget_priority: ActiveValue::Set(profile.data.budget_priority.clone()),
            risk_tolerance: ActiveValue::Set(profile.data.risk_tolerance.clone()),
            financial_experience: ActiveValue::Set(profile.data.financial_experience.clone()),
            created_at: ActiveValue::Set(profile.created_at),
        })
    }
}

impl TryFrom<Model> for Profile {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let spending_triggers = serde_json::from_str(&model.spending_triggers).map_err(|err| {
            EngineError::Validation(format!("corrupt spending triggers document: {err}"))
        })?;
        Ok(Self {
            user_id: model.user_id,
            data: ProfileData {
                monthly_income: model.monthly_income,
                savings_goal: model.savings_goal,
                primary_goal: model.primary_goal,
                spending_triggers,
                budget_priority: model.budget_priority,
                risk_tolerance: model.risk_tolerance,
                financial_experience: model.financial_experience,
            },
            created_at: model.created_at,
        })
    }
}
