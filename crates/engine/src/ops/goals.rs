//! Savings-goal store operations.

use chrono::{DateTime, Utc};
use sea_orm::{QueryFilter, QueryOrder, QuerySelect, prelude::*};

use crate::goals::{self, Goal};
use crate::{EngineError, ResultEngine};

use super::{Engine, LIST_CAP, validate_amount};

impl Engine {
    pub async fn new_goal(
        &self,
        user_id: &str,
        title: &str,
        target_amount: f64,
        deadline: DateTime<Utc>,
    ) -> ResultEngine<Goal> {
        validate_amount(target_amount, "target_amount")?;
        if target_amount <= 0.0 {
            return Err(EngineError::Validation(
                "target_amount must be positive".to_string(),
            ));
        }

        let goal = Goal::new(user_id.to_string(), title.to_string(), target_amount, deadline);
        goals::ActiveModel::from(&goal)
            .insert(self.database())
            .await?;
        Ok(goal)
    }

    /// Lists the owner's goals, newest first, capped at 1000.
    pub async fn goals(&self, user_id: &str) -> ResultEngine<Vec<Goal>> {
        let models = goals::Entity::find()
            .filter(goals::Column::UserId.eq(user_id))
            .order_by_desc(goals::Column::CreatedAt)
            .limit(LIST_CAP)
            .all(self.database())
            .await?;

        Ok(models.into_iter().map(Goal::from).collect())
    }

    /// Overwrites the goal's progress amount.
    pub async fn set_goal_progress(
        &self,
        user_id: &str,
        goal_id: &str,
        amount: f64,
    ) -> ResultEngine<()> {
        validate_amount(amount, "amount")?;

        let result = goals::Entity::update_many()
            .col_expr(goals::Column::CurrentAmount, Expr::value(amount))
            .filter(goals::Column::Id.eq(goal_id))
            .filter(goals::Column::UserId.eq(user_id))
            .exec(self.database())
            .await?;

        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("goal not exists".to_string()));
        }
        Ok(())
    }

    pub async fn delete_goal(&self, user_id: &str, goal_id: &str) -> ResultEngine<()> {
        let result = goals::Entity::delete_many()
            .filter(goals::Column::Id.eq(goal_id))
            .filter(goals::Column::UserId.eq(user_id))
            .exec(self.database())
            .await?;

        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("goal not exists".to_string()));
        }
        Ok(())
    }
}
