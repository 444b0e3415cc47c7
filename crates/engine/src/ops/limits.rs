//! Category-limit storage and the month-to-date breach check.

use chrono::{DateTime, Utc};
use sea_orm::prelude::*;

use crate::settings::{self, CategoryLimit};
use crate::stats::{self, LimitReport};
use crate::ResultEngine;

use super::{Engine, validate_limits};

impl Engine {
    /// The user's configured ceilings; an empty list when none were set.
    pub async fn category_limits(&self, user_id: &str) -> ResultEngine<Vec<CategoryLimit>> {
        match settings::Entity::find_by_id(user_id)
            .one(self.database())
            .await?
        {
            Some(model) => model.limits(),
            None => Ok(Vec::new()),
        }
    }

    /// Replaces the whole limit set (upsert, not merge). Posting the same
    /// payload twice leaves the stored document unchanged.
    pub async fn set_category_limits(
        &self,
        user_id: &str,
        limits: Vec<CategoryLimit>,
    ) -> ResultEngine<Vec<CategoryLimit>> {
        validate_limits(&limits)?;

        let active = settings::Model::active(user_id, &limits)?;
        let existing = settings::Entity::find_by_id(user_id)
            .one(self.database())
            .await?;
        if existing.is_some() {
            active.update(self.database()).await?;
        } else {
            active.insert(self.database()).await?;
        }
        Ok(limits)
    }

    /// Month-to-date spending per category plus breach warnings, relative
    /// to `reference` (normally "now").
    pub async fn check_category_limits(
        &self,
        user_id: &str,
        reference: DateTime<Utc>,
    ) -> ResultEngine<LimitReport> {
        let transactions = self.transactions(user_id).await?;
        let limits = self.category_limits(user_id).await?;
        Ok(stats::check_limits(&transactions, &limits, reference))
    }
}
