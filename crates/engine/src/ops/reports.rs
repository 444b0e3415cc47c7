//! Read-only aggregation endpoints: fetch the user's transactions, then
//! run the pure functions in [`crate::stats`].

use std::collections::HashMap;

use crate::ResultEngine;
use crate::stats::{self, DashboardStats};

use super::Engine;

impl Engine {
    pub async fn dashboard_stats(&self, user_id: &str) -> ResultEngine<DashboardStats> {
        let transactions = self.transactions(user_id).await?;
        Ok(stats::dashboard(&transactions))
    }

    pub async fn mood_spending(&self, user_id: &str) -> ResultEngine<HashMap<String, f64>> {
        let transactions = self.transactions(user_id).await?;
        Ok(stats::mood_spending(&transactions))
    }
}
