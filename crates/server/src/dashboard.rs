//! Dashboard aggregation endpoint.

use api_types::stats::DashboardResponse;
use axum::{Extension, Json, extract::State};

use crate::{
    ServerError,
    server::{CurrentUser, ServerState},
    transactions::map_transaction,
};

pub async fn stats(
    Extension(user): Extension<CurrentUser>,
    State(state): State<ServerState>,
) -> Result<Json<DashboardResponse>, ServerError> {
    let stats = state.engine.dashboard_stats(&user.0).await?;

    Ok(Json(DashboardResponse {
        balance: stats.balance,
        total_income: stats.total_income,
        total_expenses: stats.total_expenses,
        category_spending: stats.category_spending,
        transaction_count: stats.transaction_count,
        recent_transactions: stats
            .recent_transactions
            .into_iter()
            .map(map_transaction)
            .collect(),
    }))
}
