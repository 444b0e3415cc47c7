//! Transaction API endpoints.

use api_types::MessageResponse;
use api_types::transaction::{TransactionKind as ApiKind, TransactionNew, TransactionView};
use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::{
    ServerError,
    server::{CurrentUser, ServerState},
};

fn map_kind(kind: engine::TransactionKind) -> ApiKind {
    match kind {
        engine::TransactionKind::Income => ApiKind::Income,
        engine::TransactionKind::Expense => ApiKind::Expense,
    }
}

fn to_engine_kind(kind: ApiKind) -> engine::TransactionKind {
    match kind {
        ApiKind::Income => engine::TransactionKind::Income,
        ApiKind::Expense => engine::TransactionKind::Expense,
    }
}

pub(crate) fn map_transaction(tx: engine::Transaction) -> TransactionView {
    TransactionView {
        id: tx.id,
        user_id: tx.user_id,
        amount: tx.amount,
        category: tx.category,
        description: tx.description,
        kind: map_kind(tx.kind),
        mood: tx.mood,
        date: tx.date,
        created_at: tx.created_at,
    }
}

pub async fn create(
    Extension(user): Extension<CurrentUser>,
    State(state): State<ServerState>,
    Json(payload): Json<TransactionNew>,
) -> Result<Json<TransactionView>, ServerError> {
    let new = engine::TransactionNew {
        amount: payload.amount,
        category: payload.category,
        description: payload.description,
        kind: to_engine_kind(payload.kind),
        mood: payload.mood,
        date: payload.date,
    };

    let tx = state.engine.new_transaction(&user.0, new).await?;
    Ok(Json(map_transaction(tx)))
}

pub async fn list(
    Extension(user): Extension<CurrentUser>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<TransactionView>>, ServerError> {
    let txs = state.engine.transactions(&user.0).await?;
    Ok(Json(txs.into_iter().map(map_transaction).collect()))
}

pub async fn remove(
    Extension(user): Extension<CurrentUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ServerError> {
    state.engine.delete_transaction(&user.0, &id).await?;
    Ok(Json(MessageResponse {
        message: "Transaction deleted".to_string(),
    }))
}
