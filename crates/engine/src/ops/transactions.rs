//! Transaction store operations, always scoped by owner.

use sea_orm::{QueryFilter, QueryOrder, QuerySelect, prelude::*};

use crate::transactions::{self, Transaction, TransactionNew};
use crate::{EngineError, ResultEngine};

use super::{Engine, LIST_CAP, validate_amount};

impl Engine {
    pub async fn new_transaction(
        &self,
        user_id: &str,
        new: TransactionNew,
    ) -> ResultEngine<Transaction> {
        validate_amount(new.amount, "amount")?;

        let tx = Transaction::new(user_id.to_string(), new);
        transactions::ActiveModel::from(&tx)
            .insert(self.database())
            .await?;
        Ok(tx)
    }

    /// Lists the owner's transactions, date descending, capped at 1000.
    pub async fn transactions(&self, user_id: &str) -> ResultEngine<Vec<Transaction>> {
        let models = transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id))
            .order_by_desc(transactions::Column::Date)
            .limit(LIST_CAP)
            .all(self.database())
            .await?;

        models.into_iter().map(Transaction::try_from).collect()
    }

    /// Deletes a transaction owned by `user_id`.
    ///
    /// A transaction owned by someone else is indistinguishable from a
    /// missing one.
    pub async fn delete_transaction(&self, user_id: &str, transaction_id: &str) -> ResultEngine<()> {
        let result = transactions::Entity::delete_many()
            .filter(transactions::Column::Id.eq(transaction_id))
            .filter(transactions::Column::UserId.eq(user_id))
            .exec(self.database())
            .await?;

        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound(
                "transaction not exists".to_string(),
            ));
        }
        Ok(())
    }
}
