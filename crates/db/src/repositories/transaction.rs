//! Transaction repository for ledger database operations.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

use crate::entities::transactions;
use tally_shared::TransactionKind;

/// Input for creating a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    /// Owning user.
    pub user_id: Uuid,
    /// Free-form label.
    pub text: String,
    /// Amount; sign unconstrained.
    pub amount: f64,
    /// Income or expense.
    pub kind: TransactionKind,
    /// Entry timestamp; defaults to now when absent.
    pub date: Option<DateTime<Utc>>,
}

/// Filter options for listing transactions. Absent fields leave that
/// dimension unconstrained.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransactionFilter {
    /// Filter by transaction kind.
    pub kind: Option<TransactionKind>,
    /// Inclusive lower bound on `date`.
    pub start: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `date`.
    pub end: Option<DateTime<Utc>>,
}

/// Transaction repository for per-user ledger storage.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Persists a new transaction owned by `input.user_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        input: CreateTransactionInput,
    ) -> Result<transactions::Model, DbErr> {
        let date = input.date.unwrap_or_else(Utc::now);

        let transaction = transactions::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(input.user_id),
            text: Set(input.text),
            amount: Set(input.amount),
            kind: Set(input.kind.as_str().to_string()),
            date: Set(date.into()),
        };

        transaction.insert(&self.db).await
    }

    /// Lists the owner's transactions matching `filter`, most recent first.
    ///
    /// Date bounds are inclusive on both ends. The full matching set is
    /// returned; there is no pagination.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        user_id: Uuid,
        filter: TransactionFilter,
    ) -> Result<Vec<transactions::Model>, DbErr> {
        let mut query = transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id));

        if let Some(kind) = filter.kind {
            query = query.filter(transactions::Column::Kind.eq(kind.as_str()));
        }
        // Bounds are converted to the column's own type so the comparison
        // matches the stored representation on every backend
        if let Some(start) = filter.start {
            let start: sea_orm::prelude::DateTimeWithTimeZone = start.into();
            query = query.filter(transactions::Column::Date.gte(start));
        }
        if let Some(end) = filter.end {
            let end: sea_orm::prelude::DateTimeWithTimeZone = end.into();
            query = query.filter(transactions::Column::Date.lte(end));
        }

        query
            .order_by_desc(transactions::Column::Date)
            .all(&self.db)
            .await
    }

    /// Deletes the transaction matching both `id` and owner.
    ///
    /// Returns the number of rows removed (0 or 1). A missing id, or an id
    /// owned by someone else, removes nothing; callers treat that as
    /// success per the idempotent delete contract.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete_for_owner(&self, user_id: Uuid, id: Uuid) -> Result<u64, DbErr> {
        let result = transactions::Entity::delete_many()
            .filter(transactions::Column::Id.eq(id))
            .filter(transactions::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
