//! `SeaORM` Entity for the transactions table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A single income/expense entry in a user's ledger.
///
/// Immutable after creation; the only state change is deletion. `kind`
/// holds the string form of `TransactionKind` and `amount` is an
/// unconstrained IEEE double, matching the permissive source schema.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    /// Opaque unique identifier, assigned at creation.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Owning user. Sole basis for access control.
    pub user_id: Uuid,
    /// Free-form label, non-empty at creation.
    pub text: String,
    /// Numeric value; sign is not normalized against `kind`.
    pub amount: f64,
    /// "income" or "expense".
    pub kind: String,
    /// Entry timestamp, defaulted to creation time.
    pub date: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
