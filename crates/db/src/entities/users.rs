//! `SeaORM` Entity for the users table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A registered user. Created once via registration, never updated or
/// deleted through the API.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Opaque unique identifier, assigned at creation.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Globally unique username, immutable after creation.
    #[sea_orm(unique)]
    pub username: String,
    /// Argon2id hash in PHC string format. The plaintext is never stored.
    pub password_hash: String,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::transactions::Entity")]
    Transactions,
}

impl Related<super::transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
