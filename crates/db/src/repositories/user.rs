//! User repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, Set,
};
use uuid::Uuid;

use crate::entities::users;

/// User repository for credential storage.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user by username.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(id).one(&self.db).await
    }

    /// Creates a new user with a pre-hashed password.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails, including the
    /// unique-constraint violation on a duplicate username.
    pub async fn create(&self, username: &str, password_hash: &str) -> Result<users::Model, DbErr> {
        let user = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(username.to_string()),
            password_hash: Set(password_hash.to_string()),
            created_at: Set(chrono::Utc::now().into()),
        };

        user.insert(&self.db).await
    }

    /// Checks if a username is already registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn username_exists(&self, username: &str) -> Result<bool, DbErr> {
        let count = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }
}
