//! User-tag repository.

use std::sync::Arc;

use crate::entities::{UserTag, user_tag};
use hub_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter,
};

/// User-tag repository for database operations.
#[derive(Clone)]
pub struct UserTagRepository {
    db: Arc<DatabaseConnection>,
}

impl UserTagRepository {
    /// Create a new user-tag repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find tag assignments for a user.
    pub async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<user_tag::Model>> {
        UserTag::find()
            .filter(user_tag::Column::UserId.eq(user_id))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a tag assignment.
    pub async fn create(&self, model: user_tag::ActiveModel) -> AppResult<user_tag::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete all tag assignments of a user. Returns the number removed.
    pub async fn delete_by_user(&self, user_id: &str) -> AppResult<u64> {
        let result = UserTag::delete_many()
            .filter(user_tag::Column::UserId.eq(user_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected)
    }

    /// Delete all tag assignments of a user inside a transaction.
    pub async fn delete_by_user_tx(
        &self,
        tx: &DatabaseTransaction,
        user_id: &str,
    ) -> AppResult<u64> {
        let result = UserTag::delete_many()
            .filter(user_tag::Column::UserId.eq(user_id))
            .exec(tx)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected)
    }

    /// Delete assignments pointing at the given tags inside a transaction.
    pub async fn delete_by_tag_ids_tx(
        &self,
        tx: &DatabaseTransaction,
        tag_ids: &[String],
    ) -> AppResult<u64> {
        if tag_ids.is_empty() {
            return Ok(0);
        }

        let result = UserTag::delete_many()
            .filter(user_tag::Column::TagId.is_in(tag_ids.to_vec()))
            .exec(tx)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected)
    }
}
