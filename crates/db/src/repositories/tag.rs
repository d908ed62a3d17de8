//! Tag repository.

use std::sync::Arc;

use crate::entities::{Tag, tag};
use hub_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, QueryOrder,
};

/// Tag repository for database operations.
#[derive(Clone)]
pub struct TagRepository {
    db: Arc<DatabaseConnection>,
}

impl TagRepository {
    /// Create a new tag repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Access the underlying connection (for transactional imports).
    #[must_use]
    pub fn connection(&self) -> Arc<DatabaseConnection> {
        Arc::clone(&self.db)
    }

    /// Get all tags ordered by category then name.
    pub async fn find_all(&self) -> AppResult<Vec<tag::Model>> {
        Tag::find()
            .order_by_asc(tag::Column::Category)
            .order_by_asc(tag::Column::Name)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a tag by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<tag::Model>> {
        Tag::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get all tags in a category inside a transaction.
    pub async fn find_by_category_tx(
        &self,
        tx: &DatabaseTransaction,
        category: &str,
    ) -> AppResult<Vec<tag::Model>> {
        Tag::find()
            .filter(tag::Column::Category.eq(category))
            .all(tx)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a tag inside a transaction.
    pub async fn create_tx(
        &self,
        tx: &DatabaseTransaction,
        model: tag::ActiveModel,
    ) -> AppResult<tag::Model> {
        model
            .insert(tx)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a tag inside a transaction.
    pub async fn update_tx(
        &self,
        tx: &DatabaseTransaction,
        model: tag::ActiveModel,
    ) -> AppResult<tag::Model> {
        model
            .update(tx)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete tags by ID inside a transaction. Returns the number removed.
    pub async fn delete_by_ids_tx(
        &self,
        tx: &DatabaseTransaction,
        ids: &[String],
    ) -> AppResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = Tag::delete_many()
            .filter(tag::Column::Id.is_in(ids.to_vec()))
            .exec(tx)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected)
    }
}
