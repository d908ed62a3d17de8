//! Form submission repository.

use std::sync::Arc;

use crate::entities::{FormSubmission, form_submission};
use hub_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};

/// Form submission repository for database operations.
#[derive(Clone)]
pub struct FormSubmissionRepository {
    db: Arc<DatabaseConnection>,
}

impl FormSubmissionRepository {
    /// Create a new form submission repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find submissions belonging to a user, newest first.
    pub async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<form_submission::Model>> {
        FormSubmission::find()
            .filter(form_submission::Column::UserId.eq(user_id))
            .order_by_desc(form_submission::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count submissions belonging to a user.
    pub async fn count_by_user(&self, user_id: &str) -> AppResult<u64> {
        FormSubmission::find()
            .filter(form_submission::Column::UserId.eq(user_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete all submissions belonging to a user. Returns the number removed.
    pub async fn delete_by_user(&self, user_id: &str) -> AppResult<u64> {
        let result = FormSubmission::delete_many()
            .filter(form_submission::Column::UserId.eq(user_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected)
    }

    /// Create a new submission.
    pub async fn create(
        &self,
        model: form_submission::ActiveModel,
    ) -> AppResult<form_submission::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
