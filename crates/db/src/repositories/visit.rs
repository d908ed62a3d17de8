//! Visit repository.

use std::sync::Arc;

use crate::entities::{Visit, visit};
use chrono::NaiveDate;
use hub_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

/// Visit repository for database operations.
#[derive(Clone)]
pub struct VisitRepository {
    db: Arc<DatabaseConnection>,
}

impl VisitRepository {
    /// Create a new visit repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Get confirmed visits at an office on a given date.
    pub async fn find_confirmed_by_office_and_date(
        &self,
        office_id: &str,
        date: NaiveDate,
    ) -> AppResult<Vec<visit::Model>> {
        Visit::find()
            .filter(visit::Column::OfficeId.eq(office_id))
            .filter(visit::Column::Date.eq(date))
            .filter(visit::Column::Status.eq(visit::VisitStatus::Confirmed))
            .order_by_asc(visit::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a user's confirmed visits on or after the given date.
    pub async fn find_upcoming_by_user(
        &self,
        user_id: &str,
        from: NaiveDate,
    ) -> AppResult<Vec<visit::Model>> {
        Visit::find()
            .filter(visit::Column::UserId.eq(user_id))
            .filter(visit::Column::Date.gte(from))
            .filter(visit::Column::Status.eq(visit::VisitStatus::Confirmed))
            .order_by_asc(visit::Column::Date)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new visit.
    pub async fn create(&self, model: visit::ActiveModel) -> AppResult<visit::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
