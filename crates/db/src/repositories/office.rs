//! Office, area and desk repository.

use std::sync::Arc;

use crate::entities::{Area, Desk, Office, area, desk, office};
use hub_common::{AppError, AppResult};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

/// Repository over offices and their areas/desks.
#[derive(Clone)]
pub struct OfficeRepository {
    db: Arc<DatabaseConnection>,
}

impl OfficeRepository {
    /// Create a new office repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an office by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<office::Model>> {
        Office::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find an office by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<office::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Office not found: {id}")))
    }

    /// Get all offices ordered by name.
    pub async fn find_all(&self) -> AppResult<Vec<office::Model>> {
        Office::find()
            .order_by_asc(office::Column::Name)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get the areas of an office ordered by name.
    pub async fn find_areas(&self, office_id: &str) -> AppResult<Vec<area::Model>> {
        Area::find()
            .filter(area::Column::OfficeId.eq(office_id))
            .order_by_asc(area::Column::Name)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get the desks belonging to the given areas.
    pub async fn find_desks(&self, area_ids: &[String]) -> AppResult<Vec<desk::Model>> {
        if area_ids.is_empty() {
            return Ok(vec![]);
        }

        Desk::find()
            .filter(desk::Column::AreaId.is_in(area_ids.to_vec()))
            .order_by_asc(desk::Column::Name)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_office(id: &str, name: &str, allow: bool) -> office::Model {
        office::Model {
            id: id.to_string(),
            name: name.to_string(),
            allow_desk_reservation: allow,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<office::Model>::new()])
                .into_connection(),
        );

        let repo = OfficeRepository::new(db);
        let result = repo.get_by_id("nowhere").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_find_desks_empty_areas_short_circuits() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
        );

        let repo = OfficeRepository::new(db);
        let desks = repo.find_desks(&[]).await.unwrap();

        assert!(desks.is_empty());
    }

    #[tokio::test]
    async fn test_find_by_id_found() {
        let office = create_test_office("o1", "Berlin", true);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[office]])
                .into_connection(),
        );

        let repo = OfficeRepository::new(db);
        let found = repo.find_by_id("o1").await.unwrap().unwrap();

        assert_eq!(found.name, "Berlin");
        assert!(found.allow_desk_reservation);
    }
}
