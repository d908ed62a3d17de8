//! Hub map and visit service.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use hub_common::AppResult;
use hub_db::{
    entities::{area, desk, visit},
    repositories::{OfficeRepository, UserRepository, VisitRepository},
};
use serde::Serialize;

/// An area of the hub map together with its desks.
#[derive(Debug, Clone, Serialize)]
pub struct AreaWithDesks {
    pub area: area::Model,
    pub desks: Vec<desk::Model>,
}

/// A visitor row on the hub map.
#[derive(Debug, Clone, Serialize)]
pub struct Visitor {
    pub user_id: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub area_id: String,
    pub desk_id: String,
}

/// Desks still free at an office on one date.
#[derive(Debug, Clone, Serialize)]
pub struct DeskAvailability {
    pub date: NaiveDate,
    pub desk_ids: Vec<String>,
}

/// Visit service for hub map queries and bookings.
#[derive(Clone)]
pub struct VisitService {
    office_repo: OfficeRepository,
    visit_repo: VisitRepository,
    user_repo: UserRepository,
}

impl VisitService {
    /// Create a new visit service.
    #[must_use]
    pub const fn new(
        office_repo: OfficeRepository,
        visit_repo: VisitRepository,
        user_repo: UserRepository,
    ) -> Self {
        Self {
            office_repo,
            visit_repo,
            user_repo,
        }
    }

    /// Areas of an office with their desks.
    ///
    /// Offices that do not allow desk reservation have no map; this
    /// returns an empty list for them.
    pub async fn areas(&self, office_id: &str) -> AppResult<Vec<AreaWithDesks>> {
        let office = self.office_repo.get_by_id(office_id).await?;
        if !office.allow_desk_reservation {
            return Ok(vec![]);
        }

        let areas = self.office_repo.find_areas(office_id).await?;
        let area_ids: Vec<String> = areas.iter().map(|a| a.id.clone()).collect();
        let desks = self.office_repo.find_desks(&area_ids).await?;

        Ok(areas
            .into_iter()
            .map(|area| {
                let area_desks = desks.iter().filter(|d| d.area_id == area.id).cloned().collect();
                AreaWithDesks {
                    area,
                    desks: area_desks,
                }
            })
            .collect())
    }

    /// Visitors of an office on a date.
    ///
    /// Deleted users and users in stealth mode never appear, even when
    /// their visit row is still confirmed.
    pub async fn visitors(&self, office_id: &str, date: NaiveDate) -> AppResult<Vec<Visitor>> {
        let visits = self
            .visit_repo
            .find_confirmed_by_office_and_date(office_id, date)
            .await?;

        let user_ids: Vec<String> = visits.iter().map(|v| v.user_id.clone()).collect();
        let users = self.user_repo.find_by_ids(&user_ids).await?;

        let mut visitors = Vec::new();
        for visit in visits {
            let Some(user) = users.iter().find(|u| u.id == visit.user_id) else {
                continue;
            };
            if !user.is_active() || user.stealth_mode {
                continue;
            }
            visitors.push(Visitor {
                user_id: user.id.clone(),
                full_name: user.full_name.clone(),
                avatar_url: user.avatar_url.clone(),
                area_id: visit.area_id,
                desk_id: visit.desk_id,
            });
        }
        Ok(visitors)
    }

    /// Free desks of an office for each requested date.
    pub async fn available_desks(
        &self,
        office_id: &str,
        dates: &[NaiveDate],
    ) -> AppResult<Vec<DeskAvailability>> {
        let areas = self.office_repo.find_areas(office_id).await?;
        let area_ids: Vec<String> = areas.iter().map(|a| a.id.clone()).collect();
        let desks = self.office_repo.find_desks(&area_ids).await?;

        let mut availability = Vec::with_capacity(dates.len());
        for &date in dates {
            let visits = self
                .visit_repo
                .find_confirmed_by_office_and_date(office_id, date)
                .await?;
            let taken: Vec<&str> = visits.iter().map(|v| v.desk_id.as_str()).collect();
            let desk_ids = desks
                .iter()
                .filter(|d| !taken.contains(&d.id.as_str()))
                .map(|d| d.id.clone())
                .collect();
            availability.push(DeskAvailability { date, desk_ids });
        }
        Ok(availability)
    }

    /// A user's confirmed visits from a date forward, grouped by date.
    pub async fn upcoming(
        &self,
        user_id: &str,
        from: NaiveDate,
    ) -> AppResult<BTreeMap<NaiveDate, Vec<visit::Model>>> {
        let visits = self.visit_repo.find_upcoming_by_user(user_id, from).await?;

        let mut grouped: BTreeMap<NaiveDate, Vec<visit::Model>> = BTreeMap::new();
        for visit in visits {
            grouped.entry(visit.date).or_default().push(visit);
        }
        Ok(grouped)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use hub_db::entities::{office, user};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_office(id: &str, allow: bool) -> office::Model {
        office::Model {
            id: id.to_string(),
            name: "Berlin".to_string(),
            allow_desk_reservation: allow,
            created_at: Utc::now().into(),
        }
    }

    fn create_test_user(id: &str, stealth: bool) -> user::Model {
        user::Model {
            id: id.to_string(),
            email: format!("{id}@example.com"),
            full_name: format!("User {id}"),
            roles: serde_json::json!(["regular"]),
            department: None,
            avatar_url: None,
            stealth_mode: stealth,
            scheduled_to_delete: None,
            deleted_at: None,
            token: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn create_test_visit(id: &str, user_id: &str, desk_id: &str, date: NaiveDate) -> visit::Model {
        visit::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            office_id: "o1".to_string(),
            area_id: "a1".to_string(),
            desk_id: desk_id.to_string(),
            date,
            status: visit::VisitStatus::Confirmed,
            created_at: Utc::now().into(),
        }
    }

    fn service(db: Arc<sea_orm::DatabaseConnection>) -> VisitService {
        VisitService::new(
            OfficeRepository::new(Arc::clone(&db)),
            VisitRepository::new(Arc::clone(&db)),
            UserRepository::new(db),
        )
    }

    #[tokio::test]
    async fn test_areas_empty_when_reservation_disabled() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![create_test_office("o1", false)]])
                .into_connection(),
        );

        let result = service(db).areas("o1").await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_visitors_hides_stealth_and_deleted_users() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let visits = vec![
            create_test_visit("v1", "u1", "d1", date),
            create_test_visit("v2", "u2", "d2", date),
            create_test_visit("v3", "u3", "d3", date),
        ];
        let visible = create_test_user("u1", false);
        let stealthy = create_test_user("u2", true);
        let mut deleted = create_test_user("u3", false);
        deleted.deleted_at = Some(Utc::now().into());

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([visits])
                .append_query_results([vec![visible, stealthy, deleted]])
                .into_connection(),
        );

        let visitors = service(db).visitors("o1", date).await.unwrap();
        assert_eq!(visitors.len(), 1);
        assert_eq!(visitors[0].user_id, "u1");
        assert_eq!(visitors[0].desk_id, "d1");
    }

    #[tokio::test]
    async fn test_available_desks_subtracts_taken() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let areas = vec![area::Model {
            id: "a1".to_string(),
            office_id: "o1".to_string(),
            name: "Main floor".to_string(),
            map_url: None,
            created_at: Utc::now().into(),
        }];
        let desks = vec![
            desk::Model {
                id: "d1".to_string(),
                area_id: "a1".to_string(),
                name: "Desk 1".to_string(),
                position_x: 10.0,
                position_y: 20.0,
                created_at: Utc::now().into(),
            },
            desk::Model {
                id: "d2".to_string(),
                area_id: "a1".to_string(),
                name: "Desk 2".to_string(),
                position_x: 30.0,
                position_y: 20.0,
                created_at: Utc::now().into(),
            },
        ];
        let visits = vec![create_test_visit("v1", "u1", "d1", date)];

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([areas])
                .append_query_results([desks])
                .append_query_results([visits])
                .into_connection(),
        );

        let availability = service(db).available_desks("o1", &[date]).await.unwrap();
        assert_eq!(availability.len(), 1);
        assert_eq!(availability[0].desk_ids, vec!["d2".to_string()]);
    }

    #[tokio::test]
    async fn test_upcoming_groups_by_date() {
        let day1 = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let day2 = NaiveDate::from_ymd_opt(2026, 3, 3).unwrap();
        let visits = vec![
            create_test_visit("v1", "u1", "d1", day1),
            create_test_visit("v2", "u1", "d2", day1),
            create_test_visit("v3", "u1", "d1", day2),
        ];

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([visits])
                .into_connection(),
        );

        let grouped = service(db).upcoming("u1", day1).await.unwrap();
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[&day1].len(), 2);
        assert_eq!(grouped[&day2].len(), 1);
    }
}
