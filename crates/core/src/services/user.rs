//! User service.
//!
//! Holds the user lifecycle rules: token auth, the admin list filters,
//! role assignment and the reversible deletion schedule.

use chrono::{Duration, Utc};
use hub_common::{AppError, AppResult, Role};
use hub_db::{entities::user, repositories::UserRepository};
use sea_orm::{IntoActiveModel, Set};

/// Sentinel department value matching users with no department set.
pub const NO_DEPARTMENT: &str = "~none~";

/// Filter parameters for the admin user list.
///
/// A user matches when every non-empty predicate matches; the predicates
/// intersect, they never widen each other.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    /// Role identifiers; a user matches when they hold at least one.
    pub roles: Vec<String>,
    /// Department names; [`NO_DEPARTMENT`] matches users without one.
    pub departments: Vec<String>,
    /// Substring match on email or full name, whitespace-trimmed.
    pub query: String,
}

impl UserFilter {
    /// Whether a user passes all three predicates.
    #[must_use]
    pub fn matches(&self, user: &user::Model) -> bool {
        self.matches_roles(user) && self.matches_department(user) && self.matches_query(user)
    }

    fn matches_roles(&self, user: &user::Model) -> bool {
        if self.roles.is_empty() {
            return true;
        }
        let user_roles = user.role_ids();
        self.roles.iter().any(|r| user_roles.contains(r))
    }

    fn matches_department(&self, user: &user::Model) -> bool {
        if self.departments.is_empty() {
            return true;
        }
        match &user.department {
            Some(dept) => self.departments.iter().any(|d| d == dept),
            None => self.departments.iter().any(|d| d == NO_DEPARTMENT),
        }
    }

    fn matches_query(&self, user: &user::Model) -> bool {
        let query = self.query.trim();
        if query.is_empty() {
            return true;
        }
        user.email.contains(query) || user.full_name.contains(query)
    }
}

/// User service for business logic.
#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    grace_period_days: i64,
}

impl UserService {
    /// Create a new user service.
    #[must_use]
    pub const fn new(user_repo: UserRepository, grace_period_days: i64) -> Self {
        Self {
            user_repo,
            grace_period_days,
        }
    }

    /// Resolve a bearer token to an active user.
    pub async fn authenticate(&self, token: &str) -> AppResult<user::Model> {
        let user = self
            .user_repo
            .find_by_token(token)
            .await?
            .ok_or(AppError::Unauthorized)?;
        if !user.is_active() {
            return Err(AppError::Unauthorized);
        }
        Ok(user)
    }

    /// Get a user by ID.
    pub async fn get(&self, user_id: &str) -> AppResult<user::Model> {
        self.user_repo.get_by_id(user_id).await
    }

    /// List active users matching the given filter, newest first.
    pub async fn list(&self, filter: &UserFilter) -> AppResult<Vec<user::Model>> {
        let users = self.user_repo.find_all_active().await?;
        Ok(users.into_iter().filter(|u| filter.matches(u)).collect())
    }

    /// Replace a user's role list. Unknown role identifiers are rejected.
    pub async fn update_roles(
        &self,
        user_id: &str,
        roles: Vec<String>,
    ) -> AppResult<user::Model> {
        for role in &roles {
            if Role::parse(role).is_none() {
                return Err(AppError::Validation(format!("Unknown role: {role}")));
            }
        }

        let user = self.user_repo.get_by_id(user_id).await?;
        if !user.is_active() {
            return Err(AppError::Conflict("User has been deleted".to_string()));
        }

        let mut active = user.into_active_model();
        active.roles = Set(serde_json::json!(roles));
        active.updated_at = Set(Some(Utc::now().into()));
        self.user_repo.update(active).await
    }

    /// Schedule a user for deletion after the grace period.
    ///
    /// Re-scheduling overwrites the previous date. The user stays fully
    /// functional until the retention jobs pick the date up.
    pub async fn schedule_deletion(&self, user_id: &str) -> AppResult<user::Model> {
        let user = self.user_repo.get_by_id(user_id).await?;
        if !user.is_active() {
            return Err(AppError::Conflict(
                "User has already been deleted".to_string(),
            ));
        }

        let delete_on = Utc::now().date_naive() + Duration::days(self.grace_period_days);

        let mut active = user.into_active_model();
        active.scheduled_to_delete = Set(Some(delete_on));
        active.updated_at = Set(Some(Utc::now().into()));
        self.user_repo.update(active).await
    }

    /// Cancel a pending deletion.
    ///
    /// Only possible while the anonymization job has not run; afterwards
    /// the deletion is irreversible and this returns a conflict.
    pub async fn revert_deletion(&self, user_id: &str) -> AppResult<user::Model> {
        let user = self.user_repo.get_by_id(user_id).await?;
        if !user.is_active() {
            return Err(AppError::Conflict(
                "User has already been deleted".to_string(),
            ));
        }

        let mut active = user.into_active_model();
        active.scheduled_to_delete = Set(None);
        active.updated_at = Set(Some(Utc::now().into()));
        self.user_repo.update(active).await
    }

    /// Toggle whether the user is hidden from visitor listings.
    pub async fn set_stealth_mode(&self, user_id: &str, enabled: bool) -> AppResult<user::Model> {
        let user = self.user_repo.get_by_id(user_id).await?;

        let mut active = user.into_active_model();
        active.stealth_mode = Set(enabled);
        active.updated_at = Set(Some(Utc::now().into()));
        self.user_repo.update(active).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn create_test_user(id: &str, email: &str, name: &str) -> user::Model {
        user::Model {
            id: id.to_string(),
            email: email.to_string(),
            full_name: name.to_string(),
            roles: serde_json::json!(["regular"]),
            department: Some("Engineering".to_string()),
            avatar_url: None,
            stealth_mode: false,
            scheduled_to_delete: None,
            deleted_at: None,
            token: Some("token1".to_string()),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn service_with(results: Vec<Vec<user::Model>>) -> UserService {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results(results)
                .into_connection(),
        );
        UserService::new(UserRepository::new(db), 3)
    }

    #[test]
    fn test_empty_filter_matches_everyone() {
        let filter = UserFilter::default();
        let user = create_test_user("u1", "a@example.com", "Ada");
        assert!(filter.matches(&user));
    }

    #[test]
    fn test_role_filter_intersects() {
        let mut user = create_test_user("u1", "a@example.com", "Ada");
        user.roles = serde_json::json!(["regular", "guest"]);

        let matching = UserFilter {
            roles: vec!["guest".to_string()],
            ..Default::default()
        };
        let missing = UserFilter {
            roles: vec!["admin".to_string()],
            ..Default::default()
        };

        assert!(matching.matches(&user));
        assert!(!missing.matches(&user));
    }

    #[test]
    fn test_department_sentinel_matches_missing_department() {
        let mut user = create_test_user("u1", "a@example.com", "Ada");
        user.department = None;

        let filter = UserFilter {
            departments: vec![NO_DEPARTMENT.to_string()],
            ..Default::default()
        };
        assert!(filter.matches(&user));

        user.department = Some("Sales".to_string());
        assert!(!filter.matches(&user));
    }

    #[test]
    fn test_query_is_trimmed_and_matches_email_or_name() {
        let user = create_test_user("u1", "ada@example.com", "Ada Lovelace");

        let by_email = UserFilter {
            query: "  ada@  ".to_string(),
            ..Default::default()
        };
        let by_name = UserFilter {
            query: "Lovelace".to_string(),
            ..Default::default()
        };
        let no_match = UserFilter {
            query: "babbage".to_string(),
            ..Default::default()
        };

        assert!(by_email.matches(&user));
        assert!(by_name.matches(&user));
        assert!(!no_match.matches(&user));
    }

    #[test]
    fn test_filters_are_an_intersection() {
        let user = create_test_user("u1", "ada@example.com", "Ada Lovelace");

        // Role matches, department does not.
        let filter = UserFilter {
            roles: vec!["regular".to_string()],
            departments: vec!["Sales".to_string()],
            query: String::new(),
        };
        assert!(!filter.matches(&user));

        // All three match.
        let filter = UserFilter {
            roles: vec!["regular".to_string()],
            departments: vec!["Engineering".to_string()],
            query: "ada".to_string(),
        };
        assert!(filter.matches(&user));
    }

    #[tokio::test]
    async fn test_authenticate_rejects_deleted_user() {
        let mut user = create_test_user("u1", "a@example.com", "Ada");
        user.deleted_at = Some(Utc::now().into());

        let service = service_with(vec![vec![user]]);
        let result = service.authenticate("token1").await;

        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_token() {
        let service = service_with(vec![vec![]]);
        let result = service.authenticate("nope").await;

        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_update_roles_rejects_unknown_role() {
        let service = service_with(vec![]);
        let result = service
            .update_roles("u1", vec!["superuser".to_string()])
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_schedule_deletion_sets_grace_period_date() {
        let user = create_test_user("u1", "a@example.com", "Ada");
        let mut scheduled = user.clone();
        scheduled.scheduled_to_delete = Some(Utc::now().date_naive() + Duration::days(3));

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![user], vec![scheduled]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );
        let service = UserService::new(UserRepository::new(db), 3);

        let updated = service.schedule_deletion("u1").await.unwrap();
        assert_eq!(
            updated.scheduled_to_delete,
            Some(Utc::now().date_naive() + Duration::days(3))
        );
    }

    #[tokio::test]
    async fn test_revert_deletion_conflicts_after_job_ran() {
        let mut user = create_test_user("u1", "a@example.com", "Ada");
        user.deleted_at = Some(Utc::now().into());

        let service = service_with(vec![vec![user]]);
        let result = service.revert_deletion("u1").await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }
}
