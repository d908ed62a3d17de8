//! Data retention service.
//!
//! Implements the two nightly sweeps over users whose scheduled deletion
//! date has arrived: purging their form submissions, then anonymizing
//! the user record itself. Both sweeps isolate failures per user so one
//! bad row never blocks the rest of the batch.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use hub_common::{AppError, AppResult};
use hub_db::{
    entities::user,
    repositories::{FormSubmissionRepository, UserRepository, UserTagRepository},
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, IntoActiveModel, Set, TransactionTrait};
use serde::Serialize;

/// Counts reported after one sweep run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SweepOutcome {
    /// Users whose scheduled date matched today.
    pub selected: usize,
    /// Users handled successfully.
    pub processed: usize,
    /// Users skipped because of an error.
    pub failed: usize,
}

/// Retention service running the scheduled deletion sweeps.
#[derive(Clone)]
pub struct RetentionService {
    db: Arc<DatabaseConnection>,
    user_repo: UserRepository,
    form_submission_repo: FormSubmissionRepository,
    user_tag_repo: UserTagRepository,
}

impl RetentionService {
    /// Create a new retention service.
    #[must_use]
    pub const fn new(
        db: Arc<DatabaseConnection>,
        user_repo: UserRepository,
        form_submission_repo: FormSubmissionRepository,
        user_tag_repo: UserTagRepository,
    ) -> Self {
        Self {
            db,
            user_repo,
            form_submission_repo,
            user_tag_repo,
        }
    }

    /// Delete the form submissions of every user scheduled for today.
    pub async fn purge_form_submissions(&self, today: NaiveDate) -> AppResult<SweepOutcome> {
        let users = self.user_repo.find_scheduled_for_deletion(today).await?;
        let mut outcome = SweepOutcome {
            selected: users.len(),
            ..Default::default()
        };

        if users.is_empty() {
            tracing::info!(date = %today, "No users scheduled for form data purge");
            return Ok(outcome);
        }

        for user in users {
            match self.form_submission_repo.delete_by_user(&user.id).await {
                Ok(removed) => {
                    tracing::info!(user_id = %user.id, removed, "Purged form submissions");
                    outcome.processed += 1;
                }
                Err(e) => {
                    tracing::error!(user_id = %user.id, error = %e, "Form data purge failed for user");
                    outcome.failed += 1;
                }
            }
        }

        Ok(outcome)
    }

    /// Anonymize every user scheduled for today and drop their tags.
    ///
    /// Each user is one transaction: the record scrub and the tag removal
    /// land together or not at all.
    pub async fn anonymize_departed_users(&self, today: NaiveDate) -> AppResult<SweepOutcome> {
        let users = self.user_repo.find_scheduled_for_deletion(today).await?;
        let mut outcome = SweepOutcome {
            selected: users.len(),
            ..Default::default()
        };

        if users.is_empty() {
            tracing::info!(date = %today, "No users scheduled for anonymization");
            return Ok(outcome);
        }

        for user in users {
            let user_id = user.id.clone();
            match self.anonymize_user(user).await {
                Ok(()) => {
                    tracing::info!(user_id = %user_id, "Anonymized user");
                    outcome.processed += 1;
                }
                Err(e) => {
                    tracing::error!(user_id = %user_id, error = %e, "Anonymization failed for user");
                    outcome.failed += 1;
                }
            }
        }

        Ok(outcome)
    }

    async fn anonymize_user(&self, user: user::Model) -> AppResult<()> {
        let user_id = user.id.clone();
        let tx = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Self::anonymized(user)
            .update(&tx)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        self.user_tag_repo.delete_by_user_tx(&tx, &user_id).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// The scrubbed record that replaces a departed user.
    fn anonymized(user: user::Model) -> user::ActiveModel {
        let user_id = user.id.clone();
        let mut active = user.into_active_model();
        active.full_name = Set("Deleted user".to_string());
        active.email = Set(format!("deleted_{user_id}@hub.invalid"));
        active.roles = Set(serde_json::json!([]));
        active.department = Set(None);
        active.avatar_url = Set(None);
        active.token = Set(None);
        active.stealth_mode = Set(true);
        active.deleted_at = Set(Some(Utc::now().into()));
        active.updated_at = Set(Some(Utc::now().into()));
        active
    }
}
