//! Bridges the scheduler to the retention service.

use chrono::Utc;
use hub_core::{RetentionService, SweepOutcome};

use crate::scheduler::JobExecutor;

/// Executor running the retention sweeps against the database.
#[derive(Clone)]
pub struct RetentionExecutor {
    retention: RetentionService,
}

impl RetentionExecutor {
    /// Create a new retention executor.
    #[must_use]
    pub const fn new(retention: RetentionService) -> Self {
        Self { retention }
    }
}

#[async_trait::async_trait]
impl JobExecutor for RetentionExecutor {
    async fn purge_forms_data(
        &self,
    ) -> Result<SweepOutcome, Box<dyn std::error::Error + Send + Sync>> {
        tracing::info!("Start forms data deletion");
        let outcome = self
            .retention
            .purge_form_submissions(Utc::now().date_naive())
            .await?;
        Ok(outcome)
    }

    async fn anonymize_users(
        &self,
    ) -> Result<SweepOutcome, Box<dyn std::error::Error + Send + Sync>> {
        tracing::info!("Start departed users anonymization");
        let outcome = self
            .retention
            .anonymize_departed_users(Utc::now().date_naive())
            .await?;
        Ok(outcome)
    }
}
