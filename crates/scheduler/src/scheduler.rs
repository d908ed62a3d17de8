//! Daily job scheduling.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use hub_common::RetentionConfig;
use hub_core::SweepOutcome;
use tokio::time::sleep;

/// Scheduler configuration.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Hour of day (UTC) for the forms data purge (default: 0).
    pub purge_hour: u32,
    /// Hour of day (UTC) for the user anonymization (default: 1).
    pub anonymize_hour: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            purge_hour: 0,
            anonymize_hour: 1,
        }
    }
}

impl From<&RetentionConfig> for SchedulerConfig {
    fn from(retention: &RetentionConfig) -> Self {
        Self {
            purge_hour: retention.purge_hour,
            anonymize_hour: retention.anonymize_hour,
        }
    }
}

/// Job executor trait for the scheduled sweeps.
#[async_trait::async_trait]
pub trait JobExecutor: Send + Sync {
    /// Delete form submissions of users whose deletion date arrived.
    async fn purge_forms_data(
        &self,
    ) -> Result<SweepOutcome, Box<dyn std::error::Error + Send + Sync>>;

    /// Anonymize users whose deletion date arrived.
    async fn anonymize_users(
        &self,
    ) -> Result<SweepOutcome, Box<dyn std::error::Error + Send + Sync>>;
}

/// Time until the next `hour:00:00` UTC, strictly in the future.
///
/// Fire times already reached today roll over to tomorrow, so a job that
/// finishes within the same second never double-fires.
#[must_use]
pub fn next_fire_delay(now: DateTime<Utc>, hour: u32) -> Duration {
    let hour = hour % 24;
    let Some(today_fire) = now.date_naive().and_hms_opt(hour, 0, 0) else {
        return Duration::from_secs(86_400);
    };

    let fire = if now.naive_utc() < today_fire {
        today_fire
    } else {
        today_fire + chrono::Duration::days(1)
    };

    let secs = (fire - now.naive_utc()).num_seconds().max(1);
    Duration::from_secs(secs.unsigned_abs())
}

/// Run the scheduler with the given configuration and executor.
///
/// Each job gets one task that sleeps until its fire time, runs the job
/// to completion, and only then computes the next fire time. A run that
/// overshoots its window delays the next run instead of racing it.
pub async fn run_scheduler<E: JobExecutor + 'static>(config: SchedulerConfig, executor: Arc<E>) {
    let executor_purge = executor.clone();
    let executor_anonymize = executor;

    let purge_hour = config.purge_hour;
    let anonymize_hour = config.anonymize_hour;

    // Spawn forms data purge task
    tokio::spawn(async move {
        loop {
            let delay = next_fire_delay(Utc::now(), purge_hour);
            tracing::debug!(delay_secs = delay.as_secs(), "Forms data purge sleeping");
            sleep(delay).await;

            match executor_purge.purge_forms_data().await {
                Ok(outcome) => {
                    tracing::info!(
                        selected = outcome.selected,
                        processed = outcome.processed,
                        failed = outcome.failed,
                        "Forms data purge finished"
                    );
                }
                Err(e) => {
                    tracing::error!(error = %e, "Forms data purge failed");
                }
            }
        }
    });

    // Spawn user anonymization task
    tokio::spawn(async move {
        loop {
            let delay = next_fire_delay(Utc::now(), anonymize_hour);
            tracing::debug!(delay_secs = delay.as_secs(), "User anonymization sleeping");
            sleep(delay).await;

            match executor_anonymize.anonymize_users().await {
                Ok(outcome) => {
                    tracing::info!(
                        selected = outcome.selected,
                        processed = outcome.processed,
                        failed = outcome.failed,
                        "User anonymization finished"
                    );
                }
                Err(e) => {
                    tracing::error!(error = %e, "User anonymization failed");
                }
            }
        }
    });
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_scheduler_config_default() {
        let config = SchedulerConfig::default();
        assert_eq!(config.purge_hour, 0);
        assert_eq!(config.anonymize_hour, 1);
    }

    #[test]
    fn test_config_from_retention() {
        let retention = RetentionConfig {
            grace_period_days: 3,
            purge_hour: 4,
            anonymize_hour: 5,
        };
        let config = SchedulerConfig::from(&retention);
        assert_eq!(config.purge_hour, 4);
        assert_eq!(config.anonymize_hour, 5);
    }

    #[test]
    fn test_next_fire_delay_before_fire_hour() {
        let now = Utc.with_ymd_and_hms(2026, 3, 2, 0, 30, 0).unwrap();
        let delay = next_fire_delay(now, 1);
        assert_eq!(delay, Duration::from_secs(30 * 60));
    }

    #[test]
    fn test_next_fire_delay_after_fire_hour_rolls_over() {
        let now = Utc.with_ymd_and_hms(2026, 3, 2, 2, 0, 0).unwrap();
        let delay = next_fire_delay(now, 1);
        assert_eq!(delay, Duration::from_secs(23 * 3600));
    }

    #[test]
    fn test_next_fire_delay_at_fire_instant_is_a_full_day() {
        let now = Utc.with_ymd_and_hms(2026, 3, 2, 1, 0, 0).unwrap();
        let delay = next_fire_delay(now, 1);
        assert_eq!(delay, Duration::from_secs(24 * 3600));
    }

    #[test]
    fn test_next_fire_delay_midnight_job() {
        let now = Utc.with_ymd_and_hms(2026, 3, 2, 23, 59, 0).unwrap();
        let delay = next_fire_delay(now, 0);
        assert_eq!(delay, Duration::from_secs(60));
    }
}
