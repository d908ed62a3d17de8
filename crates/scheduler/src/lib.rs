//! Scheduled data-retention jobs for hub-office.
//!
//! Runs the two nightly sweeps in-process: the forms data purge and the
//! user anonymization. Each job runs in its own sequential task, so one
//! run can never overlap the next.

pub mod executor;
pub mod scheduler;

pub use executor::RetentionExecutor;
pub use scheduler::{JobExecutor, SchedulerConfig, next_fire_delay, run_scheduler};
