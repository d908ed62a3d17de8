//! Common utilities and shared types for hub-office.
//!
//! This crate provides foundational components used across all hub-office crates:
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//! - **ID Generation**: ULID-based unique identifiers via [`IdGenerator`]
//! - **Permissions**: Role-based access model via [`Permission`] and [`Role`]
//!
//! # Example
//!
//! ```no_run
//! use hub_common::{Config, IdGenerator, AppResult};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     let id_gen = IdGenerator::new();
//!     println!("Generated ID: {}", id_gen.generate());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod id;
pub mod permissions;

pub use config::{Config, RetentionConfig};
pub use error::{AppError, AppResult};
pub use id::IdGenerator;
pub use permissions::{Permission, Role, permissions_for_roles};
