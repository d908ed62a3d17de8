//! HTTP API layer for hub-office.
//!
//! This crate provides the REST API consumed by the office client:
//!
//! - **Endpoints**: admin user management, tag taxonomy, hub map
//! - **Extractors**: authentication, permission checks
//! - **Middleware**: bearer-token resolution into request extensions
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
