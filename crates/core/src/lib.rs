//! Core business logic for hub-office.

pub mod services;

pub use services::*;
