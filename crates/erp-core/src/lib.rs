//! # erp-core
//!
//! Core crate for the AM Group ERP access layer. Contains configuration
//! schemas, the clock trait, domain events with their in-process bus,
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other ERP crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
