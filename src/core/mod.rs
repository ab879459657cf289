//! Core module: domain records, loading, aggregation and reporting

pub mod config;
pub mod error;
pub mod loader;
pub mod metrics;
pub mod models;
pub mod ranking;
pub mod report;

pub use error::{ErrorKind, SchoolError, ValidationError};
