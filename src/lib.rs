//! Shared library for `MySchool`
//! Record loading, validation, academic aggregation and report rendering used by the CLI

pub mod core;
pub mod logger;

pub use core::config;

/// Returns the current version of the `MySchool` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
