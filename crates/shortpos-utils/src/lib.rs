//! Shared utilities for shortpos
//!
//! Logging setup and environment-driven application configuration used by
//! the command-line front end.

pub mod config;
pub mod logging;

pub use config::AppConfig;
pub use logging::init_tracing;
