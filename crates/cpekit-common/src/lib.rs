//! cpekit common - Shared utilities: logging and configuration
//!
//! This crate provides the ambient setup used by applications built on
//! `cpekit-core`.

pub mod config;
pub mod logging;

pub use config::{Config, ConfigBuilder, LoggingConfig, OutputConfig};
pub use logging::{init_logging, init_logging_with_config, LogConfig, LogFormat};
