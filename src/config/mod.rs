//! Application configuration

mod app_config;

pub use app_config::{AppConfig, AssignmentConfig, ExperimentConfig, LogFormat, LoggingConfig};
