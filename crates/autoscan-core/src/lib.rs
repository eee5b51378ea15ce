//! Shared domain types and configuration for the autoscan workspace.

pub mod acquisition;
pub mod alert;
pub mod app_config;
pub mod config;
pub mod error;
pub mod filter;
pub mod text;
pub mod vehicle;

mod lenient;

pub use acquisition::{AcquisitionResult, Locator};
pub use alert::{Alert, AlertLevel};
pub use app_config::{AppConfig, Environment};
pub use config::{
    load_app_config, load_app_config_from_env, DEFAULT_EXTRACT_MODEL, DEFAULT_USER_AGENT,
};
pub use error::{ConfigError, FilterError};
pub use filter::Filter;
pub use text::truncate_chars;
pub use vehicle::{DedupKey, VehicleRecord, MANUAL_PLATFORM};
