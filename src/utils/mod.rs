//! Utility functions shared by the CLI and the interactive form.
//!
//! ## Modules
//!
//! - [`app_data`] - Configuration file and application data directory
//! - [`logging`] - `log` records routed through tracing-subscriber
//! - [`progress`] - Load spinner (no-op without the `progress` feature)

pub mod app_data;
pub mod logging;
pub mod progress;

pub use app_data::*;
pub use logging::{LogTarget, init_logging};
