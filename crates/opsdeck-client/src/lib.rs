//! API client for the management service.
//!
//! This crate owns the outbound side of the application: it issues JSON
//! requests against the configured management API, applies the response
//! envelope policy, and reports outcomes through an injected
//! [`opsdeck_bridge::notification::Notifier`] so the display can surface them
//! to the user.

pub mod config;
pub mod envelope;
pub mod request;

pub use crate::config::{ConfigError, load_config, save_config};
pub use crate::envelope::Envelope;
pub use crate::request::{ApiClient, RequestError};
