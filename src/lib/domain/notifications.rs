//! Notifications module.

mod backend;
mod client;
mod email_request;
pub mod errors;

pub use backend::Backend;
pub use client::NotificationClient;
pub use email_request::{EmailRequest, DEFAULT_CONTENT_TYPE};
pub use errors::{BackendError, NotificationError, SettingsError};
