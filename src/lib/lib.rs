#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Notification dispatch client
//!
//! Sends an [`EmailRequest`] through a single [`Backend`] held by a
//! [`NotificationClient`]. The default backend triggers a parameterised
//! Jenkins job that relays the email.

pub mod domain;
pub mod infrastructure;

pub use domain::notifications::{
    Backend, BackendError, EmailRequest, NotificationClient, NotificationError, SettingsError,
};
pub use infrastructure::{
    config::{JenkinsArgs, JenkinsSettings},
    jenkins::{JenkinsBackend, JenkinsNotificationClient},
};
