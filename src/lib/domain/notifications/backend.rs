//! Notification backend

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

use super::{BackendError, EmailRequest};

/// A delivery mechanism for emails
#[async_trait]
pub trait Backend: Clone + Send + Sync + 'static {
    /// Send an email
    ///
    /// # Arguments
    /// * `request` - The [`EmailRequest`] describing the email.
    ///
    /// # Returns
    /// - [`Ok`] once the backend has accepted the email.
    /// - [`Err`] containing a [`BackendError`] for any delivery failure.
    async fn send(&self, request: &EmailRequest) -> Result<(), BackendError>;
}

#[cfg(test)]
mock! {
    pub Backend {}

    impl Clone for Backend {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl Backend for Backend {
        async fn send(&self, request: &EmailRequest) -> Result<(), BackendError>;
    }
}
