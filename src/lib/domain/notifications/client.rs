//! Notification client

use super::{Backend, BackendError, EmailRequest};

/// The public entry point for sending notifications.
///
/// Holds one [`Backend`] for its whole lifetime. Callers depend on this type
/// rather than on a concrete transport.
#[derive(Debug, Clone)]
pub struct NotificationClient<B>
where
    B: Backend,
{
    backend: B,
}

impl<B> NotificationClient<B>
where
    B: Backend,
{
    /// Creates a client that sends through `backend`.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Returns the backend this client sends through.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Sends an email using the configured backend.
    ///
    /// Errors from the backend are returned unchanged.
    pub async fn send_email(&self, request: &EmailRequest) -> Result<(), BackendError> {
        self.backend.send(request).await
    }
}
