//! Driving port for account registration.

use async_trait::async_trait;

use crate::domain::{Credentials, Error, User};

/// Domain use-case port for creating accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Create an account for the supplied credentials.
    ///
    /// # Errors
    ///
    /// Returns an `invalid_request` error when the e-mail address is taken.
    async fn register(&self, credentials: &Credentials) -> Result<User, Error>;
}
