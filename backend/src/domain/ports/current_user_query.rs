//! Driving port resolving the account behind a session.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Read-side port for the signed-in user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CurrentUserQuery: Send + Sync {
    /// Load the user for `id`, or `None` when the account no longer exists.
    async fn current_user(&self, id: UserId) -> Result<Option<User>, Error>;
}
