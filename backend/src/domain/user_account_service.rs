//! Account domain service.
//!
//! Implements login, registration and current-user lookups on top of the
//! [`UserRepository`] and [`PasswordHasher`] driven ports.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    CurrentUserQuery, LoginService, PasswordHasher, PasswordHasherError, RegistrationService,
    UserPersistenceError, UserRepository,
};
use crate::domain::{Credentials, Error, NewUser, User, UserId};

pub(crate) const UNKNOWN_EMAIL_MESSAGE: &str = "user with this email was not found";
pub(crate) const PASSWORD_MISMATCH_MESSAGE: &str = "password does not match";
pub(crate) const DUPLICATE_EMAIL_MESSAGE: &str = "user with this email is already registered";

/// How [`LoginService::authenticate`] treats unknown addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginMode {
    /// Unknown addresses and wrong passwords are validation failures.
    #[default]
    Strict,
    /// Unknown addresses are registered on the spot; wrong passwords are
    /// rejected as forbidden.
    RegisterOnFirstLogin,
}

/// Account service implementing the user-facing driving ports.
///
/// Repository and hasher may be trait objects, which lets the server pick an
/// adapter at start-up.
pub struct UserAccountService<R: ?Sized, H: ?Sized> {
    users: Arc<R>,
    hasher: Arc<H>,
    mode: LoginMode,
}

impl<R: ?Sized, H: ?Sized> Clone for UserAccountService<R, H> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            hasher: Arc::clone(&self.hasher),
            mode: self.mode,
        }
    }
}

impl<R: ?Sized, H: ?Sized> UserAccountService<R, H> {
    /// Create a service in [`LoginMode::Strict`].
    pub fn new(users: Arc<R>, hasher: Arc<H>) -> Self {
        Self {
            users,
            hasher,
            mode: LoginMode::Strict,
        }
    }

    /// Select how unknown addresses are handled at login.
    #[must_use]
    pub fn with_login_mode(mut self, mode: LoginMode) -> Self {
        self.mode = mode;
        self
    }

    /// Configured login mode.
    pub fn login_mode(&self) -> LoginMode {
        self.mode
    }
}

fn field_error(field: &str, message: &str) -> Error {
    Error::invalid_request(message).with_details(json!({ "errors": { field: [message] } }))
}

fn duplicate_email() -> Error {
    field_error("email", DUPLICATE_EMAIL_MESSAGE)
}

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { .. } => duplicate_email(),
    }
}

fn map_hasher_error(error: PasswordHasherError) -> Error {
    Error::internal(error.to_string())
}

impl<R, H> UserAccountService<R, H>
where
    R: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
{
    async fn create_account(&self, credentials: &Credentials) -> Result<User, Error> {
        let password_hash = self
            .hasher
            .hash(credentials.password())
            .await
            .map_err(map_hasher_error)?;
        let new_user = NewUser {
            email: credentials.email().clone(),
            password_hash,
        };
        let user = self.users.create(&new_user).await.map_err(map_user_error)?;
        info!(user_id = %user.id(), "registered new account");
        Ok(user)
    }

    fn rejected_password(&self) -> Error {
        match self.mode {
            LoginMode::Strict => field_error("password", PASSWORD_MISMATCH_MESSAGE),
            LoginMode::RegisterOnFirstLogin => Error::forbidden(PASSWORD_MISMATCH_MESSAGE),
        }
    }
}

#[async_trait]
impl<R, H> LoginService for UserAccountService<R, H>
where
    R: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
{
    async fn authenticate(&self, credentials: &Credentials) -> Result<User, Error> {
        let existing = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_error)?;

        let Some(user) = existing else {
            return match self.mode {
                LoginMode::Strict => Err(field_error("email", UNKNOWN_EMAIL_MESSAGE)),
                LoginMode::RegisterOnFirstLogin => self.create_account(credentials).await,
            };
        };

        let matches = self
            .hasher
            .verify(credentials.password(), user.password_hash())
            .await
            .map_err(map_hasher_error)?;
        if matches {
            Ok(user)
        } else {
            Err(self.rejected_password())
        }
    }
}

#[async_trait]
impl<R, H> RegistrationService for UserAccountService<R, H>
where
    R: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
{
    async fn register(&self, credentials: &Credentials) -> Result<User, Error> {
        let existing = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_error)?;
        if existing.is_some() {
            return Err(duplicate_email());
        }
        self.create_account(credentials).await
    }
}

#[async_trait]
impl<R, H> CurrentUserQuery for UserAccountService<R, H>
where
    R: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
{
    async fn current_user(&self, id: UserId) -> Result<Option<User>, Error> {
        self.users.find_by_id(id).await.map_err(map_user_error)
    }
}

#[cfg(test)]
#[path = "user_account_service_tests.rs"]
mod tests;
