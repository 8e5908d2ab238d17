//! Cookie session access for the HTTP handlers.
//!
//! The session cookie stores exactly one value, the signed-in user's id.
//! [`UserSession`] hides the Actix session API behind sign-in, sign-out and
//! "who is signed in" operations expressed in domain types.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::ports::CurrentUserQuery;
use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const AUTH_REQUIRED_MESSAGE: &str = "authentication required";

/// Session extractor used by every `/api` handler.
#[derive(Clone)]
pub struct UserSession(Session);

impl UserSession {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Sign `user_id` in under a freshly issued cookie.
    ///
    /// The session is renewed first so an id planted before login never
    /// becomes an authenticated one.
    pub fn sign_in(&self, user_id: UserId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user_id.value())
            .map_err(|error| Error::internal(format!("failed to write session: {error}")))
    }

    /// Forget the signed-in user and expire the cookie.
    pub fn sign_out(&self) {
        self.0.purge();
    }

    /// Signed-in user, or `None` for anonymous requests.
    ///
    /// A stored id that no longer validates is treated as anonymous.
    pub fn signed_in_user(&self) -> Result<Option<UserId>, Error> {
        let stored = self
            .0
            .get::<i64>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(stored.and_then(|raw| {
            UserId::new(raw)
                .inspect_err(|error| warn!(%error, "ignoring invalid user id in session"))
                .ok()
        }))
    }

    /// Signed-in user, or `401 Unauthorized`.
    pub fn require_signed_in(&self) -> Result<UserId, Error> {
        self.signed_in_user()?
            .ok_or_else(|| Error::unauthorized(AUTH_REQUIRED_MESSAGE))
    }

    /// Signed-in user that still exists in `users`, or `401 Unauthorized`.
    ///
    /// A cookie naming a deleted or unknown account is purged.
    pub async fn require_existing_user(
        &self,
        users: &dyn CurrentUserQuery,
    ) -> Result<UserId, Error> {
        let id = self.require_signed_in()?;
        match users.current_user(id).await? {
            Some(user) => Ok(user.id()),
            None => {
                warn!(user_id = %id, "session names an unknown user");
                self.sign_out();
                Err(Error::unauthorized(AUTH_REQUIRED_MESSAGE))
            }
        }
    }
}

impl FromRequest for UserSession {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = Session::from_request(req, payload);
        Box::pin(async move { session.await.map(Self::new) })
    }
}
