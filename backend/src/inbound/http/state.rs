//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CurrentUserQuery, LoginService, PointsCommand, PointsQuery, RegistrationService,
};

/// Parameter object bundling the port implementations used by handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub current_user: Arc<dyn CurrentUserQuery>,
    pub points_query: Arc<dyn PointsQuery>,
    pub points_command: Arc<dyn PointsCommand>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub current_user: Arc<dyn CurrentUserQuery>,
    pub points_query: Arc<dyn PointsQuery>,
    pub points_command: Arc<dyn PointsCommand>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use geonotes::domain::{PointService, UserAccountService};
    /// use geonotes::inbound::http::state::{HttpState, HttpStatePorts};
    /// use geonotes::outbound::memory::{InMemoryPointRepository, InMemoryUserRepository};
    /// use geonotes::outbound::password::Argon2PasswordHasher;
    ///
    /// let accounts = Arc::new(UserAccountService::new(
    ///     Arc::new(InMemoryUserRepository::default()),
    ///     Arc::new(Argon2PasswordHasher::default()),
    /// ));
    /// let points = Arc::new(PointService::new(Arc::new(InMemoryPointRepository::default())));
    /// let state = HttpState::new(HttpStatePorts {
    ///     login: accounts.clone(),
    ///     registration: accounts.clone(),
    ///     current_user: accounts,
    ///     points_query: points.clone(),
    ///     points_command: points,
    /// });
    /// let _login = state.login.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            registration,
            current_user,
            points_query,
            points_command,
        } = ports;
        Self {
            login,
            registration,
            current_user,
            points_query,
            points_command,
        }
    }
}
