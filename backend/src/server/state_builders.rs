//! Wiring of domain services onto the configured repositories.

use std::sync::Arc;

use tracing::warn;

use crate::domain::ports::{PointRepository, UserRepository};
use crate::domain::{LoginMode, PointService, UserAccountService};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::{InMemoryPointRepository, InMemoryUserRepository};
use crate::outbound::password::Argon2PasswordHasher;
use crate::outbound::persistence::{DbPool, DieselPointRepository, DieselUserRepository};

/// Repository handles shared by every worker.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub points: Arc<dyn PointRepository>,
}

impl Repositories {
    /// Diesel repositories over `pool`, or in-memory ones when it is absent.
    pub fn from_pool(pool: Option<&DbPool>) -> Self {
        match pool {
            Some(pool) => Self {
                users: Arc::new(DieselUserRepository::new(pool.clone())),
                points: Arc::new(DieselPointRepository::new(pool.clone())),
            },
            None => {
                warn!("no database configured; data is kept in memory and lost on restart");
                Self::in_memory()
            }
        }
    }

    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::default()),
            points: Arc::new(InMemoryPointRepository::default()),
        }
    }
}

/// Build handler state from repositories.
pub fn build_http_state(repositories: Repositories, login_mode: LoginMode) -> HttpState {
    let Repositories { users, points } = repositories;
    let accounts = Arc::new(
        UserAccountService::new(users, Arc::new(Argon2PasswordHasher)).with_login_mode(login_mode),
    );
    let points = Arc::new(PointService::new(points));

    HttpState::new(HttpStatePorts {
        login: accounts.clone(),
        registration: accounts.clone(),
        current_user: accounts,
        points_query: points.clone(),
        points_command: points,
    })
}
