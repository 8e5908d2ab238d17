//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports ([`UserRepository`], [`PointRepository`], [`PasswordHasher`])
//! are implemented by outbound adapters. Driving ports are implemented by the
//! domain services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod current_user_query;
mod login_service;
mod password_hasher;
mod point_repository;
mod points_command;
mod points_query;
mod registration_service;
mod user_repository;

pub use current_user_query::CurrentUserQuery;
#[cfg(test)]
pub use current_user_query::MockCurrentUserQuery;
pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use point_repository::MockPointRepository;
pub use point_repository::{PointRepository, PointRepositoryError};
#[cfg(test)]
pub use points_command::MockPointsCommand;
pub use points_command::{DeletePointRequest, PointsCommand, SavePointRequest};
#[cfg(test)]
pub use points_query::MockPointsQuery;
pub use points_query::PointsQuery;
#[cfg(test)]
pub use registration_service::MockRegistrationService;
pub use registration_service::RegistrationService;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
