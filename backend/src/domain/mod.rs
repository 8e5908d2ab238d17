//! Domain primitives, aggregates, ports and services.
//!
//! Purpose: Define strongly typed entities used by the API and persistence
//! layers, plus the services that enforce account and point ownership rules.
//! Inbound adapters talk to the driving ports in [`ports`]; outbound adapters
//! implement the driven ones.
//!
//! Public surface:
//! - Error / ErrorCode — API error payload and its stable identifier.
//! - User / Email / UserId — registered accounts.
//! - Point / PointDraft / PointId — user-owned map markers.
//! - Credentials — validated login and registration input.
//! - UserAccountService / PointService — driving port implementations.

pub mod auth;
pub mod error;
pub mod point;
pub mod point_service;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_account_service;

pub use self::auth::{
    CredentialField, CredentialViolation, Credentials, CredentialsValidationError, PASSWORD_MIN,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::point::{
    DESCRIPTION_MAX, Description, Latitude, Longitude, Point, PointDraft, PointId, PointParts,
    PointValidationError,
};
pub use self::point_service::PointService;
pub use self::trace_id::TraceId;
pub use self::user::{EMAIL_MAX, Email, NewUser, PasswordHash, User, UserId, UserValidationError};
pub use self::user_account_service::{LoginMode, UserAccountService};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use geonotes::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
