//! Request and response payloads for the account and point endpoints.
//!
//! Entity responses use snake_case keys, which is the wire format the map
//! client reads. Request fields are kept as raw JSON values so validation can
//! report type errors per field instead of failing the whole body.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::{Point, User};

pub(crate) fn format_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Request payload for `POST /api/login` and `POST /api/register`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct CredentialsRequest {
    #[serde(default)]
    #[schema(value_type = String, example = "ada@example.com")]
    pub email: Option<Value>,
    #[serde(default)]
    #[schema(value_type = String, format = Password, example = "secret1")]
    pub password: Option<Value>,
}

/// Request payload for creating or updating a point.
///
/// Coordinates may be sent as numbers or numeric strings.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct PointRequest {
    #[serde(default)]
    #[schema(value_type = f64, example = 37.6173)]
    pub longitude: Option<Value>,
    #[serde(default)]
    #[schema(value_type = f64, example = 55.7558)]
    pub latitude: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Option<String>, max_length = 1024, example = "Red Square")]
    pub description: Option<Value>,
}

/// Public view of an account. The password hash is never serialised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id().value(),
            email: user.email().to_string(),
            created_at: format_timestamp(user.created_at()),
            updated_at: format_timestamp(user.updated_at()),
        }
    }
}

/// A map point as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PointResponse {
    pub id: i64,
    pub owner_id: i64,
    pub longitude: f64,
    pub latitude: f64,
    pub description: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Point> for PointResponse {
    fn from(point: Point) -> Self {
        Self {
            id: point.id().value(),
            owner_id: point.owner_id().value(),
            longitude: point.longitude().degrees(),
            latitude: point.latitude().degrees(),
            description: point.description().as_ref().to_owned(),
            created_at: format_timestamp(point.created_at()),
            updated_at: format_timestamp(point.updated_at()),
        }
    }
}
