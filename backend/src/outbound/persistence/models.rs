//! Internal Diesel row structs.
//!
//! These never leave the persistence layer. Conversions into domain types
//! re-run domain validation, so a corrupt row surfaces as a query error
//! instead of an invalid aggregate.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{
    Description, Email, Latitude, Longitude, PasswordHash, Point, PointDraft, PointId,
    PointParts, PointValidationError, User, UserId,
};

use super::schema::{points, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRow {
    pub(crate) fn into_domain(self) -> Result<User, String> {
        let id = UserId::new(self.id).map_err(|err| format!("users.id {}: {err}", self.id))?;
        let email = Email::new(&self.email).map_err(|err| format!("users.email for {id}: {err}"))?;
        let password_hash = PasswordHash::new(self.password_hash)
            .map_err(|err| format!("users.password_hash for {id}: {err}"))?;
        Ok(User::new(
            id,
            email,
            password_hash,
            self.created_at,
            self.updated_at,
        ))
    }
}

/// Insertable struct for creating user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
}

/// Row struct for reading from the points table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = points)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PointRow {
    pub id: i64,
    pub owner_id: i64,
    pub longitude: f64,
    pub latitude: f64,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PointRow {
    pub(crate) fn into_domain(self) -> Result<Point, String> {
        let id = PointId::new(self.id).map_err(|err| format!("points.id {}: {err}", self.id))?;
        let owner_id =
            UserId::new(self.owner_id).map_err(|err| format!("points.owner_id for {id}: {err}"))?;
        let invalid = |err: PointValidationError| format!("point {id}: {err}");
        let draft = PointDraft {
            longitude: Longitude::new(self.longitude).map_err(invalid)?,
            latitude: Latitude::new(self.latitude).map_err(invalid)?,
            description: Description::new(self.description).map_err(invalid)?,
        };
        Ok(Point::new(PointParts {
            id,
            owner_id,
            draft,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }))
    }
}

/// Insertable struct for creating point records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = points)]
pub(crate) struct NewPointRow<'a> {
    pub owner_id: i64,
    pub longitude: f64,
    pub latitude: f64,
    pub description: &'a str,
}

impl<'a> NewPointRow<'a> {
    pub(crate) fn from_draft(owner: UserId, draft: &'a PointDraft) -> Self {
        Self {
            owner_id: owner.value(),
            longitude: draft.longitude.degrees(),
            latitude: draft.latitude.degrees(),
            description: draft.description.as_ref(),
        }
    }
}

/// Changeset applied when an owner edits a point.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = points)]
pub(crate) struct PointChangeset<'a> {
    pub longitude: f64,
    pub latitude: f64,
    pub description: &'a str,
    pub updated_at: DateTime<Utc>,
}

impl<'a> PointChangeset<'a> {
    pub(crate) fn from_draft(draft: &'a PointDraft, updated_at: DateTime<Utc>) -> Self {
        Self {
            longitude: draft.longitude.degrees(),
            latitude: draft.latitude.degrees(),
            description: draft.description.as_ref(),
            updated_at,
        }
    }
}
