//! Point (map marker) data model.
//!
//! A point is a user-owned geographic coordinate with a free-text
//! description. Only its owner may change or remove it.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use super::UserId;

/// Maximum description length, in characters.
pub const DESCRIPTION_MAX: usize = 1024;
/// Absolute bound for longitudes, in degrees.
pub const LONGITUDE_LIMIT: f64 = 180.0;
/// Absolute bound for latitudes, in degrees.
pub const LATITUDE_LIMIT: f64 = 90.0;

/// Validation errors returned by the point primitives.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PointValidationError {
    /// Identifiers are positive integers.
    #[error("point id must be a positive integer")]
    InvalidId,
    /// NaN and infinities are not coordinates.
    #[error("{axis} must be a finite number")]
    NonFinite { axis: &'static str },
    /// Coordinate outside the valid range.
    #[error("{axis} must be between -{limit} and {limit}")]
    OutOfRange { axis: &'static str, limit: f64 },
    /// Description longer than [`DESCRIPTION_MAX`].
    #[error("description must be at most {max} characters")]
    DescriptionTooLong { max: usize },
}

/// Stable point identifier assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointId(i64);

impl PointId {
    /// Validate and construct a [`PointId`].
    pub fn new(id: i64) -> Result<Self, PointValidationError> {
        if id <= 0 {
            return Err(PointValidationError::InvalidId);
        }
        Ok(Self(id))
    }

    /// Raw integer value as stored in the database.
    pub fn value(self) -> i64 {
        self.0
    }
}

impl FromStr for PointId {
    type Err = PointValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: i64 = s.parse().map_err(|_| PointValidationError::InvalidId)?;
        Self::new(raw)
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn check_axis(value: f64, axis: &'static str, limit: f64) -> Result<f64, PointValidationError> {
    if !value.is_finite() {
        return Err(PointValidationError::NonFinite { axis });
    }
    if value < -limit || value > limit {
        return Err(PointValidationError::OutOfRange { axis, limit });
    }
    Ok(value)
}

/// East-west coordinate in degrees, within `[-180, 180]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Longitude(f64);

impl Longitude {
    /// Validate a longitude.
    ///
    /// Map clients panned across the antimeridian report values beyond
    /// ±180; those are wrapped back onto the same meridian.
    ///
    /// # Examples
    /// ```
    /// use geonotes::domain::Longitude;
    ///
    /// assert_eq!(Longitude::new(190.0).map(Longitude::degrees), Ok(-170.0));
    /// assert_eq!(Longitude::new(-180.0).map(Longitude::degrees), Ok(-180.0));
    /// ```
    pub fn new(value: f64) -> Result<Self, PointValidationError> {
        if !value.is_finite() {
            return Err(PointValidationError::NonFinite { axis: "longitude" });
        }
        if (-LONGITUDE_LIMIT..=LONGITUDE_LIMIT).contains(&value) {
            return Ok(Self(value));
        }
        let span = 2.0 * LONGITUDE_LIMIT;
        Ok(Self((value + LONGITUDE_LIMIT).rem_euclid(span) - LONGITUDE_LIMIT))
    }

    /// Degrees as `f64`.
    pub fn degrees(self) -> f64 {
        self.0
    }
}

/// North-south coordinate in degrees, within `[-90, 90]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Latitude(f64);

impl Latitude {
    /// Validate a latitude.
    pub fn new(value: f64) -> Result<Self, PointValidationError> {
        check_axis(value, "latitude", LATITUDE_LIMIT).map(Self)
    }

    /// Degrees as `f64`.
    pub fn degrees(self) -> f64 {
        self.0
    }
}

/// Free-text marker description; absent descriptions are empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Description(String);

impl Description {
    /// Validate a description.
    pub fn new(value: impl Into<String>) -> Result<Self, PointValidationError> {
        let value = value.into();
        if value.chars().count() > DESCRIPTION_MAX {
            return Err(PointValidationError::DescriptionTooLong {
                max: DESCRIPTION_MAX,
            });
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for Description {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Validated payload for creating or updating a point.
#[derive(Debug, Clone, PartialEq)]
pub struct PointDraft {
    pub longitude: Longitude,
    pub latitude: Latitude,
    pub description: Description,
}

/// Persisted map marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    id: PointId,
    owner_id: UserId,
    longitude: Longitude,
    latitude: Latitude,
    description: Description,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Persisted components of a [`Point`].
#[derive(Debug, Clone)]
pub struct PointParts {
    pub id: PointId,
    pub owner_id: UserId,
    pub draft: PointDraft,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Point {
    /// Build a point from persisted components.
    pub fn new(parts: PointParts) -> Self {
        let PointParts {
            id,
            owner_id,
            draft,
            created_at,
            updated_at,
        } = parts;
        Self {
            id,
            owner_id,
            longitude: draft.longitude,
            latitude: draft.latitude,
            description: draft.description,
            created_at,
            updated_at,
        }
    }

    /// Stable point identifier.
    pub fn id(&self) -> PointId {
        self.id
    }

    /// Identifier of the user allowed to mutate this point.
    pub fn owner_id(&self) -> UserId {
        self.owner_id
    }

    /// Whether `user` owns this point.
    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.owner_id == user
    }

    /// Longitude in degrees.
    pub fn longitude(&self) -> Longitude {
        self.longitude
    }

    /// Latitude in degrees.
    pub fn latitude(&self) -> Latitude {
        self.latitude
    }

    /// Marker description.
    pub fn description(&self) -> &Description {
        &self.description
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last modification timestamp.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1", Ok(1))]
    #[case("42", Ok(42))]
    #[case("0", Err(PointValidationError::InvalidId))]
    #[case("-3", Err(PointValidationError::InvalidId))]
    #[case("abc", Err(PointValidationError::InvalidId))]
    #[case("", Err(PointValidationError::InvalidId))]
    fn point_id_parses_positive_integers(
        #[case] raw: &str,
        #[case] expected: Result<i64, PointValidationError>,
    ) {
        assert_eq!(raw.parse::<PointId>().map(PointId::value), expected);
    }

    #[rstest]
    #[case(-180.0)]
    #[case(0.0)]
    #[case(37.617_635)]
    #[case(180.0)]
    fn longitude_accepts_range(#[case] value: f64) {
        assert_eq!(Longitude::new(value).map(Longitude::degrees), Ok(value));
    }

    #[rstest]
    #[case(180.5, -179.5)]
    #[case(190.0, -170.0)]
    #[case(-190.0, 170.0)]
    #[case(360.0, 0.0)]
    #[case(540.0, -180.0)]
    #[case(-725.0, -5.0)]
    fn longitude_wraps_across_the_antimeridian(#[case] value: f64, #[case] expected: f64) {
        assert_eq!(Longitude::new(value).map(Longitude::degrees), Ok(expected));
    }

    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[case(f64::NEG_INFINITY)]
    fn longitude_rejects_non_finite_values(#[case] value: f64) {
        assert_eq!(
            Longitude::new(value),
            Err(PointValidationError::NonFinite { axis: "longitude" })
        );
    }

    #[rstest]
    #[case(-90.5)]
    #[case(91.0)]
    fn latitude_rejects_out_of_range(#[case] value: f64) {
        assert!(matches!(
            Latitude::new(value),
            Err(PointValidationError::OutOfRange { axis: "latitude", .. })
        ));
    }

    #[rstest]
    fn description_allows_limit_and_rejects_longer() {
        let at_limit = "ж".repeat(DESCRIPTION_MAX);
        assert!(Description::new(at_limit).is_ok());

        let too_long = "x".repeat(DESCRIPTION_MAX + 1);
        assert_eq!(
            Description::new(too_long),
            Err(PointValidationError::DescriptionTooLong {
                max: DESCRIPTION_MAX
            })
        );
    }

    #[rstest]
    fn ownership_is_by_user_id() {
        let owner = UserId::new(1).expect("id");
        let other = UserId::new(2).expect("id");
        let now = Utc::now();
        let point = Point::new(PointParts {
            id: PointId::new(9).expect("id"),
            owner_id: owner,
            draft: PointDraft {
                longitude: Longitude::new(10.0).expect("lon"),
                latitude: Latitude::new(20.0).expect("lat"),
                description: Description::default(),
            },
            created_at: now,
            updated_at: now,
        });

        assert!(point.is_owned_by(owner));
        assert!(!point.is_owned_by(other));
    }
}
