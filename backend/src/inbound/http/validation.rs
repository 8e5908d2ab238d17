//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request bodies are deserialised loosely (`serde_json::Value` per field) so
//! every failing field can be reported at once. Failures become an
//! `invalid_request` error whose `details.errors` maps each field name to its
//! messages, and whose top-level message is the first failure found.

use serde_json::{Map, Value, json};

use crate::domain::{
    Credentials, Description, Error, Latitude, Longitude, PointDraft, PointId,
    PointValidationError,
};

const GENERIC_MESSAGE: &str = "the given data was invalid";

/// Per-field validation messages, kept in the order fields were checked.
#[derive(Debug, Default)]
pub(crate) struct FieldErrors {
    entries: Vec<(&'static str, Vec<String>)>,
}

impl FieldErrors {
    pub(crate) fn push(&mut self, field: &'static str, message: impl Into<String>) {
        let message = message.into();
        match self.entries.iter_mut().find(|(name, _)| *name == field) {
            Some((_, messages)) => messages.push(message),
            None => self.entries.push((field, vec![message])),
        }
    }

    pub(crate) fn contains(&self, field: &str) -> bool {
        self.entries.iter().any(|(name, _)| *name == field)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn into_error(self) -> Error {
        let message = self
            .entries
            .first()
            .and_then(|(_, messages)| messages.first().cloned())
            .unwrap_or_else(|| GENERIC_MESSAGE.to_owned());
        let errors: Map<String, Value> = self
            .entries
            .into_iter()
            .map(|(field, messages)| (field.to_owned(), json!(messages)))
            .collect();
        Error::invalid_request(message).with_details(json!({ "errors": errors }))
    }
}

/// Shape of a raw JSON field before validation.
enum RawField<'a> {
    Absent,
    Text(&'a str),
    Number(f64),
    Other,
}

fn classify(value: Option<&Value>) -> RawField<'_> {
    match value {
        None | Some(Value::Null) => RawField::Absent,
        // Blank strings count as absent, like an omitted form field.
        Some(Value::String(text)) if text.trim().is_empty() => RawField::Absent,
        Some(Value::String(text)) => RawField::Text(text),
        Some(Value::Number(number)) => number.as_f64().map_or(RawField::Other, RawField::Number),
        Some(_) => RawField::Other,
    }
}

fn text_field<'a>(
    errors: &mut FieldErrors,
    field: &'static str,
    value: Option<&'a Value>,
) -> Option<&'a str> {
    match classify(value) {
        RawField::Absent => None,
        RawField::Text(text) => Some(text),
        RawField::Number(_) | RawField::Other => {
            errors.push(field, format!("{field} must be a string"));
            None
        }
    }
}

/// Validate login or registration fields.
pub(crate) fn parse_credentials(
    email: Option<&Value>,
    password: Option<&Value>,
) -> Result<Credentials, Error> {
    let mut errors = FieldErrors::default();
    let email = text_field(&mut errors, "email", email);
    let password = text_field(&mut errors, "password", password);

    match Credentials::try_from_parts(email, password) {
        Ok(credentials) if errors.is_empty() => Ok(credentials),
        Ok(_) => Err(errors.into_error()),
        Err(invalid) => {
            for violation in invalid.violations() {
                let field = violation.field().as_str();
                // A type error already explains why the field is unusable.
                if !errors.contains(field) {
                    errors.push(field, violation.to_string());
                }
            }
            Err(errors.into_error())
        }
    }
}

fn coordinate<T>(
    errors: &mut FieldErrors,
    field: &'static str,
    value: Option<&Value>,
    build: fn(f64) -> Result<T, PointValidationError>,
) -> Option<T> {
    let degrees = match classify(value) {
        RawField::Absent => {
            errors.push(field, format!("{field} is required"));
            return None;
        }
        RawField::Number(number) => number,
        RawField::Text(text) => match text.trim().parse::<f64>() {
            Ok(number) => number,
            Err(_) => {
                errors.push(field, format!("{field} must be a number"));
                return None;
            }
        },
        RawField::Other => {
            errors.push(field, format!("{field} must be a number"));
            return None;
        }
    };
    match build(degrees) {
        Ok(valid) => Some(valid),
        Err(err) => {
            errors.push(field, err.to_string());
            None
        }
    }
}

fn description(errors: &mut FieldErrors, value: Option<&Value>) -> Option<Description> {
    match value {
        None | Some(Value::Null) => Some(Description::default()),
        Some(Value::String(text)) => match Description::new(text.trim()) {
            Ok(valid) => Some(valid),
            Err(err) => {
                errors.push("description", err.to_string());
                None
            }
        },
        Some(_) => {
            errors.push("description", "description must be a string");
            None
        }
    }
}

/// Validate point coordinates and description.
///
/// Coordinates accept JSON numbers or numeric strings such as `"12.5"`.
/// Descriptions are trimmed; a missing or `null` one is stored as an empty
/// string.
pub(crate) fn parse_point_draft(
    longitude: Option<&Value>,
    latitude: Option<&Value>,
    description_value: Option<&Value>,
) -> Result<PointDraft, Error> {
    let mut errors = FieldErrors::default();
    let longitude = coordinate(&mut errors, "longitude", longitude, Longitude::new);
    let latitude = coordinate(&mut errors, "latitude", latitude, Latitude::new);
    let description = description(&mut errors, description_value);

    match (longitude, latitude, description) {
        (Some(longitude), Some(latitude), Some(description)) if errors.is_empty() => {
            Ok(PointDraft {
                longitude,
                latitude,
                description,
            })
        }
        _ => Err(errors.into_error()),
    }
}

/// Parse a `{id}` path segment. Anything but a positive integer names no
/// point, so it is reported as missing.
pub(crate) fn parse_point_id(raw: &str) -> Result<PointId, Error> {
    raw.parse()
        .map_err(|_| Error::not_found(crate::domain::point_service::NOT_FOUND_MESSAGE))
}
