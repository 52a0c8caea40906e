//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every failure is an `InvalidRequest` whose details name the offending
//! field and carry a machine-readable `code`.

use std::str::FromStr;

use serde_json::json;
use uuid::Uuid;

use crate::domain::Error;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUuid,
    InvalidEnum,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidEnum => "invalid_enum",
        }
    }
}

/// Wire name of a request field, as clients spell it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, message: String, code: ErrorCode, value: Option<&str>) -> Error {
    let mut details = json!({
        "field": field.as_str(),
        "code": code.as_str(),
    });
    if let (Some(value), Some(map)) = (value, details.as_object_mut()) {
        map.insert("value".to_owned(), json!(value));
    }
    Error::invalid_request(message).with_details(details)
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    field_error(
        field,
        format!("missing required field: {}", field.as_str()),
        ErrorCode::MissingField,
        None,
    )
}

pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| {
        field_error(
            field,
            format!("{} must be a valid UUID", field.as_str()),
            ErrorCode::InvalidUuid,
            Some(value),
        )
    })
}

/// Parse an identifier newtype from its UUID string form.
pub(crate) fn parse_id<T: From<Uuid>>(value: &str, field: FieldName) -> Result<T, Error> {
    parse_uuid(value, field).map(T::from)
}

/// Parse a closed-set enum such as a gender or mount type.
pub(crate) fn parse_enum<T: FromStr>(value: &str, field: FieldName) -> Result<T, Error> {
    value.parse().map_err(|_| {
        field_error(
            field,
            format!("{} has an unsupported value", field.as_str()),
            ErrorCode::InvalidEnum,
            Some(value),
        )
    })
}
