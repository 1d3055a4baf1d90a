//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every client-side failure becomes `400 invalid_request` with
//! `details: {field, code}` (plus `value` where echoing it helps).

use std::fmt;

use actix_web::web;
use chrono::{DateTime, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::domain::{
    Error, LoginValidationError, RecordValidationError, ServiceValidationError,
    UserValidationError,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    EmptyField,
    TooLong,
    InvalidUuid,
    InvalidTimestamp,
    InvalidEmail,
    InvalidUrl,
    InvalidCharacters,
    EmptyUpdate,
    MalformedPayload,
}

impl ErrorCode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::EmptyField => "empty_field",
            Self::TooLong => "too_long",
            Self::InvalidUuid => "invalid_uuid",
            Self::InvalidTimestamp => "invalid_timestamp",
            Self::InvalidEmail => "invalid_email",
            Self::InvalidUrl => "invalid_url",
            Self::InvalidCharacters => "invalid_characters",
            Self::EmptyUpdate => "empty_update",
            Self::MalformedPayload => "malformed_payload",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    const fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) fn field_error(field: &str, code: ErrorCode, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code.as_str(),
    }))
}

fn field_value_error(field: &str, code: ErrorCode, message: String, value: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "value": value,
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    field_error(
        field,
        ErrorCode::MissingField,
        format!("missing required field: {field}"),
    )
}

const BODY_FIELD: &str = "body";
const QUERY_FIELD: &str = "query";

fn malformed_payload_error(field: &str, err: &impl fmt::Display) -> Error {
    field_error(
        field,
        ErrorCode::MalformedPayload,
        format!("malformed request {field}: {err}"),
    )
}

/// Body extractor settings reporting decode failures as `invalid_request`.
pub(crate) fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| malformed_payload_error(BODY_FIELD, &err).into())
}

/// Query extractor settings reporting decode failures as `invalid_request`.
pub(crate) fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| malformed_payload_error(QUERY_FIELD, &err).into())
}

/// Unwrap an extracted JSON body.
///
/// Handlers take the body as a `Result` and call this after the access
/// check, so an unauthenticated caller sees 401 even when the body is bad.
pub(crate) fn json_body<T>(payload: Result<web::Json<T>, actix_web::Error>) -> Result<T, Error> {
    payload
        .map(web::Json::into_inner)
        .map_err(|err| extractor_error(BODY_FIELD, &err))
}

/// Query counterpart of [`json_body`].
pub(crate) fn query_params<T>(
    query: Result<web::Query<T>, actix_web::Error>,
) -> Result<T, Error> {
    query
        .map(web::Query::into_inner)
        .map_err(|err| extractor_error(QUERY_FIELD, &err))
}

fn extractor_error(field: &str, err: &actix_web::Error) -> Error {
    err.as_error::<Error>()
        .cloned()
        .unwrap_or_else(|| malformed_payload_error(field, err))
}

/// Require an optional query or body value to be present and non-blank.
pub(crate) fn require_text(value: Option<String>, field: FieldName) -> Result<String, Error> {
    match value {
        Some(raw) if !raw.trim().is_empty() => Ok(raw),
        _ => Err(missing_field_error(field)),
    }
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    let name = field.as_str();
    Uuid::parse_str(value.trim()).map_err(|_| {
        field_value_error(
            name,
            ErrorCode::InvalidUuid,
            format!("{name} must be a valid UUID"),
            value,
        )
    })
}

pub(crate) fn parse_rfc3339_timestamp(
    value: &str,
    field: FieldName,
) -> Result<DateTime<Utc>, Error> {
    let name = field.as_str();
    DateTime::parse_from_rfc3339(value.trim())
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|_| {
            field_value_error(
                name,
                ErrorCode::InvalidTimestamp,
                format!("{name} must be an RFC 3339 timestamp"),
                value,
            )
        })
}

pub(crate) fn map_login_validation_error(err: &LoginValidationError) -> Error {
    let code = match err {
        LoginValidationError::InvalidEmail => ErrorCode::InvalidEmail,
        LoginValidationError::EmptyPassword => ErrorCode::EmptyField,
    };
    field_error(err.field(), code, err.to_string())
}

pub(crate) fn map_user_validation_error(err: &UserValidationError) -> Error {
    let code = match err {
        UserValidationError::InvalidId => ErrorCode::InvalidUuid,
        UserValidationError::EmptyName => ErrorCode::EmptyField,
        UserValidationError::NameTooLong { .. } | UserValidationError::PhoneTooLong { .. } => {
            ErrorCode::TooLong
        }
        UserValidationError::InvalidEmail => ErrorCode::InvalidEmail,
        UserValidationError::PhoneInvalidCharacters | UserValidationError::UnknownRole(_) => {
            ErrorCode::InvalidCharacters
        }
        UserValidationError::EmptyProfileUpdate => ErrorCode::EmptyUpdate,
    };
    field_error(err.field(), code, err.to_string())
}

pub(crate) fn map_record_validation_error(err: &RecordValidationError) -> Error {
    let code = match err {
        RecordValidationError::Empty { .. } => ErrorCode::EmptyField,
        RecordValidationError::TooLong { .. } => ErrorCode::TooLong,
        RecordValidationError::InvalidUrl { .. } => ErrorCode::InvalidUrl,
    };
    field_error(err.field(), code, err.to_string())
}

/// Map `serviceType` validation failures.
pub(crate) fn map_service_type_error(err: &ServiceValidationError) -> Error {
    let code = match err {
        ServiceValidationError::ServiceTypeTooLong { .. } => ErrorCode::TooLong,
        _ => ErrorCode::EmptyField,
    };
    field_error("serviceType", code, err.to_string())
}
