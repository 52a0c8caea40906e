//! OpenAPI schema definitions for the domain error payload.
//!
//! `Error` serialises through a private DTO, so its schema is declared here
//! rather than derived on the domain type.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or breaks a domain rule.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// No requester in the session.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The resource belongs to another user.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The referenced resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The resource already exists.
    #[schema(rename = "conflict")]
    Conflict,
    /// The store could not be reached.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected server failure.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "forbidden")]
    code: ErrorCodeSchema,
    /// Human-readable message.
    #[schema(example = "mount belongs to another user")]
    message: String,
    /// Correlation identifier, also sent as the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Structured context such as `reason`, `role`, `entity` or `key`.
    details: Option<serde_json::Value>,
}
