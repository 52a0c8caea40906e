//! HTTP mapping for domain errors.
//!
//! The domain `Error` stays transport-agnostic; this adapter alone decides
//! the status code and strips internal messages before they reach clients.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

pub(crate) fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Replace internal errors with a generic payload, keeping the trace id.
pub(crate) fn client_payload(error: &Error) -> Error {
    match error.code() {
        ErrorCode::InternalError => {
            let redacted = Error::internal("Internal server error");
            match error.trace_id() {
                Some(id) => redacted.with_trace_id(id),
                None => redacted,
            }
        }
        ErrorCode::ServiceUnavailable => {
            let redacted = Error::service_unavailable("Service temporarily unavailable");
            match error.trace_id() {
                Some(id) => redacted.with_trace_id(id),
                None => redacted,
            }
        }
        _ => error.clone(),
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        match self.code() {
            ErrorCode::InternalError => {
                error!(trace_id = ?self.trace_id(), message = self.message(), "request failed");
            }
            ErrorCode::ServiceUnavailable => {
                warn!(trace_id = ?self.trace_id(), message = self.message(), "store unavailable");
            }
            _ => {}
        }

        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(client_payload(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}
