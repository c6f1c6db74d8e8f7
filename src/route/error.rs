// ABOUTME: Error types for route handling and their HTTP response mapping
// ABOUTME: Template failures surface as 500s, handler-signalled misses as 404s

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use crate::template::TemplateError;

#[derive(Error, Debug)]
pub enum RouteError {
    #[error("Invalid route path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Route '{path}' conflicts with '{existing}'")]
    Conflict { path: String, existing: String },

    #[error("{0} not found")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Handler error: {0}")]
    Handler(#[from] anyhow::Error),
}

impl RouteError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::InvalidPath { .. }
            | Self::Conflict { .. }
            | Self::Template(_)
            | Self::Handler(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidPath { .. } => "INVALID_ROUTE",
            Self::Conflict { .. } => "ROUTE_CONFLICT",
            Self::NotFound(_) => "NOT_FOUND",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Template(TemplateError::NotFound { .. }) => "TEMPLATE_NOT_FOUND",
            Self::Template(_) => "TEMPLATE_ERROR",
            Self::Handler(_) => "HANDLER_ERROR",
        }
    }

    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        if self.is_server_error() {
            error!(error = %self, code, "Route failed");
        } else {
            warn!(error = %self, code, "Route rejected request");
        }

        // Don't expose template internals in release builds
        let message = if self.is_server_error() && !cfg!(debug_assertions) {
            status
                .canonical_reason()
                .unwrap_or("Internal Server Error")
                .to_string()
        } else {
            self.to_string()
        };

        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            message,
        )
            .into_response()
    }
}

pub type Result<T> = std::result::Result<T, RouteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            RouteError::NotFound("Person".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            RouteError::BadRequest("id".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RouteError::from(TemplateError::not_found("x.hbs")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            RouteError::from(anyhow::anyhow!("boom")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            RouteError::from(TemplateError::not_found("x.hbs")).error_code(),
            "TEMPLATE_NOT_FOUND"
        );
        assert_eq!(
            RouteError::from(TemplateError::ContextError("bad".to_string())).error_code(),
            "TEMPLATE_ERROR"
        );
    }

    #[test]
    fn test_into_response_status() {
        let response = RouteError::NotFound("Person".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
    }
}
