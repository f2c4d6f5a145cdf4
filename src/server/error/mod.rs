//! Error types for the travellersmeet server.
//!
//! This module provides the error handling system with specialized error types for the
//! different domains of the API (authentication, configuration, input validation, the chat
//! assistant). All errors implement `IntoResponse` for Axum HTTP responses and use `thiserror`
//! for ergonomic error definitions with automatic `Display` and `Error` trait implementations.

pub mod auth;
pub mod chat;
pub mod config;
pub mod validation;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{
        auth::AuthError, chat::ChatError, config::ConfigError, validation::ValidationError,
    },
};

/// Main error type for the travellersmeet server.
///
/// This enum aggregates all domain-specific error types and external library errors into a
/// single unified error type. It uses `thiserror`'s `#[from]` attribute to enable automatic
/// conversion from underlying error types via the `?` operator. The `IntoResponse` implementation
/// maps errors to appropriate HTTP responses for API consumers.
///
/// # Error Categories
/// - Configuration errors (missing/invalid environment variables)
/// - Authentication errors (session, credentials, OTP, roles)
/// - Validation errors (malformed or missing request input)
/// - Chat assistant errors (LLM not configured or not answering)
/// - External library errors (database, sessions, HTTP client, filesystem, scheduler)
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Authentication or authorization error.
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// Request input failed validation.
    #[error(transparent)]
    ValidationError(#[from] ValidationError),
    /// Chat assistant error.
    #[error(transparent)]
    ChatError(#[from] ChatError),
    /// The requested resource does not exist or is not visible to the requester.
    #[error("{0}")]
    NotFound(String),
    /// Failed to deliver an email through the configured provider.
    #[error("Failed to deliver email: {0}")]
    EmailDeliveryError(String),
    /// Parse error (failed to parse a value from string or other format).
    #[error("Failed to parse value: {0:?}")]
    ParseError(String),
    /// Internal error indicating a bug in travellersmeet's code.
    #[error("Internal error: {0:?}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Session error (session retrieval, storage, serialization).
    #[error(transparent)]
    SessionError(#[from] tower_sessions::session::Error),
    /// Outbound HTTP error (email provider, LLM provider).
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),
    /// Filesystem error while storing uploads.
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    /// JSON (de)serialization error.
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),
    /// Cron scheduler error (job registration, scheduler startup).
    #[error(transparent)]
    SchedulerError(#[from] tokio_cron_scheduler::JobSchedulerError),
}

impl Error {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}

/// Converts application errors into HTTP responses.
///
/// Maps domain-specific errors to appropriate HTTP status codes and JSON error responses.
/// Most errors are treated as internal server errors (500) with logging, while specific
/// error types like `AuthError` and `ValidationError` have custom response mappings.
///
/// # Returns
/// - 400 Bad Request - For validation failures and rejected OTP/signup attempts
/// - 401 Unauthorized - For missing sessions and invalid credentials
/// - 403 Forbidden - For authenticated users lacking the required role
/// - 404 Not Found - For missing users or resources
/// - 500 Internal Server Error - For all other errors (with error logging)
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::AuthError(err) => err.into_response(),
            Self::ValidationError(err) => err.into_response(),
            Self::ChatError(err) => err.into_response(),
            Self::NotFound(message) => {
                tracing::debug!("{}", message);

                error_response(StatusCode::NOT_FOUND, message)
            }
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Builds a JSON error response with the provided status and message.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorDto {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// This struct logs the error message and returns a generic "Internal server error" message
/// to the client to avoid leaking implementation details. Used as a fallback for errors that
/// don't have specific HTTP response mappings.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}
