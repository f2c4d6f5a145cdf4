use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Invalid input")]
    InvalidInput,
    #[error("Invalid OTP format")]
    InvalidOtpFormat,
    #[error("destination and date query parameters required")]
    MissingMatchParameters,
    #[error("Invalid date: {0:?}")]
    InvalidDate(String),
    #[error("Invalid route data: {0}")]
    InvalidRouteData(String),
    #[error("Route ID required")]
    RouteIdRequired,
    #[error("Invalid status: {0:?}")]
    InvalidStatus(String),
    #[error("Invalid chat message")]
    InvalidChatMessage,
    #[error("Chat message exceeds {0} characters")]
    ChatMessageTooLong(usize),
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        tracing::debug!("Validation error: {}", self);

        let message = match self {
            Self::InvalidInput => "Invalid input".to_string(),
            Self::InvalidOtpFormat => "Invalid OTP format".to_string(),
            Self::MissingMatchParameters => {
                "destination and date query parameters required".to_string()
            }
            Self::InvalidDate(_) => "Invalid date".to_string(),
            Self::InvalidRouteData(_) => "Invalid route data".to_string(),
            Self::RouteIdRequired => "Route ID required".to_string(),
            Self::InvalidStatus(_) => "Invalid status".to_string(),
            Self::InvalidChatMessage => "Invalid input.".to_string(),
            Self::ChatMessageTooLong(max) => {
                format!("Message too long (max {} characters).", max)
            }
        };

        error_response(StatusCode::BAD_REQUEST, message)
    }
}
