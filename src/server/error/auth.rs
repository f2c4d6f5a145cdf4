use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("User ID is not present in session")]
    UserNotInSession,
    #[error("User ID {0:?} not found in database despite having an active session")]
    UserNotInDatabase(i32),
    #[error("Sign in rejected due to unknown email or wrong password")]
    InvalidCredentials,
    #[error("User ID {0:?} attempted to access an admin route without the admin role")]
    NotAdmin(i32),
    #[error("Signup rejected as the email address is already registered")]
    EmailInUse,
    #[error("User with email {0:?} was not found")]
    UserNotFound(String),
    #[error("Email address is already verified")]
    EmailAlreadyVerified,
    #[error("No OTP is pending for this user")]
    OtpMissing,
    #[error("OTP has expired")]
    OtpExpired,
    #[error("OTP does not match")]
    OtpMismatch,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::UserNotInSession | Self::UserNotInDatabase(_) => {
                error_response(StatusCode::UNAUTHORIZED, "Unauthorized")
            }
            Self::InvalidCredentials => {
                error_response(StatusCode::UNAUTHORIZED, "Invalid credentials")
            }
            Self::NotAdmin(_) => error_response(StatusCode::FORBIDDEN, "Forbidden"),
            Self::EmailInUse => error_response(StatusCode::BAD_REQUEST, "Email already in use"),
            Self::UserNotFound(_) => error_response(StatusCode::NOT_FOUND, "User not found"),
            Self::EmailAlreadyVerified => {
                error_response(StatusCode::BAD_REQUEST, "Email already verified")
            }
            Self::OtpMissing => error_response(
                StatusCode::BAD_REQUEST,
                "No OTP found. Please request a new one.",
            ),
            Self::OtpExpired => error_response(
                StatusCode::BAD_REQUEST,
                "OTP has expired. Please request a new one.",
            ),
            Self::OtpMismatch => error_response(StatusCode::BAD_REQUEST, "Invalid OTP"),
        }
    }
}
