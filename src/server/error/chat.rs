use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("GEMINI_API_KEY is not configured, chat is disabled")]
    NotConfigured,
    #[error("LLM provider responded with status {status}: {body}")]
    RequestFailed { status: u16, body: String },
    #[error("LLM provider response did not contain a reply")]
    EmptyReply,
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        tracing::error!("Chat error: {}", self);

        let message = match self {
            Self::NotConfigured => "AI not configured.",
            Self::RequestFailed { .. } => "AI request failed.",
            Self::EmptyReply => "AI did not return a response.",
        };

        error_response(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}
