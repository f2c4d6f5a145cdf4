use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ChatReplyDto {
    pub reply: String,
}

/// Body of `POST /api/chat`
///
/// The handler reads the body as loose JSON so that a missing or non-string `message` is
/// reported as invalid input rather than a deserialization failure.
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ChatRequestDto {
    /// At most 500 characters
    pub message: String,
}
