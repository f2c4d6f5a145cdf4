use serde::{Deserialize, Serialize};

/// The response when an error occurs with an API request
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorDto {
    /// The error message
    pub error: String,
}

/// Generic acknowledgement returned by endpoints without a richer payload
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct OkDto {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl OkDto {
    pub fn new() -> Self {
        Self {
            ok: true,
            message: None,
        }
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: Some(message.into()),
        }
    }
}

impl Default for OkDto {
    fn default() -> Self {
        Self::new()
    }
}
