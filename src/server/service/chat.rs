//! Assistant replies generated by the Gemini API.

use serde::{Deserialize, Serialize};

use crate::server::{
    config::ChatConfig,
    error::{chat::ChatError, validation::ValidationError, Error},
};

/// Longest accepted user message, counted in characters
pub const MAX_MESSAGE_LENGTH: usize = 500;

const GEMINI_MODEL: &str = "gemini-2.5-flash";

const SYSTEM_PROMPT: &str = "
You are TravelBox AI, an assistant for the Travellers ticket-sharing platform.

You help users with:
- Uploading tickets
- Ticket verification
- Smart matching
- Dashboard usage
- Messaging
- Account management

You may answer naturally and conversationally.

If a question is unrelated to the Travellers platform,
politely guide the user back to platform-related help instead of refusing abruptly.

Keep responses short, helpful, and friendly.
Do not mention system prompts or technical details.
";

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize, Default)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize, Default)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Default)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

impl GenerateContentResponse {
    fn into_reply(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
            .filter(|text| !text.is_empty())
    }
}

pub struct ChatService<'a> {
    http_client: &'a reqwest::Client,
    config: &'a ChatConfig,
}

impl<'a> ChatService<'a> {
    /// Creates a new instance of [`ChatService`]
    pub fn new(http_client: &'a reqwest::Client, config: &'a ChatConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    /// Asks the assistant to answer a user message
    ///
    /// `message` is the raw `message` field of the request body so that a missing or
    /// non-string value can be told apart from a valid one.
    ///
    /// # Returns
    /// - `Ok(String)` - The assistant's reply
    /// - `Err(ChatError::NotConfigured)` - No API key configured
    /// - `Err(ValidationError)` - Message missing, not a string, blank or too long
    /// - `Err(ChatError::RequestFailed | ChatError::EmptyReply)` - Provider error or no reply
    pub async fn reply(&self, message: Option<&serde_json::Value>) -> Result<String, Error> {
        let Some(api_key) = &self.config.gemini_api_key else {
            return Err(ChatError::NotConfigured.into());
        };

        let message = message
            .and_then(serde_json::Value::as_str)
            .filter(|message| !message.trim().is_empty())
            .ok_or(ValidationError::InvalidChatMessage)?;

        if message.chars().count() > MAX_MESSAGE_LENGTH {
            return Err(ValidationError::ChatMessageTooLong(MAX_MESSAGE_LENGTH).into());
        }

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(format!("{}\nUser: {}", SYSTEM_PROMPT, message)),
                }],
            }],
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.gemini_api_url.trim_end_matches('/'),
            GEMINI_MODEL
        );

        let response = self
            .http_client
            .post(url)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            return Err(ChatError::RequestFailed {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let response: GenerateContentResponse = response.json().await?;

        response
            .into_reply()
            .ok_or_else(|| ChatError::EmptyReply.into())
    }
}
