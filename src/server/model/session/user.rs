use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::server::error::Error;

pub const SESSION_USER_ID_KEY: &str = "travellersmeet:user:id";

#[derive(Default, Deserialize, Serialize, Debug)]
pub struct SessionUserId(pub String);

impl SessionUserId {
    /// Insert user ID into session
    pub async fn insert(session: &Session, user_id: i32) -> Result<(), Error> {
        session
            .insert(SESSION_USER_ID_KEY, SessionUserId(user_id.to_string()))
            .await?;

        Ok(())
    }

    /// Get user ID from session
    pub async fn get(session: &Session) -> Result<Option<i32>, Error> {
        session
            .get::<SessionUserId>(SESSION_USER_ID_KEY)
            .await?
            .map(|SessionUserId(id_str)| {
                id_str.parse::<i32>().map_err(|e| {
                    Error::ParseError(format!("Failed to parse session user id: {}", e))
                })
            })
            .transpose()
    }

    /// Reads the user ID from raw session record data without a `Session` handle.
    ///
    /// Used by the session store to link persisted sessions to their user.
    pub fn from_record_data(data: &std::collections::HashMap<String, serde_json::Value>) -> Option<i32> {
        data.get(SESSION_USER_ID_KEY)
            .and_then(|value| value.as_str())
            .and_then(|id_str| id_str.parse::<i32>().ok())
    }
}
