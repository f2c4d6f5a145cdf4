use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::DatabaseConnection;
use tower_sessions::{
    session::{Id, Record},
    session_store,
    SessionStore,
};

use crate::server::{
    data::session::SessionRepository,
    model::session::user::SessionUserId,
    util::time::{naive_utc_to_offset, offset_to_naive_utc},
};

/// Session store persisting tower-sessions records to the `session` table
///
/// Each row keeps the serialized session data, its expiry and the ID of the signed in user
/// so that a user's sessions are removed together with the user. Expired rows are purged
/// by the scheduler's session cleanup job.
#[derive(Clone, Debug)]
pub struct DatabaseSessionStore {
    db: DatabaseConnection,
}

impl DatabaseSessionStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn backend_error(e: impl std::fmt::Display) -> session_store::Error {
    session_store::Error::Backend(e.to_string())
}

fn encode_record(record: &Record) -> session_store::Result<(Option<i32>, String)> {
    let user_id = SessionUserId::from_record_data(&record.data);
    let data = serde_json::to_string(&record.data)
        .map_err(|e| session_store::Error::Encode(e.to_string()))?;

    Ok((user_id, data))
}

#[async_trait]
impl SessionStore for DatabaseSessionStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        let session_repository = SessionRepository::new(&self.db);
        let (user_id, data) = encode_record(record)?;
        let expires_at = offset_to_naive_utc(record.expiry_date).map_err(backend_error)?;

        // Regenerate the ID until it does not collide with an existing session
        while !session_repository
            .insert_new(&record.id.to_string(), user_id, data.clone(), expires_at)
            .await
            .map_err(backend_error)?
        {
            record.id = Id::default();
        }

        Ok(())
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        let session_repository = SessionRepository::new(&self.db);
        let (user_id, data) = encode_record(record)?;
        let expires_at = offset_to_naive_utc(record.expiry_date).map_err(backend_error)?;

        session_repository
            .upsert(&record.id.to_string(), user_id, data, expires_at)
            .await
            .map_err(backend_error)
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        let session_repository = SessionRepository::new(&self.db);

        let Some(session) = session_repository
            .get_unexpired(&session_id.to_string(), Utc::now().naive_utc())
            .await
            .map_err(backend_error)?
        else {
            return Ok(None);
        };

        let data: HashMap<String, serde_json::Value> = serde_json::from_str(&session.data)
            .map_err(|e| session_store::Error::Decode(e.to_string()))?;
        let expiry_date = naive_utc_to_offset(session.expires_at).map_err(backend_error)?;

        Ok(Some(Record {
            id: *session_id,
            data,
            expiry_date,
        }))
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        SessionRepository::new(&self.db)
            .delete(&session_id.to_string())
            .await
            .map_err(backend_error)
    }
}
