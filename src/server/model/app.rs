use std::path::PathBuf;

use sea_orm::DatabaseConnection;

use crate::server::config::{ChatConfig, Config, EmailConfig};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub http_client: reqwest::Client,
    pub upload_dir: PathBuf,
    pub otp_expiry_minutes: i64,
    pub email: EmailConfig,
    pub chat: ChatConfig,
}

impl AppState {
    pub fn new(db: DatabaseConnection, http_client: reqwest::Client, config: &Config) -> Self {
        Self {
            db,
            http_client,
            upload_dir: config.upload_dir.clone(),
            otp_expiry_minutes: config.otp_expiry_minutes,
            email: config.email.clone(),
            chat: config.chat.clone(),
        }
    }
}
