//! Environment-driven server configuration.

use std::{net::SocketAddr, path::PathBuf};

use crate::server::error::config::ConfigError;

pub static DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub static DEFAULT_UPLOAD_DIR: &str = "uploads";
pub static DEFAULT_OTP_EXPIRY_MINUTES: i64 = 10;
pub static DEFAULT_RESEND_API_URL: &str = "https://api.resend.com";
pub static DEFAULT_EMAIL_FROM: &str = "Travellers <onboarding@travellersmeet.app>";
pub static DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub upload_dir: PathBuf,
    pub otp_expiry_minutes: i64,
    pub email: EmailConfig,
    pub chat: ChatConfig,
}

/// Settings for the transactional email provider
#[derive(Clone, Debug)]
pub struct EmailConfig {
    /// Emails are written to the log instead of sent when `None`
    pub resend_api_key: Option<String>,
    pub resend_api_url: String,
    pub from: String,
}

/// Settings for the chat assistant's LLM provider
#[derive(Clone, Debug)]
pub struct ChatConfig {
    /// Chat is disabled when `None`
    pub gemini_api_key: Option<String>,
    pub gemini_api_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = optional_var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvValue {
                var: "BIND_ADDR".to_string(),
                reason: e.to_string(),
            })?;

        let otp_expiry_minutes = match optional_var("OTP_EXPIRY_MINUTES") {
            Some(value) => parse_otp_expiry(&value)?,
            None => DEFAULT_OTP_EXPIRY_MINUTES,
        };

        Ok(Self {
            database_url: required_var("DATABASE_URL")?,
            bind_addr,
            upload_dir: optional_var("UPLOAD_DIR")
                .unwrap_or_else(|| DEFAULT_UPLOAD_DIR.to_string())
                .into(),
            otp_expiry_minutes,
            email: EmailConfig {
                resend_api_key: optional_var("RESEND_API_KEY"),
                resend_api_url: optional_var("RESEND_API_URL")
                    .unwrap_or_else(|| DEFAULT_RESEND_API_URL.to_string()),
                from: optional_var("EMAIL_FROM").unwrap_or_else(|| DEFAULT_EMAIL_FROM.to_string()),
            },
            chat: ChatConfig {
                gemini_api_key: optional_var("GEMINI_API_KEY"),
                gemini_api_url: optional_var("GEMINI_API_URL")
                    .unwrap_or_else(|| DEFAULT_GEMINI_API_URL.to_string()),
            },
        })
    }
}

fn required_var(var: &str) -> Result<String, ConfigError> {
    optional_var(var).ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
}

/// Reads an environment variable, treating empty values as unset
fn optional_var(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Longest accepted verification code lifetime, one week
const MAX_OTP_EXPIRY_MINUTES: i64 = 7 * 24 * 60;

fn parse_otp_expiry(value: &str) -> Result<i64, ConfigError> {
    match value.parse::<i64>() {
        Ok(minutes) if minutes > MAX_OTP_EXPIRY_MINUTES => Err(ConfigError::InvalidEnvValue {
            var: "OTP_EXPIRY_MINUTES".to_string(),
            reason: format!("must be at most {}", MAX_OTP_EXPIRY_MINUTES),
        }),
        Ok(minutes) if minutes > 0 => Ok(minutes),
        Ok(_) => Err(ConfigError::InvalidEnvValue {
            var: "OTP_EXPIRY_MINUTES".to_string(),
            reason: "must be greater than zero".to_string(),
        }),
        Err(e) => Err(ConfigError::InvalidEnvValue {
            var: "OTP_EXPIRY_MINUTES".to_string(),
            reason: e.to_string(),
        }),
    }
}
