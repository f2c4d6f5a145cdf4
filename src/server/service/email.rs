//! Verification email delivery through the Resend HTTP API.

use serde::Serialize;

use crate::server::{config::EmailConfig, error::Error};

const OTP_SUBJECT: &str = "Verify your email - Travellers";

#[derive(Serialize)]
struct ResendEmail<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: String,
}

pub struct EmailService<'a> {
    http_client: &'a reqwest::Client,
    config: &'a EmailConfig,
}

impl<'a> EmailService<'a> {
    /// Creates a new instance of [`EmailService`]
    pub fn new(http_client: &'a reqwest::Client, config: &'a EmailConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    /// Sends a verification code to the given address
    ///
    /// Without a configured API key the code is written to the log instead, which is how
    /// local development receives its codes.
    ///
    /// # Returns
    /// - `Ok(())` - Email accepted by the provider or logged
    /// - `Err(Error::EmailDeliveryError)` - Provider rejected the request
    /// - `Err(Error::ReqwestError)` - Provider could not be reached
    pub async fn send_otp(&self, to: &str, otp: &str, expiry_minutes: i64) -> Result<(), Error> {
        let Some(api_key) = &self.config.resend_api_key else {
            tracing::info!(
                to = %to,
                otp = %otp,
                expires_in_minutes = expiry_minutes,
                "RESEND_API_KEY not set, logging verification code instead of sending email"
            );

            return Ok(());
        };

        let email = ResendEmail {
            from: &self.config.from,
            to: [to],
            subject: OTP_SUBJECT,
            html: otp_email_html(otp, expiry_minutes),
        };

        let url = format!("{}/emails", self.config.resend_api_url.trim_end_matches('/'));
        let response = self
            .http_client
            .post(url)
            .bearer_auth(api_key)
            .json(&email)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            return Err(Error::EmailDeliveryError(format!(
                "Resend responded with status {}: {}",
                status, body
            )));
        }

        tracing::debug!(to = %to, "Sent verification email");

        Ok(())
    }
}

fn otp_email_html(otp: &str, expiry_minutes: i64) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
  <body style="font-family: sans-serif; line-height: 1.6; color: #333; max-width: 600px; margin: 0 auto; padding: 20px;">
    <h1 style="color: #2563eb;">Welcome to Travellers!</h1>
    <p>Thank you for signing up! Please verify your email address to complete your registration.</p>
    <p style="font-size: 14px; color: #6b7280;">Your verification code:</p>
    <p style="font-size: 36px; font-weight: bold; color: #3b82f6; letter-spacing: 8px;">{otp}</p>
    <p style="font-size: 14px; color: #6b7280;">This code expires in <strong>{expiry_minutes} minutes</strong>.</p>
    <p style="font-size: 14px; color: #6b7280;">If you didn't create an account, you can safely ignore this email.</p>
  </body>
</html>"#
    )
}
