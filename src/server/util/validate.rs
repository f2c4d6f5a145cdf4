//! Input validation helpers shared by the auth, ticket and matching services.

use chrono::{DateTime, NaiveDate};

use crate::server::error::validation::ValidationError;

/// Minimum number of characters in a password at signup
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Number of digits in an email verification code
pub const OTP_LENGTH: usize = 6;

/// Trims and lower-cases an email address for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Checks that an email address has a plausible `local@domain.tld` shape.
///
/// Deliverability is confirmed separately through OTP verification, this only rejects input
/// that could never be an address.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();

    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}

/// Checks that an OTP is exactly six ASCII digits
pub fn is_valid_otp_format(otp: &str) -> bool {
    otp.len() == OTP_LENGTH && otp.bytes().all(|b| b.is_ascii_digit())
}

/// Parses a calendar date from `YYYY-MM-DD` or an RFC 3339 timestamp.
///
/// Timestamps are truncated to the date in their own offset.
pub fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    let value = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }

    DateTime::parse_from_rfc3339(value)
        .map(|datetime| datetime.date_naive())
        .map_err(|_| ValidationError::InvalidDate(value.to_string()))
}
