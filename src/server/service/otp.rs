//! One-time codes for email verification.
//!
//! Only the SHA-256 digest of a code is persisted, the plain code is sent to the user and then
//! discarded.

use rand::Rng;
use sha2::{Digest, Sha256};

const OTP_MIN: u32 = 100_000;
const OTP_MAX: u32 = 999_999;

/// Generates a random six digit code
pub fn generate_otp() -> String {
    rand::rng().random_range(OTP_MIN..=OTP_MAX).to_string()
}

/// Hex encoded SHA-256 digest of a code
pub fn hash_otp(otp: &str) -> String {
    hex::encode(Sha256::digest(otp.as_bytes()))
}

/// Checks a submitted code against a stored digest
pub fn otp_matches(otp: &str, otp_hash: &str) -> bool {
    hash_otp(otp) == otp_hash
}
