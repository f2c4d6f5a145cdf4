//! Password hashing with Argon2id.
//!
//! Hashes are stored as PHC strings so the algorithm parameters travel with the hash. Hashing is
//! CPU bound, the async wrappers move the work onto the blocking thread pool.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::Rng;

use crate::server::error::Error;

const SALT_LENGTH: usize = 16;

/// Hashes a password with a freshly generated random salt.
///
/// # Returns
/// - `Ok(String)` - PHC formatted Argon2id hash
/// - `Err(Error::InternalError)` - Salt encoding or hashing failed
pub fn hash_password(password: &str) -> Result<String, Error> {
    let mut salt_bytes = [0u8; SALT_LENGTH];
    rand::rng().fill(&mut salt_bytes);

    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| Error::InternalError(format!("Failed to encode password salt: {}", e)))?;

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::InternalError(format!("Failed to hash password: {}", e)))?;

    Ok(hash.to_string())
}

/// Verifies a password against a stored PHC hash.
///
/// # Returns
/// - `Ok(true)` - Password matches
/// - `Ok(false)` - Password does not match
/// - `Err(Error::ParseError)` - Stored hash is not a valid PHC string
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, Error> {
    let parsed = PasswordHash::new(password_hash)
        .map_err(|e| Error::ParseError(format!("Failed to parse stored password hash: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Runs [`hash_password`] on the blocking thread pool
pub async fn hash_password_blocking(password: String) -> Result<String, Error> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| Error::InternalError(format!("Password hashing task failed: {}", e)))?
}

/// Runs [`verify_password`] on the blocking thread pool
pub async fn verify_password_blocking(password: String, password_hash: String) -> Result<bool, Error> {
    tokio::task::spawn_blocking(move || verify_password(&password, &password_hash))
        .await
        .map_err(|e| Error::InternalError(format!("Password verification task failed: {}", e)))?
}
