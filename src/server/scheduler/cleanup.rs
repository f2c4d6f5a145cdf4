use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{session::SessionRepository, user::UserRepository},
    error::Error,
};

/// Deletes session rows whose expiry has passed
///
/// # Returns
/// - `Ok(usize)` - Number of sessions deleted
/// - `Err(Error)` - Database error
pub async fn delete_expired_sessions(db: DatabaseConnection) -> Result<usize, Error> {
    let deleted = SessionRepository::new(&db)
        .delete_expired(Utc::now().naive_utc())
        .await?;

    Ok(deleted as usize)
}

/// Clears verification codes whose expiry has passed
///
/// Expired codes are already rejected on verification, this only drops the stale hashes.
pub async fn clear_expired_otps(db: DatabaseConnection) -> Result<usize, Error> {
    let cleared = UserRepository::new(&db)
        .clear_expired_otps(Utc::now().naive_utc())
        .await?;

    Ok(cleared as usize)
}
