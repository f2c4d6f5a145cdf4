use tower_sessions::Session;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, Error},
    model::{app::AppState, session::user::SessionUserId},
};

/// Retrieves user information from session and then from database
///
/// # Arguments
/// - `state`: Application state with database connection
/// - `session`: The user's session
///
/// # Returns
/// - `Ok(Model)`: The signed in user
/// - `Err(AuthError::UserNotInSession)`: User ID not present in session
/// - `Err(AuthError::UserNotInDatabase)`: User ID exists in session but not found in database (session is cleared)
/// - `Err(Error)`: Internal errors (database query failures, session errors, etc.)
pub async fn get_user_from_session(
    state: &AppState,
    session: &Session,
) -> Result<entity::user::Model, Error> {
    let Some(user_id) = SessionUserId::get(session).await? else {
        return Err(Error::AuthError(AuthError::UserNotInSession));
    };

    let Some(user) = UserRepository::new(&state.db).get_by_id(user_id).await? else {
        session.clear().await;

        tracing::debug!(
            "Session cleared for user ID {} with active session but was not found in database",
            user_id
        );

        return Err(Error::AuthError(AuthError::UserNotInDatabase(user_id)));
    };

    Ok(user)
}

/// Retrieves the signed in user and checks they have the `ADMIN` role
///
/// # Returns
/// - `Ok(Model)`: The signed in admin
/// - `Err(AuthError::NotAdmin)`: Signed in user is not an admin
/// - Any error of [`get_user_from_session`]
pub async fn require_admin(
    state: &AppState,
    session: &Session,
) -> Result<entity::user::Model, Error> {
    let user = get_user_from_session(state, session).await?;

    if user.role != entity::user::UserRole::Admin {
        return Err(Error::AuthError(AuthError::NotAdmin(user.id)));
    }

    Ok(user)
}
