use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection},
        State,
    },
    response::IntoResponse,
    Form, Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, OkDto},
        user::{ResendOtpRequest, SigninRequest, SignupForm, UserDto, VerifyOtpRequest},
    },
    server::{
        controller::util::get_user::get_user_from_session,
        error::{validation::ValidationError, Error},
        model::{app::AppState, session::user::SessionUserId},
        service::auth::AuthService,
    },
};

pub static AUTH_TAG: &str = "auth";

/// Stores the user in the session under a fresh session ID
async fn start_session(session: &Session, user_id: i32) -> Result<(), Error> {
    session.cycle_id().await?;
    SessionUserId::insert(session, user_id).await?;

    Ok(())
}

/// Create an account
///
/// Registers a new user, signs them in and emails a verification code.
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    tag = AUTH_TAG,
    request_body(content = SignupForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Account created", body = OkDto),
        (status = 400, description = "Invalid input or email already in use", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn signup(
    State(state): State<AppState>,
    session: Session,
    form: Result<Form<SignupForm>, FormRejection>,
) -> Result<impl IntoResponse, Error> {
    let Form(form) = form.map_err(|_| ValidationError::InvalidInput)?;

    let user = AuthService::new(&state).signup(form).await?;

    start_session(&session, user.id).await?;

    Ok(Json(OkDto::new()))
}

/// Sign in with email and password
#[utoipa::path(
    post,
    path = "/api/auth/signin",
    tag = AUTH_TAG,
    request_body = SigninRequest,
    responses(
        (status = 200, description = "Signed in", body = UserDto),
        (status = 400, description = "Invalid input", body = ErrorDto),
        (status = 401, description = "Invalid credentials", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn signin(
    State(state): State<AppState>,
    session: Session,
    payload: Result<Json<SigninRequest>, JsonRejection>,
) -> Result<impl IntoResponse, Error> {
    let Json(request) = payload.map_err(|_| ValidationError::InvalidInput)?;

    let user = AuthService::new(&state).signin(request).await?;

    start_session(&session, user.id).await?;

    tracing::debug!(user_id = user.id, "User signed in");

    Ok(Json(UserDto::from(user)))
}

/// Sign out by clearing the session
#[utoipa::path(
    post,
    path = "/api/auth/signout",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Signed out", body = OkDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn signout(session: Session) -> Result<impl IntoResponse, Error> {
    // Only clear the session if there is a user in it, clearing a session which doesn't exist
    // in the store fails
    if SessionUserId::get(&session).await?.is_some() {
        session.flush().await?;
    }

    Ok(Json(OkDto::new()))
}

/// Get the signed in user
#[utoipa::path(
    get,
    path = "/api/auth/session",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "The signed in user", body = UserDto),
        (status = 401, description = "Not signed in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_session(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    Ok(Json(UserDto::from(user)))
}

/// Send a new email verification code
#[utoipa::path(
    post,
    path = "/api/auth/resend-otp",
    tag = AUTH_TAG,
    request_body = ResendOtpRequest,
    responses(
        (status = 200, description = "New code sent", body = OkDto),
        (status = 400, description = "Invalid input or email already verified", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn resend_otp(
    State(state): State<AppState>,
    payload: Result<Json<ResendOtpRequest>, JsonRejection>,
) -> Result<impl IntoResponse, Error> {
    let Json(request) = payload.map_err(|_| ValidationError::InvalidInput)?;

    AuthService::new(&state).resend_otp(request).await?;

    Ok(Json(OkDto::with_message("New OTP sent to your email")))
}

/// Verify an email address with the emailed code
#[utoipa::path(
    post,
    path = "/api/auth/verify-otp",
    tag = AUTH_TAG,
    request_body = VerifyOtpRequest,
    responses(
        (status = 200, description = "Email verified", body = OkDto),
        (status = 400, description = "Invalid, missing or expired code", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn verify_otp(
    State(state): State<AppState>,
    payload: Result<Json<VerifyOtpRequest>, JsonRejection>,
) -> Result<impl IntoResponse, Error> {
    let Json(request) = payload.map_err(|_| ValidationError::InvalidInput)?;

    AuthService::new(&state).verify_otp(request).await?;

    Ok(Json(OkDto::with_message("Email verified successfully")))
}
