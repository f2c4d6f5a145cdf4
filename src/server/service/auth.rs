use chrono::{Duration, Utc};
use sea_orm::SqlErr;

use crate::{
    model::user::{ResendOtpRequest, SigninRequest, SignupForm, VerifyOtpRequest},
    server::{
        data::user::UserRepository,
        error::{auth::AuthError, validation::ValidationError, Error},
        model::app::AppState,
        service::{
            email::EmailService,
            otp::{generate_otp, hash_otp, otp_matches},
        },
        util::{
            password::{hash_password_blocking, verify_password_blocking},
            validate::{is_valid_email, is_valid_otp_format, normalize_email, MIN_PASSWORD_LENGTH},
        },
    },
};

pub struct AuthService<'a> {
    state: &'a AppState,
}

impl<'a> AuthService<'a> {
    /// Creates a new instance of [`AuthService`]
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Registers a new user and emails them a verification code
    ///
    /// Email delivery failures are logged but do not fail the signup, the user can request a
    /// new code afterwards.
    ///
    /// # Returns
    /// - `Ok(Model)` - The created user
    /// - `Err(ValidationError::InvalidInput)` - Blank name or email, or password too short
    /// - `Err(AuthError::EmailInUse)` - Email already registered
    pub async fn signup(&self, form: SignupForm) -> Result<entity::user::Model, Error> {
        let user_repository = UserRepository::new(&self.state.db);

        let name = form.name.trim();
        let email = normalize_email(&form.email);

        if name.is_empty() || email.is_empty() || form.password.chars().count() < MIN_PASSWORD_LENGTH
        {
            return Err(ValidationError::InvalidInput.into());
        }

        if user_repository.get_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailInUse.into());
        }

        let password_hash = hash_password_blocking(form.password).await?;

        let user = match user_repository.create(name, &email, &password_hash).await {
            Ok(user) => user,
            // Lost a race against a concurrent signup for the same email
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                return Err(AuthError::EmailInUse.into())
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(user_id = user.id, "Created new user");

        let user = match self.issue_otp(user.clone()).await {
            Ok(user) => user,
            Err(e) => {
                tracing::error!(user_id = user.id, "Failed to send verification code: {}", e);

                user
            }
        };

        Ok(user)
    }

    /// Checks a user's credentials
    ///
    /// # Returns
    /// - `Ok(Model)` - The authenticated user
    /// - `Err(ValidationError::InvalidInput)` - Malformed email or empty password
    /// - `Err(AuthError::InvalidCredentials)` - Unknown email or wrong password
    pub async fn signin(&self, request: SigninRequest) -> Result<entity::user::Model, Error> {
        let email = normalize_email(&request.email);

        if !is_valid_email(&email) || request.password.is_empty() {
            return Err(ValidationError::InvalidInput.into());
        }

        let Some(user) = UserRepository::new(&self.state.db)
            .get_by_email(&email)
            .await?
        else {
            return Err(AuthError::InvalidCredentials.into());
        };

        let password_matches =
            verify_password_blocking(request.password, user.password_hash.clone()).await?;

        if !password_matches {
            return Err(AuthError::InvalidCredentials.into());
        }

        Ok(user)
    }

    /// Replaces the user's pending verification code with a new one and emails it
    pub async fn resend_otp(&self, request: ResendOtpRequest) -> Result<(), Error> {
        let email = normalize_email(&request.email);

        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidInput.into());
        }

        let user = self.get_unverified_user(&email).await?;

        self.issue_otp(user).await?;

        Ok(())
    }

    /// Verifies the user's email address with the code sent to it
    ///
    /// # Returns
    /// - `Ok(Model)` - The user with `email_verified_at` set
    /// - `Err(ValidationError)` - Malformed email or code
    /// - `Err(AuthError)` - Unknown or verified user, or a missing, expired or wrong code
    pub async fn verify_otp(&self, request: VerifyOtpRequest) -> Result<entity::user::Model, Error> {
        let email = normalize_email(&request.email);
        let otp = request.otp.trim();

        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidInput.into());
        }
        if !is_valid_otp_format(otp) {
            return Err(ValidationError::InvalidOtpFormat.into());
        }

        let user = self.get_unverified_user(&email).await?;

        let (Some(otp_hash), Some(otp_expires_at)) = (&user.otp_hash, user.otp_expires_at) else {
            return Err(AuthError::OtpMissing.into());
        };

        if otp_expires_at < Utc::now().naive_utc() {
            return Err(AuthError::OtpExpired.into());
        }

        if !otp_matches(otp, otp_hash) {
            return Err(AuthError::OtpMismatch.into());
        }

        let user = UserRepository::new(&self.state.db)
            .mark_email_verified(user)
            .await?;

        tracing::info!(user_id = user.id, "Verified user email");

        Ok(user)
    }

    async fn get_unverified_user(&self, email: &str) -> Result<entity::user::Model, Error> {
        let Some(user) = UserRepository::new(&self.state.db)
            .get_by_email(email)
            .await?
        else {
            return Err(AuthError::UserNotFound(email.to_string()).into());
        };

        if user.email_verified_at.is_some() {
            return Err(AuthError::EmailAlreadyVerified.into());
        }

        Ok(user)
    }

    /// Stores a fresh code for the user and emails it
    async fn issue_otp(&self, user: entity::user::Model) -> Result<entity::user::Model, Error> {
        let otp = generate_otp();
        let expiry_minutes = self.state.otp_expiry_minutes;
        let expires_at = Utc::now().naive_utc() + Duration::minutes(expiry_minutes);

        let user = UserRepository::new(&self.state.db)
            .set_otp(user, hash_otp(&otp), expires_at)
            .await?;

        EmailService::new(&self.state.http_client, &self.state.email)
            .send_otp(&user.email, &otp, expiry_minutes)
            .await?;

        Ok(user)
    }
}
