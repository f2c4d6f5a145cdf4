use argon2::{
    password_hash::{PasswordHasher, SaltString},
    Argon2,
};
use chrono::Utc;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{constant::TEST_PASSWORD, error::TestError, TestSetup};

/// Argon2id hash of [`TEST_PASSWORD`] with a fixed salt
fn test_password_hash() -> String {
    let salt = SaltString::encode_b64(b"fixture-salt-016").expect("Failed to encode fixture salt");

    Argon2::default()
        .hash_password(TEST_PASSWORD.as_bytes(), &salt)
        .expect("Failed to hash fixture password")
        .to_string()
}

impl TestSetup {
    pub fn user<'a>(&'a mut self) -> UserFixtures<'a> {
        UserFixtures { setup: self }
    }
}

pub struct UserFixtures<'a> {
    pub setup: &'a mut TestSetup,
}

impl<'a> UserFixtures<'a> {
    /// Inserts an unverified user with the `USER` role
    ///
    /// The name is the local part of the email address.
    pub async fn insert_user(&mut self, email: &str) -> Result<entity::user::Model, TestError> {
        self.insert(email, entity::user::UserRole::User, false).await
    }

    /// Inserts a verified user with the `USER` role
    pub async fn insert_verified_user(
        &mut self,
        email: &str,
    ) -> Result<entity::user::Model, TestError> {
        self.insert(email, entity::user::UserRole::User, true).await
    }

    /// Inserts a verified user with the `ADMIN` role
    pub async fn insert_admin(&mut self, email: &str) -> Result<entity::user::Model, TestError> {
        self.insert(email, entity::user::UserRole::Admin, true).await
    }

    async fn insert(
        &mut self,
        email: &str,
        role: entity::user::UserRole,
        verified: bool,
    ) -> Result<entity::user::Model, TestError> {
        let now = Utc::now().naive_utc();
        let name = email.split('@').next().unwrap_or(email).to_string();

        Ok(
            entity::prelude::User::insert(entity::user::ActiveModel {
                name: ActiveValue::Set(name),
                email: ActiveValue::Set(email.to_string()),
                password_hash: ActiveValue::Set(test_password_hash()),
                role: ActiveValue::Set(role),
                image: ActiveValue::Set(None),
                email_verified_at: ActiveValue::Set(verified.then_some(now)),
                otp_hash: ActiveValue::Set(None),
                otp_expires_at: ActiveValue::Set(None),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.state.db)
            .await?,
        )
    }
}
