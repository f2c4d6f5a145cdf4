use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, DeleteResult,
    EntityTrait, QueryFilter,
};

pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    /// Creates a new instance of [`UserRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new user with the `USER` role and an unverified email
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<entity::user::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let user = entity::user::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            email: ActiveValue::Set(email.to_string()),
            password_hash: ActiveValue::Set(password_hash.to_string()),
            role: ActiveValue::Set(entity::user::UserRole::User),
            image: ActiveValue::Set(None),
            email_verified_at: ActiveValue::Set(None),
            otp_hash: ActiveValue::Set(None),
            otp_expires_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        user.insert(self.db).await
    }

    pub async fn get_by_id(&self, user_id: i32) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find_by_id(user_id).one(self.db).await
    }

    /// Finds a user by email, expects the email to already be normalized
    pub async fn get_by_email(&self, email: &str) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(self.db)
            .await
    }

    /// Stores the hash of a newly issued OTP, replacing any pending one
    pub async fn set_otp(
        &self,
        user: entity::user::Model,
        otp_hash: String,
        expires_at: NaiveDateTime,
    ) -> Result<entity::user::Model, DbErr> {
        let mut user: entity::user::ActiveModel = user.into();
        user.otp_hash = ActiveValue::Set(Some(otp_hash));
        user.otp_expires_at = ActiveValue::Set(Some(expires_at));
        user.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        user.update(self.db).await
    }

    /// Marks the user's email as verified and clears the pending OTP
    pub async fn mark_email_verified(
        &self,
        user: entity::user::Model,
    ) -> Result<entity::user::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let mut user: entity::user::ActiveModel = user.into();
        user.email_verified_at = ActiveValue::Set(Some(now));
        user.otp_hash = ActiveValue::Set(None);
        user.otp_expires_at = ActiveValue::Set(None);
        user.updated_at = ActiveValue::Set(now);

        user.update(self.db).await
    }

    /// Clears OTPs which expired before `now`, returning the number of users affected
    pub async fn clear_expired_otps(&self, now: NaiveDateTime) -> Result<u64, DbErr> {
        let result = entity::prelude::User::update_many()
            .col_expr(
                entity::user::Column::OtpHash,
                sea_orm::sea_query::Expr::value(Option::<String>::None),
            )
            .col_expr(
                entity::user::Column::OtpExpiresAt,
                sea_orm::sea_query::Expr::value(Option::<NaiveDateTime>::None),
            )
            .filter(entity::user::Column::OtpExpiresAt.lt(now))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes a user
    ///
    /// Returns OK regardless of user existing, to confirm the deletion result
    /// check the [`DeleteResult::rows_affected`] field.
    pub async fn delete(&self, user_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::User::delete_by_id(user_id)
            .exec(self.db)
            .await
    }
}
