use chrono::NaiveDateTime;
use sea_orm::{
    sea_query::OnConflict, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

pub struct SessionRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SessionRepository<'a> {
    /// Creates a new instance of [`SessionRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a session record or replaces the existing record with the same ID
    pub async fn upsert(
        &self,
        id: &str,
        user_id: Option<i32>,
        data: String,
        expires_at: NaiveDateTime,
    ) -> Result<(), DbErr> {
        let session = entity::session::ActiveModel {
            id: ActiveValue::Set(id.to_string()),
            user_id: ActiveValue::Set(user_id),
            data: ActiveValue::Set(data),
            expires_at: ActiveValue::Set(expires_at),
        };

        entity::prelude::Session::insert(session)
            .on_conflict(
                OnConflict::column(entity::session::Column::Id)
                    .update_columns([
                        entity::session::Column::UserId,
                        entity::session::Column::Data,
                        entity::session::Column::ExpiresAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(self.db)
            .await?;

        Ok(())
    }

    /// Inserts a session record only if the ID is unused
    ///
    /// Returns `false` if a record with the ID already exists.
    pub async fn insert_new(
        &self,
        id: &str,
        user_id: Option<i32>,
        data: String,
        expires_at: NaiveDateTime,
    ) -> Result<bool, DbErr> {
        let session = entity::session::ActiveModel {
            id: ActiveValue::Set(id.to_string()),
            user_id: ActiveValue::Set(user_id),
            data: ActiveValue::Set(data),
            expires_at: ActiveValue::Set(expires_at),
        };

        let rows = entity::prelude::Session::insert(session)
            .on_conflict(
                OnConflict::column(entity::session::Column::Id)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(self.db)
            .await?;

        Ok(rows > 0)
    }

    /// Gets a session record that has not yet expired
    pub async fn get_unexpired(
        &self,
        id: &str,
        now: NaiveDateTime,
    ) -> Result<Option<entity::session::Model>, DbErr> {
        entity::prelude::Session::find_by_id(id.to_string())
            .filter(entity::session::Column::ExpiresAt.gt(now))
            .one(self.db)
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<(), DbErr> {
        entity::prelude::Session::delete_by_id(id.to_string())
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Deletes all session records expired at `now`, returning the number removed
    pub async fn delete_expired(&self, now: NaiveDateTime) -> Result<u64, DbErr> {
        let result = entity::prelude::Session::delete_many()
            .filter(entity::session::Column::ExpiresAt.lte(now))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
