use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, DeleteResult,
    EntityTrait, QueryFilter, QueryOrder,
};

pub struct RouteRepository<'a> {
    db: &'a DatabaseConnection,
}

/// Validated route fields to persist
#[derive(Clone, Debug, PartialEq)]
pub struct RouteParams {
    pub origin_lat: f64,
    pub origin_lng: f64,
    pub destination_lat: f64,
    pub destination_lng: f64,
    pub origin_name: Option<String>,
    pub destination_name: Option<String>,
    /// Waypoints serialized as a JSON array
    pub waypoints: Option<String>,
    pub distance: f64,
    pub duration: f64,
    pub encoded_polyline: String,
    pub trip_name: Option<String>,
    pub notes: Option<String>,
}

impl RouteParams {
    fn apply(self, route: &mut entity::route::ActiveModel) {
        route.origin_lat = ActiveValue::Set(self.origin_lat);
        route.origin_lng = ActiveValue::Set(self.origin_lng);
        route.destination_lat = ActiveValue::Set(self.destination_lat);
        route.destination_lng = ActiveValue::Set(self.destination_lng);
        route.origin_name = ActiveValue::Set(self.origin_name);
        route.destination_name = ActiveValue::Set(self.destination_name);
        route.waypoints = ActiveValue::Set(self.waypoints);
        route.distance = ActiveValue::Set(self.distance);
        route.duration = ActiveValue::Set(self.duration);
        route.encoded_polyline = ActiveValue::Set(self.encoded_polyline);
        route.trip_name = ActiveValue::Set(self.trip_name);
        route.notes = ActiveValue::Set(self.notes);
    }
}

impl<'a> RouteRepository<'a> {
    /// Creates a new instance of [`RouteRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user_id: i32,
        params: RouteParams,
    ) -> Result<entity::route::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let mut route = entity::route::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };
        params.apply(&mut route);

        route.insert(self.db).await
    }

    /// Replaces the fields of a route owned by the user
    ///
    /// Returns `None` if no route with the ID belongs to the user.
    pub async fn update(
        &self,
        route_id: i32,
        user_id: i32,
        params: RouteParams,
    ) -> Result<Option<entity::route::Model>, DbErr> {
        let Some(route) = self.get_by_id_for_user(route_id, user_id).await? else {
            return Ok(None);
        };

        let mut route: entity::route::ActiveModel = route.into();
        params.apply(&mut route);
        route.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        Ok(Some(route.update(self.db).await?))
    }

    pub async fn get_by_id_for_user(
        &self,
        route_id: i32,
        user_id: i32,
    ) -> Result<Option<entity::route::Model>, DbErr> {
        entity::prelude::Route::find_by_id(route_id)
            .filter(entity::route::Column::UserId.eq(user_id))
            .one(self.db)
            .await
    }

    /// Gets all routes saved by a user, most recently updated first
    pub async fn get_by_user_id(&self, user_id: i32) -> Result<Vec<entity::route::Model>, DbErr> {
        entity::prelude::Route::find()
            .filter(entity::route::Column::UserId.eq(user_id))
            .order_by_desc(entity::route::Column::UpdatedAt)
            .order_by_desc(entity::route::Column::Id)
            .all(self.db)
            .await
    }

    /// Deletes a route only if it belongs to the user
    pub async fn delete(&self, route_id: i32, user_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Route::delete_many()
            .filter(entity::route::Column::Id.eq(route_id))
            .filter(entity::route::Column::UserId.eq(user_id))
            .exec(self.db)
            .await
    }
}
