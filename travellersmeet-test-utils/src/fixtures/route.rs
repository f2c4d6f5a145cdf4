use chrono::Utc;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{constant::TEST_POLYLINE, error::TestError, TestSetup};

impl TestSetup {
    pub fn route<'a>(&'a mut self) -> RouteFixtures<'a> {
        RouteFixtures { setup: self }
    }
}

pub struct RouteFixtures<'a> {
    pub setup: &'a mut TestSetup,
}

impl<'a> RouteFixtures<'a> {
    /// Inserts a route following [`TEST_POLYLINE`] for the user
    pub async fn insert_route(
        &mut self,
        user_id: i32,
        trip_name: &str,
    ) -> Result<entity::route::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::Route::insert(entity::route::ActiveModel {
                user_id: ActiveValue::Set(user_id),
                origin_lat: ActiveValue::Set(38.5),
                origin_lng: ActiveValue::Set(-120.2),
                destination_lat: ActiveValue::Set(43.252),
                destination_lng: ActiveValue::Set(-126.453),
                origin_name: ActiveValue::Set(Some("Origin".to_string())),
                destination_name: ActiveValue::Set(Some("Destination".to_string())),
                waypoints: ActiveValue::Set(None),
                distance: ActiveValue::Set(1_000.0),
                duration: ActiveValue::Set(600.0),
                encoded_polyline: ActiveValue::Set(TEST_POLYLINE.to_string()),
                trip_name: ActiveValue::Set(Some(trip_name.to_string())),
                notes: ActiveValue::Set(None),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.state.db)
            .await?,
        )
    }
}
