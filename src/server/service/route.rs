use crate::{
    model::route::{
        BoundingBoxDto, LocationDto, OfflineRouteDto, RouteDto, RouteGeometryDto, RouteInputDto,
    },
    server::{
        data::route::{RouteParams, RouteRepository},
        error::{validation::ValidationError, Error},
        model::app::AppState,
        util::polyline,
    },
};

/// Whether a save created a new route or replaced an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Updated,
}

pub struct RouteService<'a> {
    state: &'a AppState,
}

impl<'a> RouteService<'a> {
    /// Creates a new instance of [`RouteService`]
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    pub async fn get_user_routes(&self, user_id: i32) -> Result<Vec<entity::route::Model>, Error> {
        Ok(RouteRepository::new(&self.state.db)
            .get_by_user_id(user_id)
            .await?)
    }

    pub async fn get_route(
        &self,
        user_id: i32,
        route_id: i32,
    ) -> Result<entity::route::Model, Error> {
        RouteRepository::new(&self.state.db)
            .get_by_id_for_user(route_id, user_id)
            .await?
            .ok_or_else(|| Error::not_found("Route not found"))
    }

    /// Creates a route, or updates the user's route when the input carries an ID
    ///
    /// # Returns
    /// - `Ok((Model, SaveOutcome))` - The stored route and whether it was created or updated
    /// - `Err(ValidationError::InvalidRouteData)` - Coordinates, metrics or polyline are invalid
    /// - `Err(Error::NotFound)` - The ID does not refer to one of the user's routes
    pub async fn save_route(
        &self,
        user_id: i32,
        input: RouteInputDto,
    ) -> Result<(entity::route::Model, SaveOutcome), Error> {
        let route_id = input.id;
        let params = validate_route(input)?;
        let route_repository = RouteRepository::new(&self.state.db);

        match route_id {
            Some(route_id) => {
                let route = route_repository
                    .update(route_id, user_id, params)
                    .await?
                    .ok_or_else(|| Error::not_found("Route not found"))?;

                tracing::info!(user_id, route_id, "Updated route");

                Ok((route, SaveOutcome::Updated))
            }
            None => {
                let route = route_repository.create(user_id, params).await?;

                tracing::info!(user_id, route_id = route.id, "Created route");

                Ok((route, SaveOutcome::Created))
            }
        }
    }

    /// Deletes one of the user's routes
    ///
    /// The ID comes straight from the query string, a missing or non-numeric ID is rejected.
    pub async fn delete_route(&self, user_id: i32, route_id: Option<&str>) -> Result<(), Error> {
        let route_id = route_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(ValidationError::RouteIdRequired)?;

        let Ok(route_id) = route_id.parse::<i32>() else {
            return Err(Error::not_found("Route not found"));
        };

        let result = RouteRepository::new(&self.state.db)
            .delete(route_id, user_id)
            .await?;

        if result.rows_affected == 0 {
            return Err(Error::not_found("Route not found"));
        }

        tracing::info!(user_id, route_id, "Deleted route");

        Ok(())
    }

    /// Builds the offline bundle of a route: metadata plus decoded geometry and bounds
    pub async fn get_offline_route(
        &self,
        user_id: i32,
        route_id: i32,
    ) -> Result<OfflineRouteDto, Error> {
        let route = self.get_route(user_id, route_id).await?;

        let coordinates = polyline::decode(&route.encoded_polyline).map_err(|e| {
            Error::InternalError(format!("Stored polyline of route {} is invalid: {}", route.id, e))
        })?;

        let bounds = polyline::bounding_box(&coordinates).map(|bounds| BoundingBoxDto {
            north: bounds.north,
            south: bounds.south,
            east: bounds.east,
            west: bounds.west,
        });

        Ok(OfflineRouteDto {
            metadata: RouteDto::from(route),
            geometry: RouteGeometryDto {
                kind: "LineString".to_string(),
                coordinates,
            },
            bounds,
        })
    }
}

fn validate_location(field: &str, location: &LocationDto) -> Result<(), ValidationError> {
    let valid = location.lat.is_finite()
        && location.lng.is_finite()
        && (-90.0..=90.0).contains(&location.lat)
        && (-180.0..=180.0).contains(&location.lng);

    if valid {
        Ok(())
    } else {
        Err(ValidationError::InvalidRouteData(format!(
            "{} ({}, {}) is out of range",
            field, location.lat, location.lng
        )))
    }
}

fn validate_metric(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidRouteData(format!(
            "{} must be a non-negative number",
            field
        )))
    }
}

/// Checks a route submitted by the browser and converts it into storable fields
fn validate_route(input: RouteInputDto) -> Result<RouteParams, ValidationError> {
    validate_location("origin", &input.origin)?;
    validate_location("destination", &input.destination)?;
    for waypoint in input.waypoints.iter().flatten() {
        validate_location("waypoint", &waypoint.location)?;
    }
    validate_metric("distance", input.distance)?;
    validate_metric("duration", input.duration)?;

    if input.encoded_polyline.is_empty() {
        return Err(ValidationError::InvalidRouteData(
            "encodedPolyline is empty".to_string(),
        ));
    }
    polyline::decode(&input.encoded_polyline)
        .map_err(|e| ValidationError::InvalidRouteData(e.to_string()))?;

    let waypoints = input
        .waypoints
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .map_err(|e| ValidationError::InvalidRouteData(e.to_string()))?;

    Ok(RouteParams {
        origin_lat: input.origin.lat,
        origin_lng: input.origin.lng,
        destination_lat: input.destination.lat,
        destination_lng: input.destination.lng,
        origin_name: input.origin_name,
        destination_name: input.destination_name,
        waypoints,
        distance: input.distance,
        duration: input.duration,
        encoded_polyline: input.encoded_polyline,
        trip_name: input.trip_name,
        notes: input.notes,
    })
}
