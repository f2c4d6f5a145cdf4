use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LocationDto {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct WaypointDto {
    pub location: LocationDto,
    pub stopover: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Body of `POST /api/routes`, creates a route or updates it when `id` is present
#[derive(Clone, Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteInputDto {
    pub id: Option<i32>,
    pub origin: LocationDto,
    pub destination: LocationDto,
    pub waypoints: Option<Vec<WaypointDto>>,
    pub origin_name: Option<String>,
    pub destination_name: Option<String>,
    /// Distance in metres
    pub distance: f64,
    /// Duration in seconds
    pub duration: f64,
    pub encoded_polyline: String,
    pub trip_name: Option<String>,
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteDto {
    pub id: i32,
    pub user_id: i32,
    pub origin: LocationDto,
    pub destination: LocationDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waypoints: Option<Vec<WaypointDto>>,
    pub origin_name: Option<String>,
    pub destination_name: Option<String>,
    pub distance: f64,
    pub duration: f64,
    pub encoded_polyline: String,
    pub trip_name: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// GeoJSON `LineString` geometry, coordinates are `[lng, lat]` pairs
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RouteGeometryDto {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Vec<[f64; 2]>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct BoundingBoxDto {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

/// Everything the browser needs to render a route without connectivity
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OfflineRouteDto {
    pub metadata: RouteDto,
    pub geometry: RouteGeometryDto,
    pub bounds: Option<BoundingBoxDto>,
}

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct DeleteRouteDto {
    pub success: bool,
}

#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeleteRouteQuery {
    pub id: Option<String>,
}

impl From<entity::route::Model> for RouteDto {
    fn from(route: entity::route::Model) -> Self {
        // Stored waypoints are written from validated input, unreadable values are dropped
        let waypoints = route
            .waypoints
            .as_deref()
            .and_then(|waypoints| serde_json::from_str(waypoints).ok());

        Self {
            id: route.id,
            user_id: route.user_id,
            origin: LocationDto {
                lat: route.origin_lat,
                lng: route.origin_lng,
            },
            destination: LocationDto {
                lat: route.destination_lat,
                lng: route.destination_lng,
            },
            waypoints,
            origin_name: route.origin_name,
            destination_name: route.destination_name,
            distance: route.distance,
            duration: route.duration,
            encoded_polyline: route.encoded_polyline,
            trip_name: route.trip_name,
            notes: route.notes,
            created_at: route.created_at,
            updated_at: route.updated_at,
        }
    }
}
