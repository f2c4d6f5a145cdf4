use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        route::{DeleteRouteDto, DeleteRouteQuery, OfflineRouteDto, RouteDto, RouteInputDto},
    },
    server::{
        controller::util::get_user::get_user_from_session,
        error::{validation::ValidationError, Error},
        model::app::AppState,
        service::route::{RouteService, SaveOutcome},
    },
};

pub static ROUTE_TAG: &str = "route";

/// Parses a route ID path segment, IDs that cannot exist are reported as not found
fn parse_route_id(id: &str) -> Result<i32, Error> {
    id.parse::<i32>()
        .map_err(|_| Error::not_found("Route not found"))
}

/// Get the signed in user's saved routes
#[utoipa::path(
    get,
    path = "/api/routes",
    tag = ROUTE_TAG,
    responses(
        (status = 200, description = "Saved routes, most recently updated first", body = Vec<RouteDto>),
        (status = 401, description = "Not signed in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_routes(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let routes = RouteService::new(&state).get_user_routes(user.id).await?;

    Ok(Json(
        routes.into_iter().map(RouteDto::from).collect::<Vec<_>>(),
    ))
}

/// Save a route
///
/// Creates a new route, or replaces one of the user's routes when the body carries its `id`.
#[utoipa::path(
    post,
    path = "/api/routes",
    tag = ROUTE_TAG,
    request_body = RouteInputDto,
    responses(
        (status = 200, description = "Route updated", body = RouteDto),
        (status = 201, description = "Route created", body = RouteDto),
        (status = 400, description = "Invalid route data", body = ErrorDto),
        (status = 401, description = "Not signed in", body = ErrorDto),
        (status = 404, description = "Route not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn save_route(
    State(state): State<AppState>,
    session: Session,
    payload: Result<Json<RouteInputDto>, JsonRejection>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let Json(input) =
        payload.map_err(|e| ValidationError::InvalidRouteData(e.body_text()))?;

    let (route, outcome) = RouteService::new(&state).save_route(user.id, input).await?;

    let status = match outcome {
        SaveOutcome::Created => StatusCode::CREATED,
        SaveOutcome::Updated => StatusCode::OK,
    };

    Ok((status, Json(RouteDto::from(route))))
}

/// Delete a saved route
#[utoipa::path(
    delete,
    path = "/api/routes",
    tag = ROUTE_TAG,
    params(DeleteRouteQuery),
    responses(
        (status = 200, description = "Route deleted", body = DeleteRouteDto),
        (status = 400, description = "Route ID required", body = ErrorDto),
        (status = 401, description = "Not signed in", body = ErrorDto),
        (status = 404, description = "Route not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_route(
    State(state): State<AppState>,
    session: Session,
    query: Result<Query<DeleteRouteQuery>, QueryRejection>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let Query(query) = query.map_err(|_| ValidationError::InvalidInput)?;

    RouteService::new(&state)
        .delete_route(user.id, query.id.as_deref())
        .await?;

    Ok(Json(DeleteRouteDto { success: true }))
}

/// Get a saved route
#[utoipa::path(
    get,
    path = "/api/routes/{id}",
    tag = ROUTE_TAG,
    params(("id" = i32, Path, description = "Route ID")),
    responses(
        (status = 200, description = "The route", body = RouteDto),
        (status = 401, description = "Not signed in", body = ErrorDto),
        (status = 404, description = "Route not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_route(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let route_id = parse_route_id(&id)?;

    let route = RouteService::new(&state).get_route(user.id, route_id).await?;

    Ok(Json(RouteDto::from(route)))
}

/// Get a route bundled for offline viewing
///
/// Includes the route metadata, its geometry decoded into a GeoJSON `LineString` and the
/// bounding box of that geometry.
#[utoipa::path(
    get,
    path = "/api/routes/{id}/offline",
    tag = ROUTE_TAG,
    params(("id" = i32, Path, description = "Route ID")),
    responses(
        (status = 200, description = "The offline route bundle", body = OfflineRouteDto),
        (status = 401, description = "Not signed in", body = ErrorDto),
        (status = 404, description = "Route not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_offline_route(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let route_id = parse_route_id(&id)?;

    let offline = RouteService::new(&state)
        .get_offline_route(user.id, route_id)
        .await?;

    Ok(Json(offline))
}
