//! HTTP routing and OpenAPI documentation configuration.
//!
//! This module defines the application's HTTP routes and generates OpenAPI documentation
//! using utoipa. All API endpoints are registered here with their OpenAPI specifications,
//! and Swagger UI is configured to provide interactive API documentation at `/api/docs`.

use axum::{extract::DefaultBodyLimit, Router};
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Largest accepted request body, sized for ticket uploads
pub const MAX_BODY_SIZE: usize = 10 * 1024 * 1024;

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
///
/// # Registered Endpoints
/// - `POST /api/auth/signup`, `/signin`, `/signout`, `/resend-otp`, `/verify-otp`
/// - `GET /api/auth/session` - Get the signed in user
/// - `POST /api/tickets`, `GET /api/tickets` - Upload and list the user's tickets
/// - `GET /uploads/{file_name}` - Download a stored ticket file
/// - `GET /api/admin/tickets`, `GET|PATCH /api/admin/tickets/{id}` - Ticket review
/// - `GET /api/matches` - Find travellers with overlapping trips
/// - `GET|POST|DELETE /api/routes`, `GET /api/routes/{id}`, `GET /api/routes/{id}/offline`
/// - `POST /api/chat` - Ask the assistant
///
/// The OpenAPI specification is available at `/api/docs/openapi.json`.
///
/// # Returns
/// An Axum `Router<AppState>` with all routes registered, ready for state and the session layer.
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "travellersmeet", description = "travellersmeet API"), tags(
        (name = controller::auth::AUTH_TAG, description = "Authentication API routes"),
        (name = controller::ticket::TICKET_TAG, description = "Ticket upload API routes"),
        (name = controller::admin::ADMIN_TAG, description = "Ticket review API routes"),
        (name = controller::matches::MATCH_TAG, description = "Traveller matching API routes"),
        (name = controller::route::ROUTE_TAG, description = "Saved route API routes"),
        (name = controller::chat::CHAT_TAG, description = "Assistant API routes"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::auth::signup))
        .routes(routes!(controller::auth::signin))
        .routes(routes!(controller::auth::signout))
        .routes(routes!(controller::auth::get_session))
        .routes(routes!(controller::auth::resend_otp))
        .routes(routes!(controller::auth::verify_otp))
        .routes(routes!(
            controller::ticket::upload_ticket,
            controller::ticket::get_tickets
        ))
        .routes(routes!(controller::ticket::get_ticket_file))
        .routes(routes!(controller::admin::get_review_tickets))
        .routes(routes!(
            controller::admin::get_review_ticket,
            controller::admin::update_ticket_status
        ))
        .routes(routes!(controller::matches::get_matches))
        .routes(routes!(
            controller::route::get_routes,
            controller::route::save_route,
            controller::route::delete_route
        ))
        .routes(routes!(controller::route::get_route))
        .routes(routes!(controller::route::get_offline_route))
        .routes(routes!(controller::chat::chat))
        .split_for_parts();

    routes
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
}
