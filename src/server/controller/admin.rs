use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        ticket::{
            AdminTicketDto, AdminTicketQuery, AdminTicketResponseDto, AdminTicketsDto,
            UpdateTicketStatusRequest,
        },
    },
    server::{
        controller::util::get_user::require_admin,
        error::{validation::ValidationError, Error},
        model::app::AppState,
        service::ticket::TicketService,
    },
};

pub static ADMIN_TAG: &str = "admin";

/// Parses a ticket ID path segment, IDs that cannot exist are reported as not found
fn parse_ticket_id(id: &str) -> Result<i32, Error> {
    id.parse::<i32>()
        .map_err(|_| Error::not_found("Ticket not found"))
}

/// List tickets for review
#[utoipa::path(
    get,
    path = "/api/admin/tickets",
    tag = ADMIN_TAG,
    params(AdminTicketQuery),
    responses(
        (status = 200, description = "Up to 100 tickets with their owners, newest first", body = AdminTicketsDto),
        (status = 400, description = "Unknown status filter", body = ErrorDto),
        (status = 401, description = "Not signed in", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_review_tickets(
    State(state): State<AppState>,
    session: Session,
    query: Result<Query<AdminTicketQuery>, QueryRejection>,
) -> Result<impl IntoResponse, Error> {
    require_admin(&state, &session).await?;
    let Query(query) = query.map_err(|_| ValidationError::InvalidInput)?;

    let tickets = TicketService::new(&state)
        .get_review_tickets(query.status.as_deref())
        .await?;

    Ok(Json(AdminTicketsDto {
        tickets: tickets.into_iter().map(AdminTicketDto::from).collect(),
    }))
}

/// Get a single ticket for review
#[utoipa::path(
    get,
    path = "/api/admin/tickets/{id}",
    tag = ADMIN_TAG,
    params(("id" = i32, Path, description = "Ticket ID")),
    responses(
        (status = 200, description = "The ticket with its owner", body = AdminTicketResponseDto),
        (status = 401, description = "Not signed in", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Ticket not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_review_ticket(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, Error> {
    require_admin(&state, &session).await?;
    let ticket_id = parse_ticket_id(&id)?;

    let ticket = TicketService::new(&state)
        .get_review_ticket(ticket_id)
        .await?;

    Ok(Json(AdminTicketResponseDto {
        ok: None,
        ticket: ticket.into(),
    }))
}

/// Verify or reject a ticket
#[utoipa::path(
    patch,
    path = "/api/admin/tickets/{id}",
    tag = ADMIN_TAG,
    params(("id" = i32, Path, description = "Ticket ID")),
    request_body = UpdateTicketStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = AdminTicketResponseDto),
        (status = 400, description = "Status is not VERIFIED or REJECTED", body = ErrorDto),
        (status = 401, description = "Not signed in", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Ticket not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_ticket_status(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTicketStatusRequest>, JsonRejection>,
) -> Result<impl IntoResponse, Error> {
    let admin = require_admin(&state, &session).await?;
    let ticket_id = parse_ticket_id(&id)?;
    let Json(request) = payload.map_err(|_| ValidationError::InvalidStatus(String::new()))?;

    let ticket = TicketService::new(&state)
        .set_status(ticket_id, &request.status)
        .await?;

    tracing::info!(
        admin_id = admin.id,
        ticket_id,
        status = %request.status,
        "Ticket reviewed"
    );

    Ok(Json(AdminTicketResponseDto {
        ok: Some(true),
        ticket: ticket.into(),
    }))
}
