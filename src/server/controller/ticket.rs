use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        ticket::{TicketDto, TicketUploadForm, TicketsDto},
    },
    server::{
        controller::util::get_user::get_user_from_session,
        error::{validation::ValidationError, Error},
        model::app::AppState,
        service::ticket::{TicketService, TicketUpload},
    },
};

pub static TICKET_TAG: &str = "ticket";

/// Reads the ticket upload form, unknown fields are ignored
async fn read_upload(mut multipart: Multipart) -> Result<TicketUpload, ValidationError> {
    let mut upload = TicketUpload::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ValidationError::InvalidInput)?
    {
        let name = field.name().map(str::to_string);

        match name.as_deref() {
            Some("destination") => {
                upload.destination = field.text().await.map_err(|_| ValidationError::InvalidInput)?
            }
            Some("departureDate") => {
                upload.departure_date =
                    field.text().await.map_err(|_| ValidationError::InvalidInput)?
            }
            Some("file") => {
                upload.file_name = field.file_name().map(str::to_string);
                upload.file = field
                    .bytes()
                    .await
                    .map_err(|_| ValidationError::InvalidInput)?
                    .to_vec();
            }
            _ => {}
        }
    }

    Ok(upload)
}

/// Upload a ticket for verification
#[utoipa::path(
    post,
    path = "/api/tickets",
    tag = TICKET_TAG,
    request_body(content = TicketUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Ticket uploaded and pending verification", body = TicketDto),
        (status = 400, description = "Invalid input", body = ErrorDto),
        (status = 401, description = "Not signed in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn upload_ticket(
    State(state): State<AppState>,
    session: Session,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let multipart = multipart.map_err(|_| ValidationError::InvalidInput)?;
    let upload = read_upload(multipart).await?;

    let ticket = TicketService::new(&state).upload(user.id, upload).await?;

    Ok((StatusCode::CREATED, Json(TicketDto::from(ticket))))
}

/// Get the signed in user's tickets
#[utoipa::path(
    get,
    path = "/api/tickets",
    tag = TICKET_TAG,
    responses(
        (status = 200, description = "The user's tickets, newest first", body = TicketsDto),
        (status = 401, description = "Not signed in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_tickets(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let tickets = TicketService::new(&state).get_user_tickets(user.id).await?;

    Ok(Json(TicketsDto {
        tickets: tickets.into_iter().map(TicketDto::from).collect(),
    }))
}

/// Download a stored ticket file
///
/// Available to the ticket's owner and to admins.
#[utoipa::path(
    get,
    path = "/uploads/{file_name}",
    tag = TICKET_TAG,
    params(("file_name" = String, Path, description = "Stored file name from the ticket URL")),
    responses(
        (status = 200, description = "The ticket file", content_type = "application/octet-stream"),
        (status = 401, description = "Not signed in", body = ErrorDto),
        (status = 404, description = "File not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_ticket_file(
    State(state): State<AppState>,
    session: Session,
    Path(file_name): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let file = TicketService::new(&state).get_file(&user, &file_name).await?;

    Ok(([(header::CONTENT_TYPE, file.content_type)], file.bytes))
}
