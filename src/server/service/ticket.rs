use std::path::Path;

use crate::server::{
    data::ticket::TicketRepository,
    error::{validation::ValidationError, Error},
    model::app::AppState,
    util::validate::parse_date,
};

/// Path prefix under which stored ticket files are referenced
pub const UPLOAD_URL_PREFIX: &str = "/uploads/";

/// Maximum number of tickets returned to admins in one listing
const ADMIN_TICKET_LIMIT: u64 = 100;

/// A ticket upload as received from the multipart form
#[derive(Default)]
pub struct TicketUpload {
    pub destination: String,
    pub departure_date: String,
    /// Original name of the uploaded file, used only for its extension
    pub file_name: Option<String>,
    pub file: Vec<u8>,
}

/// A stored ticket file ready to be sent back
pub struct TicketFile {
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

pub struct TicketService<'a> {
    state: &'a AppState,
}

impl<'a> TicketService<'a> {
    /// Creates a new instance of [`TicketService`]
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Stores an uploaded ticket file and creates a `PENDING` ticket for the user
    ///
    /// # Returns
    /// - `Ok(Model)` - The created ticket
    /// - `Err(ValidationError::InvalidInput)` - Blank destination, bad date or missing file
    /// - `Err(Error::IoError)` - The file could not be written
    /// - `Err(Error::DbErr)` - The ticket could not be stored, the written file is removed again
    pub async fn upload(
        &self,
        user_id: i32,
        upload: TicketUpload,
    ) -> Result<entity::ticket::Model, Error> {
        let destination = upload.destination.trim();
        let departure_date =
            parse_date(&upload.departure_date).map_err(|_| ValidationError::InvalidInput)?;

        if destination.is_empty() || upload.file.is_empty() {
            return Err(ValidationError::InvalidInput.into());
        }

        let stored_name = stored_file_name(upload.file_name.as_deref());

        let stored_path = self.state.upload_dir.join(&stored_name);

        tokio::fs::create_dir_all(&self.state.upload_dir).await?;
        tokio::fs::write(&stored_path, &upload.file).await?;

        let ticket_url = format!("{}{}", UPLOAD_URL_PREFIX, stored_name);
        let ticket = match TicketRepository::new(&self.state.db)
            .create(user_id, destination, departure_date, &ticket_url)
            .await
        {
            Ok(ticket) => ticket,
            Err(err) => {
                if let Err(remove_err) = tokio::fs::remove_file(&stored_path).await {
                    tracing::error!(
                        path = %stored_path.display(),
                        "Failed to remove ticket file after insert error: {}",
                        remove_err
                    );
                }

                return Err(err.into());
            }
        };

        tracing::info!(user_id, ticket_id = ticket.id, "Uploaded ticket");

        Ok(ticket)
    }

    /// Gets the user's own tickets, newest first
    pub async fn get_user_tickets(&self, user_id: i32) -> Result<Vec<entity::ticket::Model>, Error> {
        Ok(TicketRepository::new(&self.state.db)
            .get_by_user_id(user_id)
            .await?)
    }

    /// Lists tickets for review, optionally restricted to one status
    ///
    /// # Returns
    /// - `Ok(Vec)` - Up to 100 tickets with their owners, newest first
    /// - `Err(ValidationError::InvalidStatus)` - Unknown status filter
    pub async fn get_review_tickets(
        &self,
        status: Option<&str>,
    ) -> Result<Vec<(entity::ticket::Model, entity::user::Model)>, Error> {
        let status = match status.map(str::trim).filter(|s| !s.is_empty()) {
            Some(status) => Some(parse_status(status)?),
            None => None,
        };

        TicketRepository::new(&self.state.db)
            .get_many_with_user(status, ADMIN_TICKET_LIMIT)
            .await?
            .into_iter()
            .map(with_owner)
            .collect()
    }

    /// Gets a single ticket with its owner
    pub async fn get_review_ticket(
        &self,
        ticket_id: i32,
    ) -> Result<(entity::ticket::Model, entity::user::Model), Error> {
        let ticket = TicketRepository::new(&self.state.db)
            .get_by_id_with_user(ticket_id)
            .await?
            .ok_or_else(|| Error::not_found("Ticket not found"))?;

        with_owner(ticket)
    }

    /// Records an admin's verification decision
    ///
    /// Only `VERIFIED` and `REJECTED` are accepted, a ticket cannot be moved back to pending.
    pub async fn set_status(
        &self,
        ticket_id: i32,
        status: &str,
    ) -> Result<(entity::ticket::Model, entity::user::Model), Error> {
        let status = match parse_status(status)? {
            entity::ticket::TicketStatus::Pending => {
                return Err(ValidationError::InvalidStatus(status.to_string()).into())
            }
            status => status,
        };

        let ticket_repository = TicketRepository::new(&self.state.db);

        if ticket_repository
            .update_status(ticket_id, status)
            .await?
            .is_none()
        {
            return Err(Error::not_found("Ticket not found"));
        }

        tracing::info!(ticket_id, "Updated ticket status");

        self.get_review_ticket(ticket_id).await
    }

    /// Reads a stored ticket file for its owner or an admin
    ///
    /// Files of other users are reported as missing.
    pub async fn get_file(
        &self,
        user: &entity::user::Model,
        file_name: &str,
    ) -> Result<TicketFile, Error> {
        if !is_plain_file_name(file_name) {
            return Err(Error::not_found("File not found"));
        }

        let ticket_url = format!("{}{}", UPLOAD_URL_PREFIX, file_name);
        let ticket = TicketRepository::new(&self.state.db)
            .get_by_ticket_url(&ticket_url)
            .await?
            .filter(|ticket| {
                ticket.user_id == user.id || user.role == entity::user::UserRole::Admin
            })
            .ok_or_else(|| Error::not_found("File not found"))?;

        let bytes = match tokio::fs::read(self.state.upload_dir.join(file_name)).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(ticket_id = ticket.id, "Ticket file missing from upload directory");

                return Err(Error::not_found("File not found"));
            }
            Err(e) => return Err(e.into()),
        };

        Ok(TicketFile {
            content_type: content_type(file_name),
            bytes,
        })
    }
}

fn parse_status(status: &str) -> Result<entity::ticket::TicketStatus, ValidationError> {
    match status {
        "PENDING" => Ok(entity::ticket::TicketStatus::Pending),
        "VERIFIED" => Ok(entity::ticket::TicketStatus::Verified),
        "REJECTED" => Ok(entity::ticket::TicketStatus::Rejected),
        _ => Err(ValidationError::InvalidStatus(status.to_string())),
    }
}

fn with_owner(
    (ticket, user): (entity::ticket::Model, Option<entity::user::Model>),
) -> Result<(entity::ticket::Model, entity::user::Model), Error> {
    match user {
        Some(user) => Ok((ticket, user)),
        None => Err(Error::InternalError(format!(
            "Ticket {} has no owner despite the foreign key",
            ticket.id
        ))),
    }
}

/// Random file name keeping a short alphanumeric extension of the original
fn stored_file_name(original: Option<&str>) -> String {
    let id = uuid::Uuid::new_v4();

    let extension = original
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| (1..=8).contains(&ext.len()) && ext.bytes().all(|b| b.is_ascii_alphanumeric()))
        .map(str::to_ascii_lowercase);

    match extension {
        Some(extension) => format!("{}.{}", id, extension),
        None => id.to_string(),
    }
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'.')
        && !name.starts_with('.')
}

fn content_type(file_name: &str) -> &'static str {
    match Path::new(file_name).extension().and_then(|ext| ext.to_str()) {
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}
