use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::model::user::{TicketOwnerDto, TravellerDto};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum TicketStatusDto {
    Pending,
    Verified,
    Rejected,
}

impl From<entity::ticket::TicketStatus> for TicketStatusDto {
    fn from(status: entity::ticket::TicketStatus) -> Self {
        match status {
            entity::ticket::TicketStatus::Pending => Self::Pending,
            entity::ticket::TicketStatus::Verified => Self::Verified,
            entity::ticket::TicketStatus::Rejected => Self::Rejected,
        }
    }
}

impl From<TicketStatusDto> for entity::ticket::TicketStatus {
    fn from(status: TicketStatusDto) -> Self {
        match status {
            TicketStatusDto::Pending => Self::Pending,
            TicketStatusDto::Verified => Self::Verified,
            TicketStatusDto::Rejected => Self::Rejected,
        }
    }
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TicketDto {
    pub id: i32,
    pub user_id: i32,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub ticket_url: String,
    pub status: TicketStatusDto,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<entity::ticket::Model> for TicketDto {
    fn from(ticket: entity::ticket::Model) -> Self {
        Self {
            id: ticket.id,
            user_id: ticket.user_id,
            destination: ticket.destination,
            departure_date: ticket.departure_date,
            ticket_url: ticket.ticket_url,
            status: ticket.status.into(),
            created_at: ticket.created_at,
            updated_at: ticket.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct TicketsDto {
    pub tickets: Vec<TicketDto>,
}

/// Multipart body of `POST /api/tickets`, only used for the API documentation
#[derive(utoipa::ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct TicketUploadForm {
    pub destination: String,
    /// `YYYY-MM-DD`
    pub departure_date: String,
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

/// A verified ticket of another traveller returned by the matching endpoint
#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchDto {
    #[serde(flatten)]
    pub ticket: TicketDto,
    pub user: TravellerDto,
}

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct MatchesDto {
    pub matches: Vec<MatchDto>,
}

/// A ticket together with its owner, as reviewed by admins
#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminTicketDto {
    #[serde(flatten)]
    pub ticket: TicketDto,
    pub user: TicketOwnerDto,
}

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct AdminTicketsDto {
    pub tickets: Vec<AdminTicketDto>,
}

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct AdminTicketResponseDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ok: Option<bool>,
    pub ticket: AdminTicketDto,
}

#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MatchQuery {
    pub destination: Option<String>,
    pub date: Option<String>,
}

#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AdminTicketQuery {
    pub status: Option<String>,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateTicketStatusRequest {
    pub status: String,
}

impl From<(entity::ticket::Model, entity::user::Model)> for MatchDto {
    fn from((ticket, user): (entity::ticket::Model, entity::user::Model)) -> Self {
        Self {
            ticket: ticket.into(),
            user: user.into(),
        }
    }
}

impl From<(entity::ticket::Model, entity::user::Model)> for AdminTicketDto {
    fn from((ticket, user): (entity::ticket::Model, entity::user::Model)) -> Self {
        Self {
            ticket: ticket.into(),
            user: user.into(),
        }
    }
}
