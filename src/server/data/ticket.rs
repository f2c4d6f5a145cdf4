use chrono::{NaiveDate, Utc};
use sea_orm::{
    sea_query::LikeExpr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};

/// Escape character used in `LIKE` patterns built from user input
const LIKE_ESCAPE: char = '\\';

pub struct TicketRepository<'a> {
    db: &'a DatabaseConnection,
}

/// Filters for the matching query
pub struct MatchCriteria<'a> {
    /// Lower-cased destination fragment
    pub destination_key: &'a str,
    /// Earliest departure date, inclusive
    pub start: NaiveDate,
    /// Latest departure date, inclusive
    pub end: NaiveDate,
    /// Requesting user, whose own tickets are excluded
    pub exclude_user_id: i32,
    pub limit: u64,
}

impl<'a> TicketRepository<'a> {
    /// Creates a new instance of [`TicketRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new ticket with `PENDING` status
    pub async fn create(
        &self,
        user_id: i32,
        destination: &str,
        departure_date: NaiveDate,
        ticket_url: &str,
    ) -> Result<entity::ticket::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let ticket = entity::ticket::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            destination: ActiveValue::Set(destination.to_string()),
            destination_key: ActiveValue::Set(destination.to_lowercase()),
            departure_date: ActiveValue::Set(departure_date),
            ticket_url: ActiveValue::Set(ticket_url.to_string()),
            status: ActiveValue::Set(entity::ticket::TicketStatus::Pending),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        ticket.insert(self.db).await
    }

    pub async fn get_by_id(&self, ticket_id: i32) -> Result<Option<entity::ticket::Model>, DbErr> {
        entity::prelude::Ticket::find_by_id(ticket_id)
            .one(self.db)
            .await
    }

    /// Gets a ticket together with the user who uploaded it
    pub async fn get_by_id_with_user(
        &self,
        ticket_id: i32,
    ) -> Result<Option<(entity::ticket::Model, Option<entity::user::Model>)>, DbErr> {
        entity::prelude::Ticket::find_by_id(ticket_id)
            .find_also_related(entity::prelude::User)
            .one(self.db)
            .await
    }

    /// Finds the ticket referencing a stored upload
    pub async fn get_by_ticket_url(
        &self,
        ticket_url: &str,
    ) -> Result<Option<entity::ticket::Model>, DbErr> {
        entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::TicketUrl.eq(ticket_url))
            .one(self.db)
            .await
    }

    /// Gets all tickets uploaded by a user, newest first
    pub async fn get_by_user_id(&self, user_id: i32) -> Result<Vec<entity::ticket::Model>, DbErr> {
        entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::UserId.eq(user_id))
            .order_by_desc(entity::ticket::Column::CreatedAt)
            .order_by_desc(entity::ticket::Column::Id)
            .all(self.db)
            .await
    }

    /// Gets tickets with their uploaders for review, newest first, optionally by status
    pub async fn get_many_with_user(
        &self,
        status: Option<entity::ticket::TicketStatus>,
        limit: u64,
    ) -> Result<Vec<(entity::ticket::Model, Option<entity::user::Model>)>, DbErr> {
        let mut query = entity::prelude::Ticket::find();

        if let Some(status) = status {
            query = query.filter(entity::ticket::Column::Status.eq(status));
        }

        query
            .order_by_desc(entity::ticket::Column::CreatedAt)
            .order_by_desc(entity::ticket::Column::Id)
            .limit(limit)
            .find_also_related(entity::prelude::User)
            .all(self.db)
            .await
    }

    /// Updates the verification status of a ticket
    ///
    /// Returns `None` if the ticket does not exist.
    pub async fn update_status(
        &self,
        ticket_id: i32,
        status: entity::ticket::TicketStatus,
    ) -> Result<Option<entity::ticket::Model>, DbErr> {
        let Some(ticket) = self.get_by_id(ticket_id).await? else {
            return Ok(None);
        };

        let mut ticket: entity::ticket::ActiveModel = ticket.into();
        ticket.status = ActiveValue::Set(status);
        ticket.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        Ok(Some(ticket.update(self.db).await?))
    }

    /// Finds other travellers' verified tickets heading to a destination within a date window
    ///
    /// The destination key is matched as a literal substring, `LIKE` wildcards in it only match
    /// themselves. Results are ordered by departure date and include the uploader.
    pub async fn find_matches(
        &self,
        criteria: MatchCriteria<'_>,
    ) -> Result<Vec<(entity::ticket::Model, Option<entity::user::Model>)>, DbErr> {
        entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::Status.eq(entity::ticket::TicketStatus::Verified))
            .filter(entity::ticket::Column::DestinationKey.like(
                LikeExpr::new(format!("%{}%", escape_like(criteria.destination_key)))
                    .escape(LIKE_ESCAPE),
            ))
            .filter(entity::ticket::Column::DepartureDate.between(criteria.start, criteria.end))
            .filter(entity::ticket::Column::UserId.ne(criteria.exclude_user_id))
            .order_by_asc(entity::ticket::Column::DepartureDate)
            .order_by_asc(entity::ticket::Column::Id)
            .limit(criteria.limit)
            .find_also_related(entity::prelude::User)
            .all(self.db)
            .await
    }
}

/// Escapes `LIKE` wildcards and the escape character itself
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for c in value.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }

    escaped
}
