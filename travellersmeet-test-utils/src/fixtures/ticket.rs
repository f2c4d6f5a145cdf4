use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestSetup};

impl TestSetup {
    pub fn ticket<'a>(&'a mut self) -> TicketFixtures<'a> {
        TicketFixtures { setup: self }
    }
}

pub struct TicketFixtures<'a> {
    pub setup: &'a mut TestSetup,
}

impl<'a> TicketFixtures<'a> {
    /// Inserts a ticket for the user with the given status
    pub async fn insert_ticket(
        &mut self,
        user_id: i32,
        destination: &str,
        departure_date: NaiveDate,
        status: entity::ticket::TicketStatus,
    ) -> Result<entity::ticket::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::Ticket::insert(entity::ticket::ActiveModel {
                user_id: ActiveValue::Set(user_id),
                destination: ActiveValue::Set(destination.to_string()),
                destination_key: ActiveValue::Set(destination.to_lowercase()),
                departure_date: ActiveValue::Set(departure_date),
                ticket_url: ActiveValue::Set("/uploads/fixture.pdf".to_string()),
                status: ActiveValue::Set(status),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.state.db)
            .await?,
        )
    }
}
