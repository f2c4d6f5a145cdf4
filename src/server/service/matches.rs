use chrono::Duration;

use crate::server::{
    data::ticket::{MatchCriteria, TicketRepository},
    error::{validation::ValidationError, Error},
    model::app::AppState,
    util::validate::parse_date,
};

/// Days before and after the requested date that still count as travelling together
pub const MATCH_WINDOW_DAYS: i64 = 3;

/// Maximum number of matches returned
pub const MATCH_LIMIT: u64 = 20;

pub struct MatchService<'a> {
    state: &'a AppState,
}

impl<'a> MatchService<'a> {
    /// Creates a new instance of [`MatchService`]
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Finds other travellers' verified tickets to a destination around a date
    ///
    /// The destination matches case-insensitively as a substring, the window spans
    /// [`MATCH_WINDOW_DAYS`] either side of `date` inclusive.
    ///
    /// # Returns
    /// - `Ok(Vec)` - Up to [`MATCH_LIMIT`] tickets with their owners, by departure date
    /// - `Err(ValidationError::MissingMatchParameters)` - Destination or date missing or blank
    /// - `Err(ValidationError::InvalidDate)` - Date is not a valid date or its window leaves the calendar range
    pub async fn find_matches(
        &self,
        user_id: i32,
        destination: Option<&str>,
        date: Option<&str>,
    ) -> Result<Vec<(entity::ticket::Model, entity::user::Model)>, Error> {
        let destination = destination.map(str::trim).filter(|d| !d.is_empty());
        let date = date.map(str::trim).filter(|d| !d.is_empty());

        let (Some(destination), Some(date)) = (destination, date) else {
            return Err(ValidationError::MissingMatchParameters.into());
        };

        let raw_date = date;
        let date = parse_date(raw_date)?;
        let window = Duration::days(MATCH_WINDOW_DAYS);
        let (Some(start), Some(end)) = (
            date.checked_sub_signed(window),
            date.checked_add_signed(window),
        ) else {
            return Err(ValidationError::InvalidDate(raw_date.to_string()).into());
        };
        let destination_key = destination.to_lowercase();

        let matches = TicketRepository::new(&self.state.db)
            .find_matches(MatchCriteria {
                destination_key: &destination_key,
                start,
                end,
                exclude_user_id: user_id,
                limit: MATCH_LIMIT,
            })
            .await?;

        tracing::debug!(user_id, count = matches.len(), "Found ticket matches");

        Ok(matches
            .into_iter()
            .filter_map(|(ticket, user)| user.map(|user| (ticket, user)))
            .collect())
    }
}
