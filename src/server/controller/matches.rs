use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        ticket::{MatchDto, MatchQuery, MatchesDto},
    },
    server::{
        controller::util::get_user::get_user_from_session,
        error::{validation::ValidationError, Error},
        model::app::AppState,
        service::matches::MatchService,
    },
};

pub static MATCH_TAG: &str = "matches";

/// Find travellers heading to the same destination around the same date
///
/// Returns other users' verified tickets whose destination contains the query, departing
/// within three days of `date`.
#[utoipa::path(
    get,
    path = "/api/matches",
    tag = MATCH_TAG,
    params(MatchQuery),
    responses(
        (status = 200, description = "Matching tickets ordered by departure date", body = MatchesDto),
        (status = 400, description = "Missing or invalid query parameters", body = ErrorDto),
        (status = 401, description = "Not signed in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_matches(
    State(state): State<AppState>,
    session: Session,
    query: Result<Query<MatchQuery>, QueryRejection>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    let Query(query) = query.map_err(|_| ValidationError::InvalidInput)?;

    let matches = MatchService::new(&state)
        .find_matches(user.id, query.destination.as_deref(), query.date.as_deref())
        .await?;

    Ok(Json(MatchesDto {
        matches: matches.into_iter().map(MatchDto::from).collect(),
    }))
}
