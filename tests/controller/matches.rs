use axum::{
    body::Body,
    extract::{rejection::QueryRejection, Query, State},
    http::{header, Request, StatusCode},
    response::IntoResponse,
};
use chrono::NaiveDate;
use tower::ServiceExt;
use travellersmeet::{
    model::ticket::MatchQuery, server::controller::matches::get_matches,
    server::model::session::user::SessionUserId,
};
use travellersmeet_test_utils::prelude::*;

use crate::util::{body_json, sign_in, TestSetupExt};

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 7, day).unwrap()
}

fn query(
    destination: Option<&str>,
    date: Option<&str>,
) -> Result<Query<MatchQuery>, QueryRejection> {
    Ok(Query(MatchQuery {
        destination: destination.map(str::to_string),
        date: date.map(str::to_string),
    }))
}

#[tokio::test]
/// Expect other travellers' verified tickets within three days, ordered by departure
async fn test_get_matches_success() -> Result<(), TestError> {
    let mut test = test_setup_with_tables!(entity::prelude::User, entity::prelude::Ticket)?;
    let user = test.user().insert_verified_user("ada@example.com").await?;
    let other = test.user().insert_verified_user("bob@example.com").await?;

    let later = test
        .ticket()
        .insert_ticket(other.id, "Lisbon, Portugal", date(13), TicketStatus::Verified)
        .await?;
    let earlier = test
        .ticket()
        .insert_ticket(other.id, "LISBON", date(7), TicketStatus::Verified)
        .await?;
    // Outside the window, not verified or owned by the requester
    test.ticket()
        .insert_ticket(other.id, "Lisbon", date(14), TicketStatus::Verified)
        .await?;
    test.ticket()
        .insert_ticket(other.id, "Lisbon", date(10), TicketStatus::Pending)
        .await?;
    test.ticket()
        .insert_ticket(user.id, "Lisbon", date(10), TicketStatus::Verified)
        .await?;
    SessionUserId::insert(&test.session, user.id).await.unwrap();

    let result = get_matches(
        State(test.app_state()),
        test.session.clone(),
        query(Some("lisbon"), Some("2026-07-10")),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    let matches = body["matches"].as_array().unwrap();
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0]["id"], earlier.id);
    assert_eq!(matches[1]["id"], later.id);
    assert_eq!(matches[0]["user"]["name"], "bob");
    assert!(matches[0]["user"].get("email").is_none());

    Ok(())
}

#[tokio::test]
/// Expect 400 when a parameter is missing, blank or the date is malformed
async fn test_get_matches_bad_request() -> Result<(), TestError> {
    let mut test = test_setup_with_tables!(entity::prelude::User, entity::prelude::Ticket)?;
    let user = test.user().insert_verified_user("ada@example.com").await?;
    SessionUserId::insert(&test.session, user.id).await.unwrap();
    let state = test.app_state();

    let cases = [
        (None, Some("2026-07-10")),
        (Some("Lisbon"), None),
        (Some("  "), Some("2026-07-10")),
        (Some("Lisbon"), Some("July 10th")),
    ];

    for (destination, day) in cases {
        let result = get_matches(
            State(state.clone()),
            test.session.clone(),
            query(destination, day),
        )
        .await;

        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    Ok(())
}

#[tokio::test]
/// Expect 401 when nobody is signed in
async fn test_get_matches_unauthorized() -> Result<(), TestError> {
    let test = test_setup_with_tables!(entity::prelude::User, entity::prelude::Ticket)?;

    let result = get_matches(
        State(test.app_state()),
        test.session.clone(),
        query(Some("Lisbon"), Some("2026-07-10")),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
/// Expect an undecodable query to get a JSON 401 without a session and a JSON 400 with one
async fn test_get_matches_malformed_query() -> Result<(), TestError> {
    let mut test = test_setup_with_tables!(entity::prelude::User, entity::prelude::Ticket)?;
    test.user().insert_verified_user("ada@example.com").await?;
    let app = test.app();
    let cookie = sign_in(&app, "ada@example.com").await;
    let uri = "/api/matches?destination=Lisbon&destination=Porto&date=2026-07-10";

    let anonymous = Request::get(uri).body(Body::empty()).unwrap();
    let resp = app.clone().oneshot(anonymous).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(body_json(resp).await["error"].is_string());

    let signed_in = Request::get(uri)
        .header(header::COOKIE, &cookie)
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(signed_in).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"], "Invalid input");

    Ok(())
}
