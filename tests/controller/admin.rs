use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use travellersmeet::{
    model::ticket::{AdminTicketQuery, UpdateTicketStatusRequest},
    server::{
        controller::admin::{get_review_ticket, get_review_tickets, update_ticket_status},
        data::ticket::TicketRepository,
        model::session::user::SessionUserId,
    },
};
use travellersmeet_test_utils::prelude::*;

use crate::util::{body_json, TestSetupExt};

fn departure() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 7, 1).unwrap()
}

fn status_request(status: &str) -> UpdateTicketStatusRequest {
    UpdateTicketStatusRequest {
        status: status.to_string(),
    }
}

#[tokio::test]
/// Expect 401 without a session and 403 for a regular user
async fn test_get_review_tickets_requires_admin() -> Result<(), TestError> {
    let mut test = test_setup_with_tables!(entity::prelude::User, entity::prelude::Ticket)?;
    let user = test.user().insert_verified_user("ada@example.com").await?;
    let state = test.app_state();

    let anonymous = get_review_tickets(
        State(state.clone()),
        test.session.clone(),
        Ok(Query(AdminTicketQuery { status: None })),
    )
    .await;
    assert_eq!(
        anonymous.err().unwrap().into_response().status(),
        StatusCode::UNAUTHORIZED
    );

    SessionUserId::insert(&test.session, user.id).await.unwrap();
    let regular = get_review_tickets(
        State(state),
        test.session.clone(),
        Ok(Query(AdminTicketQuery { status: None })),
    )
    .await;
    assert_eq!(
        regular.err().unwrap().into_response().status(),
        StatusCode::FORBIDDEN
    );

    Ok(())
}

#[tokio::test]
/// Expect tickets filtered by status, each with its owner's email
async fn test_get_review_tickets_filter() -> Result<(), TestError> {
    let mut test = test_setup_with_tables!(entity::prelude::User, entity::prelude::Ticket)?;
    let admin = test.user().insert_admin("admin@example.com").await?;
    let user = test.user().insert_verified_user("ada@example.com").await?;
    let pending = test
        .ticket()
        .insert_ticket(user.id, "Lisbon", departure(), TicketStatus::Pending)
        .await?;
    test.ticket()
        .insert_ticket(user.id, "Porto", departure(), TicketStatus::Verified)
        .await?;
    SessionUserId::insert(&test.session, admin.id).await.unwrap();

    let result = get_review_tickets(
        State(test.app_state()),
        test.session.clone(),
        Ok(Query(AdminTicketQuery {
            status: Some("PENDING".to_string()),
        })),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    let tickets = body["tickets"].as_array().unwrap();
    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0]["id"], pending.id);
    assert_eq!(tickets[0]["user"]["email"], "ada@example.com");

    Ok(())
}

#[tokio::test]
/// Expect 400 for an unknown status filter
async fn test_get_review_tickets_invalid_status() -> Result<(), TestError> {
    let mut test = test_setup_with_tables!(entity::prelude::User, entity::prelude::Ticket)?;
    let admin = test.user().insert_admin("admin@example.com").await?;
    SessionUserId::insert(&test.session, admin.id).await.unwrap();

    let result = get_review_tickets(
        State(test.app_state()),
        test.session.clone(),
        Ok(Query(AdminTicketQuery {
            status: Some("LOST".to_string()),
        })),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
/// Expect 404 for a missing or non-numeric ticket ID
async fn test_get_review_ticket_not_found() -> Result<(), TestError> {
    let mut test = test_setup_with_tables!(entity::prelude::User, entity::prelude::Ticket)?;
    let admin = test.user().insert_admin("admin@example.com").await?;
    SessionUserId::insert(&test.session, admin.id).await.unwrap();
    let state = test.app_state();

    for id in ["42", "abc"] {
        let result = get_review_ticket(
            State(state.clone()),
            test.session.clone(),
            Path(id.to_string()),
        )
        .await;

        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    Ok(())
}

#[tokio::test]
/// Expect the ticket to be verified and returned with `ok`
async fn test_update_ticket_status_success() -> Result<(), TestError> {
    let mut test = test_setup_with_tables!(entity::prelude::User, entity::prelude::Ticket)?;
    let admin = test.user().insert_admin("admin@example.com").await?;
    let user = test.user().insert_verified_user("ada@example.com").await?;
    let ticket = test
        .ticket()
        .insert_ticket(user.id, "Lisbon", departure(), TicketStatus::Pending)
        .await?;
    SessionUserId::insert(&test.session, admin.id).await.unwrap();
    let state = test.app_state();

    let result = update_ticket_status(
        State(state.clone()),
        test.session.clone(),
        Path(ticket.id.to_string()),
        Ok(Json(status_request("VERIFIED"))),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    assert_eq!(body["ok"], true);
    assert_eq!(body["ticket"]["status"], "VERIFIED");

    let stored = TicketRepository::new(&state.db)
        .get_by_id(ticket.id)
        .await?
        .unwrap();
    assert_eq!(stored.status, TicketStatus::Verified);

    Ok(())
}

#[tokio::test]
/// Expect 400 for statuses other than VERIFIED or REJECTED
async fn test_update_ticket_status_invalid() -> Result<(), TestError> {
    let mut test = test_setup_with_tables!(entity::prelude::User, entity::prelude::Ticket)?;
    let admin = test.user().insert_admin("admin@example.com").await?;
    let user = test.user().insert_verified_user("ada@example.com").await?;
    let ticket = test
        .ticket()
        .insert_ticket(user.id, "Lisbon", departure(), TicketStatus::Verified)
        .await?;
    SessionUserId::insert(&test.session, admin.id).await.unwrap();
    let state = test.app_state();

    for status in ["PENDING", "verified", "LOST"] {
        let result = update_ticket_status(
            State(state.clone()),
            test.session.clone(),
            Path(ticket.id.to_string()),
            Ok(Json(status_request(status))),
        )
        .await;

        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", status);
    }

    Ok(())
}

#[tokio::test]
/// Expect 404 when updating a ticket that does not exist
async fn test_update_ticket_status_not_found() -> Result<(), TestError> {
    let mut test = test_setup_with_tables!(entity::prelude::User, entity::prelude::Ticket)?;
    let admin = test.user().insert_admin("admin@example.com").await?;
    SessionUserId::insert(&test.session, admin.id).await.unwrap();

    let result = update_ticket_status(
        State(test.app_state()),
        test.session.clone(),
        Path("42".to_string()),
        Ok(Json(status_request("REJECTED"))),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}
