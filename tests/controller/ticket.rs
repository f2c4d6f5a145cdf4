use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    response::IntoResponse,
};
use chrono::NaiveDate;
use tower::ServiceExt;
use travellersmeet::server::{
    controller::ticket::get_tickets, model::session::user::SessionUserId,
};
use travellersmeet_test_utils::prelude::*;

use crate::util::{
    body_bytes, body_json, multipart_body, sign_in, Part, TestSetupExt, MULTIPART_BOUNDARY,
};

static TICKET_BYTES: &[u8] = b"%PDF-1.4 boarding pass";

fn upload_request(cookie: Option<&str>, parts: &[Part<'_>]) -> Request<Body> {
    let mut request = Request::post("/api/tickets").header(
        header::CONTENT_TYPE,
        format!("multipart/form-data; boundary={}", MULTIPART_BOUNDARY),
    );
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }

    request.body(Body::from(multipart_body(parts))).unwrap()
}

fn ticket_parts<'a>(destination: &'a str, date: &'a str) -> Vec<Part<'a>> {
    vec![
        Part {
            name: "destination",
            file: None,
            data: destination.as_bytes(),
        },
        Part {
            name: "departureDate",
            file: None,
            data: date.as_bytes(),
        },
        Part {
            name: "file",
            file: Some(("ticket.pdf", "application/pdf")),
            data: TICKET_BYTES,
        },
    ]
}

#[tokio::test]
/// Expect 201 with a pending ticket and the file to be downloadable by its owner
async fn test_upload_ticket_success() -> Result<(), TestError> {
    let mut test = test_setup_with_tables!(entity::prelude::User, entity::prelude::Ticket)?;
    test.user().insert_verified_user("ada@example.com").await?;
    let app = test.app();
    let cookie = sign_in(&app, "ada@example.com").await;

    let resp = app
        .clone()
        .oneshot(upload_request(
            Some(&cookie),
            &ticket_parts("Lisbon", "2026-07-01"),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    assert_eq!(body["destination"], "Lisbon");
    assert_eq!(body["departureDate"], "2026-07-01");
    assert_eq!(body["status"], "PENDING");

    let ticket_url = body["ticketUrl"].as_str().unwrap().to_string();
    assert!(ticket_url.starts_with("/uploads/"));
    assert!(ticket_url.ends_with(".pdf"));

    let request = Request::get(&ticket_url)
        .header(header::COOKIE, &cookie)
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(request).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_bytes(resp).await, TICKET_BYTES);

    Ok(())
}

#[tokio::test]
/// Expect 400 for a blank destination, a bad date or a missing file
async fn test_upload_ticket_invalid_input() -> Result<(), TestError> {
    let mut test = test_setup_with_tables!(entity::prelude::User, entity::prelude::Ticket)?;
    test.user().insert_verified_user("ada@example.com").await?;
    let app = test.app();
    let cookie = sign_in(&app, "ada@example.com").await;

    let blank_destination = ticket_parts("  ", "2026-07-01");
    let bad_date = ticket_parts("Lisbon", "01/07/2026");
    let mut missing_file = ticket_parts("Lisbon", "2026-07-01");
    missing_file.pop();

    for parts in [blank_destination, bad_date, missing_file] {
        let resp = app
            .clone()
            .oneshot(upload_request(Some(&cookie), &parts))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await["error"], "Invalid input");
    }

    Ok(())
}

#[tokio::test]
/// Expect 401 when uploading without a session
async fn test_upload_ticket_unauthorized() -> Result<(), TestError> {
    let test = test_setup_with_tables!(entity::prelude::User, entity::prelude::Ticket)?;
    let app = test.app();

    let resp = app
        .oneshot(upload_request(None, &ticket_parts("Lisbon", "2026-07-01")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
/// Expect a non-multipart body to get a JSON 401 without a session and a JSON 400 with one
async fn test_upload_ticket_not_multipart() -> Result<(), TestError> {
    let mut test = test_setup_with_tables!(entity::prelude::User, entity::prelude::Ticket)?;
    test.user().insert_verified_user("ada@example.com").await?;
    let app = test.app();
    let cookie = sign_in(&app, "ada@example.com").await;

    let json_request = |cookie: Option<&str>| {
        let mut request =
            Request::post("/api/tickets").header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        request.body(Body::from("{}")).unwrap()
    };

    let resp = app.clone().oneshot(json_request(None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(body_json(resp).await["error"].is_string());

    let resp = app.oneshot(json_request(Some(&cookie))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"], "Invalid input");

    Ok(())
}

#[tokio::test]
/// Expect only the session user's tickets, newest first
async fn test_get_tickets_success() -> Result<(), TestError> {
    let mut test = test_setup_with_tables!(entity::prelude::User, entity::prelude::Ticket)?;
    let user = test.user().insert_verified_user("ada@example.com").await?;
    let other = test.user().insert_verified_user("bob@example.com").await?;
    let date = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
    let first = test
        .ticket()
        .insert_ticket(user.id, "Lisbon", date, TicketStatus::Pending)
        .await?;
    let second = test
        .ticket()
        .insert_ticket(user.id, "Porto", date, TicketStatus::Verified)
        .await?;
    test.ticket()
        .insert_ticket(other.id, "Lisbon", date, TicketStatus::Verified)
        .await?;
    SessionUserId::insert(&test.session, user.id).await.unwrap();

    let result = get_tickets(State(test.app_state()), test.session.clone()).await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    let ids: Vec<i64> = body["tickets"]
        .as_array()
        .unwrap()
        .iter()
        .map(|ticket| ticket["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![second.id as i64, first.id as i64]);

    Ok(())
}

#[tokio::test]
/// Expect 404 when another user requests a ticket file
async fn test_get_ticket_file_not_owner() -> Result<(), TestError> {
    let mut test = test_setup_with_tables!(entity::prelude::User, entity::prelude::Ticket)?;
    test.user().insert_verified_user("ada@example.com").await?;
    test.user().insert_verified_user("bob@example.com").await?;
    let app = test.app();
    let owner_cookie = sign_in(&app, "ada@example.com").await;
    let other_cookie = sign_in(&app, "bob@example.com").await;

    let resp = app
        .clone()
        .oneshot(upload_request(
            Some(&owner_cookie),
            &ticket_parts("Lisbon", "2026-07-01"),
        ))
        .await
        .unwrap();
    let ticket_url = body_json(resp).await["ticketUrl"]
        .as_str()
        .unwrap()
        .to_string();

    let request = Request::get(&ticket_url)
        .header(header::COOKIE, other_cookie)
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(request).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}
