use axum::{body::Body, http::Request, http::StatusCode};
use tower::ServiceExt;
use travellersmeet_test_utils::prelude::*;

use crate::util::{body_json, TestSetupExt};

#[tokio::test]
/// Expect the OpenAPI document to list every API path
async fn test_openapi_document() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;

    let request = Request::get("/api/docs/openapi.json")
        .body(Body::empty())
        .unwrap();
    let resp = test.app().oneshot(request).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    let paths = body["paths"].as_object().unwrap();
    for path in [
        "/api/auth/signup",
        "/api/auth/session",
        "/api/tickets",
        "/uploads/{file_name}",
        "/api/admin/tickets/{id}",
        "/api/matches",
        "/api/routes",
        "/api/routes/{id}/offline",
        "/api/chat",
    ] {
        assert!(paths.contains_key(path), "missing {}", path);
    }

    Ok(())
}
