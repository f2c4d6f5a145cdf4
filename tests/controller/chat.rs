use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use travellersmeet::server::controller::chat::chat;
use travellersmeet_test_utils::prelude::*;

use crate::util::{body_json, TestSetupExt};

static GENERATE_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

#[tokio::test]
/// Expect the first candidate's text as the reply
async fn test_chat_success() -> Result<(), TestError> {
    let mut test = test_setup_with_tables!()?;
    let endpoint = test
        .server
        .mock("POST", GENERATE_PATH)
        .match_header("x-goog-api-key", TEST_GEMINI_API_KEY)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"candidates":[{"content":{"parts":[{"text":"Upload your ticket first."}]}}]})
                .to_string(),
        )
        .create_async()
        .await;

    let result = chat(
        State(test.app_state()),
        Ok(Json(json!({"message": "How do I find travel buddies?"}))),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["reply"], "Upload your ticket first.");
    endpoint.assert_async().await;

    Ok(())
}

#[tokio::test]
/// Expect 400 without calling the provider for blank or oversized messages
async fn test_chat_invalid_message() -> Result<(), TestError> {
    let mut test = test_setup_with_tables!()?;
    let endpoint = test
        .server
        .mock("POST", GENERATE_PATH)
        .expect(0)
        .create_async()
        .await;
    let state = test.app_state();

    let cases = [
        json!({}),
        json!({"message": 42}),
        json!({"message": "   "}),
        json!({"message": "a".repeat(501)}),
    ];

    for body in cases {
        let result = chat(State(state.clone()), Ok(Json(body))).await;

        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
    endpoint.assert_async().await;

    Ok(())
}

#[tokio::test]
/// Expect 500 when no API key is configured
async fn test_chat_not_configured() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;
    let mut state = test.app_state();
    state.chat.gemini_api_key = None;

    let result = chat(State(state), Ok(Json(json!({"message": "Hello"})))).await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(resp).await["error"], "AI not configured.");

    Ok(())
}

#[tokio::test]
/// Expect 500 when the provider answers with an error
async fn test_chat_provider_error() -> Result<(), TestError> {
    let mut test = test_setup_with_tables!()?;
    let _endpoint = test
        .server
        .mock("POST", GENERATE_PATH)
        .with_status(503)
        .create_async()
        .await;

    let result = chat(
        State(test.app_state()),
        Ok(Json(json!({"message": "Hello"}))),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(resp).await["error"], "AI request failed.");

    Ok(())
}
