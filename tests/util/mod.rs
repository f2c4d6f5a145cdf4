//! Shared helpers for integration tests.

use std::path::PathBuf;

use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
    Router,
};
use http_body_util::BodyExt;
use tower::ServiceExt;
use tower_sessions::{MemoryStore, SessionManagerLayer};
use travellersmeet::server::{
    config::{ChatConfig, EmailConfig},
    model::app::AppState,
    router,
};
use travellersmeet_test_utils::{
    constant::{TEST_GEMINI_API_KEY, TEST_PASSWORD},
    TestSetup,
};

pub static MULTIPART_BOUNDARY: &str = "travellersmeet-boundary";

pub trait TestSetupExt {
    /// Builds an [`AppState`] on the test database with providers pointed at the mock server
    fn app_state(&self) -> AppState;

    /// Builds the full application router with an in-memory session layer
    fn app(&self) -> Router;
}

impl TestSetupExt for TestSetup {
    fn app_state(&self) -> AppState {
        AppState {
            db: self.state.db.clone(),
            http_client: reqwest::Client::new(),
            upload_dir: test_upload_dir(),
            otp_expiry_minutes: 10,
            email: EmailConfig {
                resend_api_key: None,
                resend_api_url: self.server_url(),
                from: "Travellers <test@example.com>".to_string(),
            },
            chat: ChatConfig {
                gemini_api_key: Some(TEST_GEMINI_API_KEY.to_string()),
                gemini_api_url: self.server_url(),
            },
        }
    }

    fn app(&self) -> Router {
        let session_layer = SessionManagerLayer::new(MemoryStore::default()).with_secure(false);

        router::routes()
            .with_state(self.app_state())
            .layer(session_layer)
    }
}

fn test_upload_dir() -> PathBuf {
    std::env::temp_dir().join(format!("travellersmeet-it-{}", uuid::Uuid::new_v4()))
}

/// Collects a response body and parses it as JSON
pub async fn body_json(resp: Response) -> serde_json::Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();

    serde_json::from_slice(&bytes).unwrap()
}

/// Collects a response body into raw bytes
pub async fn body_bytes(resp: Response) -> Vec<u8> {
    resp.into_body().collect().await.unwrap().to_bytes().to_vec()
}

/// Signs a fixture user in through the router and returns the session cookie
pub async fn sign_in(app: &Router, email: &str) -> String {
    let body = serde_json::json!({ "email": email, "password": TEST_PASSWORD });
    let request = Request::post("/api/auth/signin")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let resp = app.clone().oneshot(request).await.unwrap();
    assert!(resp.status().is_success(), "sign in failed: {}", resp.status());

    let set_cookie = resp
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .unwrap();

    set_cookie.split(';').next().unwrap().to_string()
}

/// A multipart form field, files carry a file name and content type
pub struct Part<'a> {
    pub name: &'a str,
    pub file: Option<(&'a str, &'a str)>,
    pub data: &'a [u8],
}

/// Encodes parts as a `multipart/form-data` body delimited by [`MULTIPART_BOUNDARY`]
pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();

    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", MULTIPART_BOUNDARY).as_bytes());
        match part.file {
            Some((file_name, content_type)) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                        part.name, file_name, content_type
                    )
                    .as_bytes(),
                );
            }
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", part.name)
                        .as_bytes(),
                );
            }
        }
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", MULTIPART_BOUNDARY).as_bytes());

    body
}
