use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    response::IntoResponse,
    Form, Json,
};
use chrono::{Duration, Utc};
use tower::ServiceExt;
use travellersmeet::{
    model::user::{ResendOtpRequest, SigninRequest, SignupForm, VerifyOtpRequest},
    server::{
        controller::auth::{get_session, resend_otp, signin, signout, signup, verify_otp},
        data::user::UserRepository,
        model::session::user::SessionUserId,
        service::otp::hash_otp,
    },
};
use travellersmeet_test_utils::prelude::*;

use crate::util::{body_json, sign_in, TestSetupExt};

fn signup_form(name: &str, email: &str, password: &str) -> SignupForm {
    SignupForm {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
/// Expect 200 and a signed in session for a new account
async fn test_signup_success() -> Result<(), TestError> {
    let test = test_setup_with_tables!(entity::prelude::User)?;
    let state = test.app_state();

    let result = signup(
        State(state.clone()),
        test.session.clone(),
        Ok(Form(signup_form("Ada", "ada@example.com", "password123"))),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["ok"], true);

    let user = UserRepository::new(&state.db)
        .get_by_email("ada@example.com")
        .await?
        .unwrap();
    assert!(user.otp_hash.is_some());
    assert_eq!(SessionUserId::get(&test.session).await.unwrap(), Some(user.id));

    Ok(())
}

#[tokio::test]
/// Expect 400 when the email address is already registered
async fn test_signup_email_in_use() -> Result<(), TestError> {
    let mut test = test_setup_with_tables!(entity::prelude::User)?;
    test.user().insert_user("ada@example.com").await?;
    let state = test.app_state();

    let result = signup(
        State(state),
        test.session.clone(),
        Ok(Form(signup_form("Ada", "ADA@example.com", "password123"))),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"], "Email already in use");

    Ok(())
}

#[tokio::test]
/// Expect 400 for a missing name or a short password
async fn test_signup_invalid_input() -> Result<(), TestError> {
    let test = test_setup_with_tables!(entity::prelude::User)?;
    let state = test.app_state();

    let missing_name = signup(
        State(state.clone()),
        test.session.clone(),
        Ok(Form(signup_form("", "ada@example.com", "password123"))),
    )
    .await;
    let short_password = signup(
        State(state),
        test.session.clone(),
        Ok(Form(signup_form("Ada", "ada@example.com", "short"))),
    )
    .await;

    for result in [missing_name, short_password] {
        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    Ok(())
}

#[tokio::test]
/// Expect 200 with the user when the credentials match
async fn test_signin_success() -> Result<(), TestError> {
    let mut test = test_setup_with_tables!(entity::prelude::User)?;
    let user = test.user().insert_verified_user("ada@example.com").await?;
    let state = test.app_state();

    let result = signin(
        State(state),
        test.session.clone(),
        Ok(Json(SigninRequest {
            email: "ada@example.com".to_string(),
            password: TEST_PASSWORD.to_string(),
        })),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    assert_eq!(body["email"], "ada@example.com");
    assert_eq!(body["emailVerified"], true);
    assert_eq!(body["role"], "USER");
    assert!(body.get("passwordHash").is_none());
    assert_eq!(SessionUserId::get(&test.session).await.unwrap(), Some(user.id));

    Ok(())
}

#[tokio::test]
/// Expect 401 for a wrong password
async fn test_signin_wrong_password() -> Result<(), TestError> {
    let mut test = test_setup_with_tables!(entity::prelude::User)?;
    test.user().insert_verified_user("ada@example.com").await?;
    let state = test.app_state();

    let result = signin(
        State(state),
        test.session.clone(),
        Ok(Json(SigninRequest {
            email: "ada@example.com".to_string(),
            password: "not-the-password".to_string(),
        })),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(SessionUserId::get(&test.session).await.unwrap().is_none());

    Ok(())
}

#[tokio::test]
/// Expect 401 when nobody is signed in
async fn test_get_session_unauthorized() -> Result<(), TestError> {
    let test = test_setup_with_tables!(entity::prelude::User)?;
    let state = test.app_state();

    let result = get_session(State(state), test.session.clone()).await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
/// Expect the session user to be cleared on sign out
async fn test_signout_clears_session() -> Result<(), TestError> {
    let mut test = test_setup_with_tables!(entity::prelude::User)?;
    let user = test.user().insert_verified_user("ada@example.com").await?;
    SessionUserId::insert(&test.session, user.id).await.unwrap();

    let result = signout(test.session.clone()).await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(SessionUserId::get(&test.session).await.unwrap().is_none());

    Ok(())
}

#[tokio::test]
/// Expect a session cookie from sign in to authenticate later requests
async fn test_session_cookie_round_trip() -> Result<(), TestError> {
    let mut test = test_setup_with_tables!(entity::prelude::User)?;
    test.user().insert_verified_user("ada@example.com").await?;
    let app = test.app();

    let cookie = sign_in(&app, "ada@example.com").await;

    let request = Request::get("/api/auth/session")
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(request).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["email"], "ada@example.com");

    let request = Request::get("/api/auth/session").body(Body::empty()).unwrap();
    let resp = app.oneshot(request).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
/// Expect 200 and a new code for an unverified user
async fn test_resend_otp_success() -> Result<(), TestError> {
    let mut test = test_setup_with_tables!(entity::prelude::User)?;
    test.user().insert_user("ada@example.com").await?;
    let state = test.app_state();

    let result = resend_otp(
        State(state.clone()),
        Ok(Json(ResendOtpRequest {
            email: "ada@example.com".to_string(),
        })),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["message"], "New OTP sent to your email");

    let user = UserRepository::new(&state.db)
        .get_by_email("ada@example.com")
        .await?
        .unwrap();
    assert!(user.otp_hash.is_some());

    Ok(())
}

#[tokio::test]
/// Expect 404 for an unknown email and 400 for an already verified one
async fn test_resend_otp_rejected() -> Result<(), TestError> {
    let mut test = test_setup_with_tables!(entity::prelude::User)?;
    test.user().insert_verified_user("done@example.com").await?;
    let state = test.app_state();

    let unknown = resend_otp(
        State(state.clone()),
        Ok(Json(ResendOtpRequest {
            email: "nobody@example.com".to_string(),
        })),
    )
    .await;
    let verified = resend_otp(
        State(state),
        Ok(Json(ResendOtpRequest {
            email: "done@example.com".to_string(),
        })),
    )
    .await;

    assert_eq!(
        unknown.err().unwrap().into_response().status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        verified.err().unwrap().into_response().status(),
        StatusCode::BAD_REQUEST
    );

    Ok(())
}

#[tokio::test]
/// Expect the email to be verified with the matching code
async fn test_verify_otp_success() -> Result<(), TestError> {
    let mut test = test_setup_with_tables!(entity::prelude::User)?;
    let user = test.user().insert_user("ada@example.com").await?;
    let state = test.app_state();
    UserRepository::new(&state.db)
        .set_otp(
            user,
            hash_otp("123456"),
            Utc::now().naive_utc() + Duration::minutes(10),
        )
        .await?;

    let result = verify_otp(
        State(state.clone()),
        Ok(Json(VerifyOtpRequest {
            email: "ada@example.com".to_string(),
            otp: "123456".to_string(),
        })),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["message"], "Email verified successfully");

    let user = UserRepository::new(&state.db)
        .get_by_email("ada@example.com")
        .await?
        .unwrap();
    assert!(user.email_verified_at.is_some());
    assert!(user.otp_hash.is_none());

    Ok(())
}

#[tokio::test]
/// Expect 400 for a malformed, wrong or expired code
async fn test_verify_otp_rejected() -> Result<(), TestError> {
    let mut test = test_setup_with_tables!(entity::prelude::User)?;
    let user = test.user().insert_user("ada@example.com").await?;
    let expired = test.user().insert_user("late@example.com").await?;
    let state = test.app_state();
    let repo = UserRepository::new(&state.db);
    repo.set_otp(
        user,
        hash_otp("123456"),
        Utc::now().naive_utc() + Duration::minutes(10),
    )
    .await?;
    repo.set_otp(
        expired,
        hash_otp("123456"),
        Utc::now().naive_utc() - Duration::minutes(1),
    )
    .await?;

    let cases = [
        ("ada@example.com", "12345"),
        ("ada@example.com", "654321"),
        ("late@example.com", "123456"),
    ];

    for (email, otp) in cases {
        let result = verify_otp(
            State(state.clone()),
            Ok(Json(VerifyOtpRequest {
                email: email.to_string(),
                otp: otp.to_string(),
            })),
        )
        .await;

        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{} {}", email, otp);
    }

    Ok(())
}
