//! Registration and login behaviors that depend on the users table

use axum::http::StatusCode;
use serde_json::json;

use crate::common::{unique_email, TestApp};

#[tokio::test]
async fn test_duplicate_email_registration_rejected_and_creates_no_row() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    let email = unique_email();
    let (_, user_id) = app.register_user_with_email("candidate", &email).await;

    // Same email again, even under a different role
    let (status, body) = app
        .post_json(
            "/register",
            None,
            json!({
                "name": "Someone Else",
                "email": email,
                "password": "password456",
                "password_confirmation": "password456",
                "role": "employer",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "body: {}", body);

    // Exactly one row exists for that email
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind(&email)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 1);

    app.remove_users(&[user_id]).await;
}

#[tokio::test]
async fn test_login_issues_additive_token_and_logout_revokes_only_it() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    let email = unique_email();
    let (first_token, user_id) = app.register_user_with_email("candidate", &email).await;

    let (status, body) = app
        .post_json(
            "/login",
            None,
            json!({ "email": email, "password": "password123" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "body: {}", body);
    let second_token = body["access_token"].as_str().unwrap().to_string();
    assert_ne!(first_token, second_token);

    // Logging out with the second token leaves the first one valid
    let (status, _) = app.post_json("/logout", Some(&second_token), json!({})).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.get("/me", Some(&second_token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app.get("/me", Some(&first_token)).await;
    assert_eq!(status, StatusCode::OK, "body: {}", body);
    assert_eq!(body["user"]["email"], email.as_str());

    app.remove_users(&[user_id]).await;
}
