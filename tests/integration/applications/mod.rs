//! Application lifecycle behaviors that depend on constraints and cascades

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use crate::common::TestApp;

async fn apply(app: &TestApp, token: &str, job_id: Uuid) -> (StatusCode, serde_json::Value) {
    app.post_json(
        &format!("/jobs/{}/apply", job_id),
        Some(token),
        json!({ "cover_letter": "I would love this role" }),
    )
    .await
}

#[tokio::test]
async fn test_second_apply_returns_conflict_and_single_row_persists() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    let (employer_token, employer_id) = app.register_user("employer").await;
    let (candidate_token, candidate_id) = app.register_user("candidate").await;
    let job_id = app.create_job(&employer_token, "Backend Engineer").await;

    let (status, body) = apply(&app, &candidate_token, job_id).await;
    assert_eq!(status, StatusCode::CREATED, "body: {}", body);
    assert_eq!(body["application"]["status"], "pending");

    let (status, body) = apply(&app, &candidate_token, job_id).await;
    assert_eq!(status, StatusCode::CONFLICT, "body: {}", body);

    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM applications WHERE user_id = $1 AND job_id = $2")
            .bind(candidate_id)
            .bind(job_id)
            .fetch_one(&app.pool)
            .await
            .unwrap();
    assert_eq!(count, 1);

    app.remove_users(&[employer_id, candidate_id]).await;
}

#[tokio::test]
async fn test_deleting_posting_cascades_its_applications() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    let (employer_token, employer_id) = app.register_user("employer").await;
    let (candidate_token, candidate_id) = app.register_user("candidate").await;
    let job_id = app.create_job(&employer_token, "Soon deleted").await;

    let (status, _) = apply(&app, &candidate_token, job_id).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app
        .delete(&format!("/jobs/{}", job_id), Some(&employer_token))
        .await;
    assert_eq!(status, StatusCode::OK);

    // No orphaned rows at the store
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM applications WHERE job_id = $1")
        .bind(job_id)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 0);

    // And the candidate's list view no longer shows it
    let (status, body) = app.get("/applications", Some(&candidate_token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "candidate");
    assert!(body["applications"].as_array().unwrap().is_empty());

    app.remove_users(&[employer_id, candidate_id]).await;
}

#[tokio::test]
async fn test_foreign_employer_cannot_update_status_and_it_stays_unchanged() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    let (owner_token, owner_id) = app.register_user("employer").await;
    let (other_token, other_id) = app.register_user("employer").await;
    let (candidate_token, candidate_id) = app.register_user("candidate").await;
    let job_id = app.create_job(&owner_token, "Guarded posting").await;

    let (status, body) = apply(&app, &candidate_token, job_id).await;
    assert_eq!(status, StatusCode::CREATED);
    let application_id = body["application"]["id"].as_str().unwrap().to_string();

    let (status, _) = app
        .put_json(
            &format!("/applications/{}", application_id),
            Some(&other_token),
            json!({ "status": "accepted" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Status is unchanged; the owning employer still sees it pending
    let (status, body) = app
        .get(&format!("/applications/{}", application_id), Some(&owner_token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["application"]["status"], "pending");

    // The owning employer can accept it
    let (status, body) = app
        .put_json(
            &format!("/applications/{}", application_id),
            Some(&owner_token),
            json!({ "status": "accepted" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["application"]["status"], "accepted");

    app.remove_users(&[owner_id, other_id, candidate_id]).await;
}

#[tokio::test]
async fn test_candidate_list_shows_own_application_after_register_login_apply() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    let (employer_token, employer_id) = app.register_user("employer").await;
    let job_id = app.create_job(&employer_token, "Listed role").await;

    let email = crate::common::unique_email();
    let (_, candidate_id) = app.register_user_with_email("candidate", &email).await;

    // Fresh login, then apply with the logged-in token
    let (status, body) = app
        .post_json(
            "/login",
            None,
            json!({ "email": email, "password": "password123" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let login_token = body["access_token"].as_str().unwrap().to_string();

    let (status, _) = apply(&app, &login_token, job_id).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app.get("/applications", Some(&login_token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "candidate");
    let applications = body["applications"].as_array().unwrap();
    assert_eq!(applications.len(), 1);
    assert_eq!(applications[0]["job"]["title"], "Listed role");

    app.remove_users(&[employer_id, candidate_id]).await;
}

#[tokio::test]
async fn test_apply_to_inactive_posting_rejected() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    let (employer_token, employer_id) = app.register_user("employer").await;
    let (candidate_token, candidate_id) = app.register_user("candidate").await;
    let job_id = app.create_job(&employer_token, "Closing soon").await;

    let (status, _) = app
        .put_json(
            &format!("/jobs/{}", job_id),
            Some(&employer_token),
            json!({ "is_active": false }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = apply(&app, &candidate_token, job_id).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", body);

    app.remove_users(&[employer_id, candidate_id]).await;
}
