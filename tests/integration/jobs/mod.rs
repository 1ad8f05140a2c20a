//! Job posting ownership and search behaviors against the store

use axum::http::StatusCode;
use serde_json::json;

use crate::common::TestApp;

#[tokio::test]
async fn test_non_owner_employer_update_rejected_and_posting_unchanged() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    let (owner_token, owner_id) = app.register_user("employer").await;
    let (other_token, other_id) = app.register_user("employer").await;
    let job_id = app.create_job(&owner_token, "Original title").await;

    let (status, _) = app
        .put_json(
            &format!("/jobs/{}", job_id),
            Some(&other_token),
            json!({ "title": "Hijacked title" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Posting is unchanged
    let (status, body) = app.get(&format!("/jobs/{}", job_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Original title");

    app.remove_users(&[owner_id, other_id]).await;
}

#[tokio::test]
async fn test_omitted_salary_reads_back_as_null() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    let (employer_token, employer_id) = app.register_user("employer").await;
    let job_id = app.create_job(&employer_token, "No salary listed").await;

    let (status, body) = app.get(&format!("/jobs/{}", job_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["salary"].is_null());
    assert_eq!(body["employer"]["id"], employer_id.to_string());

    app.remove_users(&[employer_id]).await;
}

#[tokio::test]
async fn test_search_results_are_a_case_insensitive_subset_of_list() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    let (employer_token, employer_id) = app.register_user("employer").await;
    let marker = uuid::Uuid::new_v4().simple().to_string();
    let matching = app
        .create_job(&employer_token, &format!("Rust Engineer {}", marker))
        .await;
    let other = app
        .create_job(&employer_token, &format!("Gardener {}", marker))
        .await;

    // Case-insensitive substring match on title
    let (status, body) = app.get("/jobs/search?title=rust+engineer", None).await;
    assert_eq!(status, StatusCode::OK);
    let results = body.as_array().unwrap();
    let ids: Vec<&str> = results.iter().filter_map(|j| j["id"].as_str()).collect();
    assert!(ids.contains(&matching.to_string().as_str()));
    assert!(!ids.contains(&other.to_string().as_str()));

    // Every search hit also appears in the unfiltered list
    let (_, list_body) = app.get("/jobs", None).await;
    let list_ids: Vec<&str> = list_body
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|j| j["id"].as_str())
        .collect();
    for id in ids {
        assert!(list_ids.contains(&id));
    }

    app.remove_users(&[employer_id]).await;
}
