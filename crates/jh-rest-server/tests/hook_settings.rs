// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use axum::http::StatusCode;
use common::{app, config, get_request, json_request, repo_uri, send, FakeJenkins};
use serde_json::json;

mod common;

#[tokio::test]
async fn settings_round_trip() {
    let app = app(config());
    let uri = repo_uri("PRJ", "widgets", "settings");

    let (response, _) = send(&app, get_request(&uri)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let settings = json!({
        "jenkinsBase": "http://jenkins.localhost/jenkins",
        "cloneType": "custom",
        "gitRepoUrl": "git@mirror:widgets.git",
        "omitBranchName": true
    });
    let (response, saved) = send(&app, json_request("PUT", &uri, settings)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(saved["cloneType"], "custom");

    let (response, loaded) = send(&app, get_request(&uri)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(loaded, saved);

    let (response, _) = send(&app, json_request("DELETE", &uri, json!({}))).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let (response, _) = send(&app, json_request("DELETE", &uri, json!({}))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_settings_are_a_bad_request() {
    let app = app(config());

    let (response, body) = send(
        &app,
        json_request(
            "PUT",
            &repo_uri("PRJ", "widgets", "settings"),
            json!({"jenkinsBase": "not a url", "cloneType": "http"}),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn push_notifies_jenkins_per_ref() {
    let jenkins = FakeJenkins::start("Scheduled polling of widgets").await;
    let app = app(config());

    let (response, _) = send(
        &app,
        json_request(
            "PUT",
            &repo_uri("PRJ", "widgets", "settings"),
            json!({"jenkinsBase": jenkins.base, "cloneType": "http"}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let (response, body) = send(
        &app,
        json_request(
            "POST",
            &repo_uri("PRJ", "widgets", "push"),
            json!({"refChanges": [
                {"refId": "refs/heads/main", "toHash": "0a1b2c"},
                {"refId": "refs/heads/feature/x", "toHash": "3d4e5f"}
            ]}),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r["successful"] == true));

    let clone_url = "url=https%3A%2F%2Fstash.localhost%2Fstash%2Fscm%2Fprj%2Fwidgets.git";
    assert_eq!(
        jenkins.queries(),
        vec![
            format!("{clone_url}&branches=refs%2Fheads%2Fmain&sha1=0a1b2c"),
            format!("{clone_url}&branches=refs%2Fheads%2Ffeature%2Fx&sha1=3d4e5f"),
        ]
    );
}

#[tokio::test]
async fn push_without_settings_is_not_found() {
    let app = app(config());

    let (response, _) = send(
        &app,
        json_request(
            "POST",
            &repo_uri("PRJ", "widgets", "push"),
            json!({"refChanges": [{"refId": "refs/heads/main", "toHash": "0a1b2c"}]}),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
