// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

#![allow(dead_code)]

use axum::{
    body::Body,
    extract::{RawQuery, State},
    http::{Request, Response},
    routing::get,
    Router,
};
use jh_rest_server::{dependencies::ServerDependencies, server::build_app, ServerConfig};
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tower::ServiceExt;

pub const API_KEY: &str = "secret";

/// A stand-in for Jenkins' `/git/notifyCommit` endpoint
pub struct FakeJenkins {
    pub base: String,
    queries: Arc<Mutex<Vec<String>>>,
    handle: JoinHandle<()>,
}

impl FakeJenkins {
    /// Answer every trigger with `reply`
    pub async fn start(reply: &'static str) -> Self {
        let queries = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new()
            .route(
                "/jenkins/git/notifyCommit",
                get(
                    move |State(queries): State<Arc<Mutex<Vec<String>>>>,
                          RawQuery(query): RawQuery| async move {
                        queries.lock().unwrap().push(query.unwrap_or_default());
                        reply
                    },
                ),
            )
            .with_state(Arc::clone(&queries));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake jenkins");
        });

        Self {
            base: format!("http://{}/jenkins", addr),
            queries,
            handle,
        }
    }

    /// Query strings received so far, in order
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

impl Drop for FakeJenkins {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub fn config() -> ServerConfig {
    let mut config = ServerConfig::default();
    config.host.http_base = "https://stash.localhost/stash".to_string();
    config.host.ssh_base = "ssh://git@stash.localhost:7999".to_string();
    config
}

pub fn app(config: ServerConfig) -> Router {
    let state = ServerDependencies::from_config(&config)
        .expect("dependencies")
        .into_state();
    build_app(state, &config)
}

pub async fn send(app: &Router, request: Request<Body>) -> (Response<Body>, serde_json::Value) {
    let response = app.clone().oneshot(request).await.expect("request");
    let (parts, body) = response.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX).await.expect("body");
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (Response::from_parts(parts, Body::empty()), json)
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

pub fn form_request(uri: &str, form: &[(&str, &str)]) -> Request<Body> {
    let body: String = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(form)
        .finish();
    Request::post(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn repo_uri(project: &str, slug: &str, resource: &str) -> String {
    format!("/rest/jenkins/latest/projects/{project}/repos/{slug}/{resource}")
}
