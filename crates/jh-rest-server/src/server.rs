// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Main server implementation

use crate::auth::{auth_middleware, AuthConfig};
use crate::config::ServerConfig;
use crate::dependencies::ServerDependencies;
use crate::error::{ServerError, ServerResult};
use crate::handlers;
use crate::state::AppState;
use axum::{
    http::HeaderValue,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::info;

/// Prefix the settings UI expects the plugin resource under
pub const REST_PREFIX: &str = "/rest/jenkins/latest";

/// REST API server
pub struct Server {
    config: ServerConfig,
    app: Router,
}

impl Server {
    /// Create a server with configuration-backed collaborators
    pub fn new(config: ServerConfig) -> anyhow::Result<Self> {
        let state = ServerDependencies::from_config(&config)?.into_state();
        Ok(Self::with_state(config, state))
    }

    /// Construct a server from an already-built app state (used for custom dependencies)
    pub fn with_state(config: ServerConfig, state: AppState) -> Self {
        let app = build_app(state, &config);
        Self { config, app }
    }

    /// Run the server
    pub async fn run(self) -> ServerResult<()> {
        let addr = self.config.bind_addr;
        info!("Starting server on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, self.app)
            .await
            .map_err(|err| ServerError::Internal(format!("REST server error: {err}")))
    }
}

/// Build the Axum application with routes and middleware
pub fn build_app(state: AppState, config: &ServerConfig) -> Router {
    let auth_config = AuthConfig {
        api_key: config.api_key.clone(),
    };

    let middleware_stack = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config.enable_cors))
        .layer(from_fn(move |req, next| auth_middleware(auth_config.clone(), req, next)));

    let repository_routes = Router::new()
        .route("/config", get(handlers::jenkins::get_config))
        .route("/test", post(handlers::jenkins::test_notification))
        .route(
            "/settings",
            get(handlers::hooks::get_settings)
                .put(handlers::hooks::put_settings)
                .delete(handlers::hooks::delete_settings),
        )
        .route("/push", post(handlers::hooks::push));

    Router::new()
        .route("/healthz", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readiness_check))
        .route("/version", get(handlers::health::version))
        .route("/openapi.json", get(handlers::openapi::openapi_spec))
        .nest(
            &format!("{}/projects/:project/repos/:slug", REST_PREFIX),
            repository_routes,
        )
        .with_state(state)
        .layer(middleware_stack)
}

fn cors_layer(permissive: bool) -> CorsLayer {
    if permissive {
        CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(vec![
                HeaderValue::from_static("http://localhost:7990"),
                HeaderValue::from_static("http://127.0.0.1:7990"),
            ])
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::DELETE,
            ])
            .allow_headers([
                axum::http::header::AUTHORIZATION,
                axum::http::header::CONTENT_TYPE,
            ])
    }
}
