// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Jenkins hook REST server
//!
//! Serves the hook settings UI of a hosted SCM: which clone URLs a
//! repository offers, whether a Jenkins configuration works, and the push
//! notifications that make Jenkins poll the repository.

pub mod auth;
pub mod config;
pub mod dependencies;
pub mod error;
pub mod handlers;
pub mod host;
pub mod models;
pub mod notifier;
pub mod resolver;
pub mod server;
pub mod services;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::Server;
