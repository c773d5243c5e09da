// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Jenkins hook REST server binary

use clap::Parser;
use jh_logging::{redact, CliLoggingArgs};
use jh_rest_server::{Server, ServerConfig};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, env = "JH_CONFIG")]
    config: Option<PathBuf>,

    /// Bind address for the server
    #[arg(short, long, env = "JH_BIND")]
    bind: Option<SocketAddr>,

    /// Enable CORS for development
    #[arg(long)]
    cors: bool,

    /// API key callers must present as `Authorization: ApiKey <key>`
    #[arg(long, env = "JH_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Base URL of the SCM web UI used for HTTP clone URLs
    #[arg(long, env = "JH_HTTP_BASE")]
    http_base: Option<String>,

    /// Base URL of the internal SSH endpoint
    #[arg(long, env = "JH_SSH_BASE")]
    ssh_base: Option<String>,

    /// Treat the internal SSH server as turned off
    #[arg(long)]
    ssh_disabled: bool,

    #[command(flatten)]
    logging: CliLoggingArgs,
}

impl Args {
    /// File configuration with command-line overrides applied
    fn server_config(&self) -> anyhow::Result<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::from_file(path)?,
            None => ServerConfig::default(),
        };

        if let Some(bind) = self.bind {
            config.bind_addr = bind;
        }
        if self.cors {
            config.enable_cors = true;
        }
        if let Some(api_key) = &self.api_key {
            config.api_key = Some(api_key.clone());
        }
        if let Some(http_base) = &self.http_base {
            config.host.http_base = http_base.clone();
        }
        if let Some(ssh_base) = &self.ssh_base {
            config.host.ssh_base = ssh_base.clone();
        }
        if self.ssh_disabled {
            config.host.ssh_enabled = false;
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    args.logging.init("jh-rest-server")?;

    let config = args.server_config()?;
    tracing::info!(
        http_base = %config.host.http_base,
        ssh_enabled = config.host.ssh_enabled,
        api_key = config.api_key.as_ref().map(redact),
        "Starting Jenkins hook REST server"
    );

    Server::new(config)?.run().await?;

    Ok(())
}
