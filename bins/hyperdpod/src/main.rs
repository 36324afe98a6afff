// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! hyperdpo daemon (hyperdpod)
//!
//! Serves `POST /evolve` and `GET /health` over HTTP.
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use hyperdpo_api::{ConfigService, FsConfigStore, ServiceConfig};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod app;

use app::{router, AppState};

#[derive(Parser, Debug)]
#[command(author, version, about = "hyperdpo evolution daemon")]
struct Args {
    /// TCP listener address [default: 127.0.0.1:8080, or the config value]
    #[arg(long)]
    listen: Option<String>,
    /// JSON config file (defaults to the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the maximum accepted `steps`
    #[arg(long)]
    max_steps: Option<usize>,
    /// Override the maximum accepted host vertex count
    #[arg(long)]
    max_host_vertices: Option<usize>,
}

fn load_config(args: &Args) -> Result<ServiceConfig> {
    let store = match &args.config {
        Some(path) => FsConfigStore::at(path),
        None => FsConfigStore::new()?,
    };
    let mut config = ConfigService::new(store)
        .load_service_config()
        .context("load service config")?;
    if let Some(listen) = &args.listen {
        config.listen.clone_from(listen);
    }
    if let Some(max_steps) = args.max_steps {
        config.limits.max_steps = max_steps;
    }
    if let Some(max_host_vertices) = args.max_host_vertices {
        config.limits.max_host_vertices = max_host_vertices;
    }
    Ok(config)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(%err, "failed to install ctrl-c handler");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = load_config(&args)?;
    info!(limits = ?config.limits, "limits loaded");

    let app = router(Arc::new(AppState {
        limits: config.limits,
    }));

    let listener = TcpListener::bind(&config.listen)
        .await
        .with_context(|| format!("bind {}", config.listen))?;
    info!("hyperdpod listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hyperdpod.json");
        std::fs::write(
            &path,
            r#"{"listen": "0.0.0.0:9000", "limits": {"max_steps": 5, "max_pattern_vertices": 3}}"#,
        )
        .unwrap();
        let args = Args::parse_from([
            "hyperdpod",
            "--config",
            path.to_str().unwrap(),
            "--max-steps",
            "50",
        ]);
        let config = load_config(&args).unwrap();
        assert_eq!(config.listen, "0.0.0.0:9000");
        assert_eq!(config.limits.max_steps, 50);
        assert_eq!(config.limits.max_pattern_vertices, 3);
        assert_eq!(config.limits.max_host_vertices, 64);
    }

    #[test]
    fn missing_config_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let args = Args::parse_from([
            "hyperdpod",
            "--config",
            dir.path().join("absent.json").to_str().unwrap(),
            "--listen",
            "127.0.0.1:0",
        ]);
        let config = load_config(&args).unwrap();
        assert_eq!(config.listen, "127.0.0.1:0");
        assert_eq!(config.limits, ServiceConfig::default().limits);
    }
}
