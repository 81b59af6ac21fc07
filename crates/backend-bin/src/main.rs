use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use credgate_backend_lib::{config::Settings, http, AppState};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Username/password login service
#[derive(Parser, Debug)]
#[command(name = "credgate", version, about)]
struct Cli {
    /// Config file (TOML, YAML or JSON); defaults to ./config.{toml,yaml,json}
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the bind address
    #[arg(short, long)]
    bind: Option<SocketAddr>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };
    if let Some(bind) = cli.bind {
        settings.bind_addr = bind;
    }

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_level.as_str()));
    if cli.json_logs {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let addr = settings.bind_addr;
    info!(
        backend = ?settings.storage.backend,
        scheme = ?settings.password.scheme,
        "starting credgate"
    );

    let state = Arc::new(AppState::bootstrap(settings).await?);
    let app = http::create_router(state);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("listening on {addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
