use std::sync::Arc;

use clap::Parser;
use taskpilot::gateway::{router, GatewayState};
use taskpilot_agent::RemoteEngine;
use taskpilot_core::Config;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "taskpilot")]
#[command(about = "WebSocket bridge to a browser-automation agent", long_about = None)]
#[command(version)]
struct Cli {
    /// Host to bind to (default 127.0.0.1)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (default 8000)
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup tracing
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let mut config = Config::from_env()?;
    if let Some(host) = cli.host {
        config.gateway.host = host;
    }
    if let Some(port) = cli.port {
        config.gateway.port = port;
    }

    let engine = Arc::new(RemoteEngine::new(config.engine.clone()));
    let state = GatewayState { engine };

    let bind_addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(addr = %bind_addr, engine = %config.engine.url, "taskpilot gateway listening");

    axum::serve(listener, router(state)).await?;
    Ok(())
}
