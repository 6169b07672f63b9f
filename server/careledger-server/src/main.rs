use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;

use careledger_server::{create_app, CareledgerServer};

/// CareLedger Engine HTTP Server
#[derive(Parser, Debug)]
#[command(name = "careledger-server")]
#[command(about = "Hospital billing and revenue analytics HTTP API server")]
struct Args {
    /// Server bind address
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Server port
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing(args.verbose);

    info!("Starting CareLedger Engine HTTP server");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let server = CareledgerServer::new();
    let app = create_app(server);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", args.host, args.port))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!("CareLedger Engine running on http://{addr}");
    info!("Health check available at: http://{addr}/health");
    info!("Revenue summary available at: http://{addr}/api/queries/revenue");

    axum::serve(listener, app)
        .await
        .context("HTTP server error")?;

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "careledger_server=debug,billing_analytics=debug,tower_http=debug"
    } else {
        "careledger_server=info,billing_analytics=info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
