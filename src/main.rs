use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use edge_guard::config::load_config;
use edge_guard::lifecycle::Shutdown;
use edge_guard::observability::{logging, metrics};
use edge_guard::HttpServer;

#[derive(Parser)]
#[command(name = "edge-guard")]
#[command(about = "Admission gateway: bot detection, rate limiting and shield checks in front of delegated backends", long_about = None)]
struct Args {
    /// Path to the TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;

    logging::init(&config.observability.log_filter);

    tracing::info!("edge-guard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        auth_prefix = %config.auth.path_prefix,
        decision_url = %config.decision.base_url,
        app_upstream = %config.upstreams.app_address,
        auth_upstream = %config.upstreams.auth_address,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
