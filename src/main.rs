//! Routing server.
//!
//! Serves config-defined routes bound to the built-in handlers.
//!
//! ```text
//!     Client Request
//!     ──────────────▶ axum (request id, trace, timeout)
//!                         │
//!                         ▼
//!                     RouteTable ── route 1: path → method → Accept → Content-Type
//!                         │      ── route 2: ...
//!                         ▼
//!     ◀────────────── handler output, or 404 / 405 / 415
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use restful_routing::config::{apply_bind_override, load_config, RouteConfig, RouterConfig};
use restful_routing::handlers::builtin_registry;
use restful_routing::lifecycle::{spawn_signal_handler, Shutdown};
use restful_routing::observability::{logging, metrics};
use restful_routing::{HttpServer, RouteTable};

#[derive(Parser)]
#[command(name = "restful-routing")]
#[command(about = "HTTP server dispatching requests through declarative routes", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RouterConfig::default(),
    };
    let mut config = apply_bind_override(config, cli.bind)?;

    logging::init_logging(&config.observability);
    tracing::info!("restful-routing v{} starting", env!("CARGO_PKG_VERSION"));

    if config.routes.is_empty() {
        tracing::warn!("No routes configured, serving demo routes");
        config.routes = demo_routes();
    }

    let table = RouteTable::from_config(&config.routes, &builtin_registry())?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        routes = table.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    spawn_signal_handler(shutdown.clone());

    let server = HttpServer::new(config, table);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn demo_routes() -> Vec<RouteConfig> {
    let route = |method: &str, path: &str, produces: &str, consumes: &str, handler: &str| {
        RouteConfig {
            method: method.to_string(),
            path: path.to_string(),
            produces: produces.to_string(),
            consumes: consumes.to_string(),
            handler: handler.to_string(),
        }
    };

    vec![
        route("GET", "/health", "", "", "ok"),
        route("GET", "/echo/{name}", "application/json", "", "echo"),
        route("PUT", "/echo/{name}", "application/json", "application/json", "echo"),
    ]
}
