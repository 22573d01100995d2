//! Daemon entry point for the QuickSight lineage MCP server.
//!
//! Loads configuration from the command line and environment, installs the
//! stderr log subscriber, and serves the MCP protocol over stdio, streamable
//! HTTP, or both.

mod config;
mod factory;

use lineage_mcp::server::{serve_http, serve_stdio};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::LineageConfig;
use crate::factory::build_factory;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

fn init_tracing(filter: &str) -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(filter)?)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init()
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = LineageConfig::from_args()?;
    init_tracing(&config.log_filter)?;
    info!(
        default_region = %config.default_region,
        stdio = config.enable_stdio,
        http = config.http_serve,
        http_sessions = config.http_sessions,
        "starting lineage-mcpd"
    );

    let factory = build_factory(&config);
    let transport = config.http_transport();

    match (config.enable_stdio, config.http_serve) {
        (true, true) => {
            tokio::select! {
                result = serve_stdio(factory.clone()) => result?,
                result = serve_http(factory, transport) => result?,
            }
        }
        (false, true) => serve_http(factory, transport).await?,
        _ => serve_stdio(factory).await?,
    }
    Ok(())
}
