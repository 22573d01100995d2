//! Transport runners for the lineage MCP server.
//!
//! Every transport builds a fresh [`LineageMcp`] per client over the same
//! [`SourceFactory`], so no lineage state outlives a session.

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use lineage_core::services::SourceFactory;
use rmcp::serve_server;
use rmcp::transport::io::stdio;
use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig,
    StreamableHttpService,
    session::local::LocalSessionManager,
};
use serde_json::{Value, json};
use tracing::info;

use crate::LineageMcp;

pub const DEFAULT_HTTP_PORT: u16 = 4030;
pub const DEFAULT_SSE_KEEP_ALIVE: Duration = Duration::from_secs(15);

pub type ServeResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Listener settings for the streamable HTTP transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpTransport {
    pub addr: SocketAddr,
    /// Keep one MCP session per client. When off, every request is answered
    /// on its own and SSE keep-alives are not sent.
    pub sessions: bool,
    pub keep_alive: Option<Duration>,
}

impl HttpTransport {
    #[must_use]
    pub const fn new(addr: SocketAddr) -> Self {
        Self {
            addr,
            sessions: true,
            keep_alive: Some(DEFAULT_SSE_KEEP_ALIVE),
        }
    }

    #[must_use]
    pub const fn with_sessions(mut self, sessions: bool) -> Self {
        self.sessions = sessions;
        self
    }

    #[must_use]
    pub const fn with_keep_alive(mut self, keep_alive: Option<Duration>) -> Self {
        self.keep_alive = keep_alive;
        self
    }

    fn service_config(&self) -> StreamableHttpServerConfig {
        let defaults = StreamableHttpServerConfig::default();
        if self.sessions {
            StreamableHttpServerConfig {
                sse_keep_alive: self.keep_alive,
                stateful_mode: true,
                ..defaults
            }
        } else {
            StreamableHttpServerConfig {
                sse_keep_alive: None,
                sse_retry: None,
                stateful_mode: false,
                ..defaults
            }
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_HTTP_PORT)))
    }
}

/// Serves one MCP session over the process's stdin and stdout.
///
/// # Errors
/// Returns any transport or server error.
pub async fn serve_stdio(factory: SourceFactory) -> ServeResult {
    let (stdin, stdout) = stdio();
    info!(default_region = factory.default_region(), "serving MCP over stdio");
    let running = serve_server(LineageMcp::new(factory), (stdin, stdout)).await?;
    let reason = running.waiting().await?;
    info!(?reason, "stdio session ended");
    Ok(())
}

/// Builds the HTTP surface: `GET /health` and the MCP endpoint under `/mcp`.
pub fn http_router(factory: SourceFactory, transport: &HttpTransport) -> Router {
    let default_region = factory.default_region().to_string();
    let mcp: StreamableHttpService<LineageMcp, LocalSessionManager> = StreamableHttpService::new(
        move || Ok(LineageMcp::new(factory.clone())),
        Arc::new(LocalSessionManager::default()),
        transport.service_config(),
    );

    Router::new()
        .route("/health", get(health))
        .with_state(default_region)
        .nest_service("/mcp", mcp)
}

async fn health(State(default_region): State<String>) -> Json<Value> {
    Json(json!({ "status": "ok", "default_region": default_region }))
}

/// Binds `transport.addr` and serves [`http_router`] until the listener fails.
///
/// # Errors
/// Returns any bind or server error.
pub async fn serve_http(factory: SourceFactory, transport: HttpTransport) -> ServeResult {
    let router = http_router(factory, &transport);
    let listener = tokio::net::TcpListener::bind(transport.addr).await?;
    info!(
        addr = %transport.addr,
        sessions = transport.sessions,
        "serving MCP over streamable HTTP"
    );
    axum::serve(listener, router).await?;
    Ok(())
}
