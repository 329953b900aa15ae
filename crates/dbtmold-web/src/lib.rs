//! JSON-over-HTTP front end for `dbtmold`.
//!
//! `dbtmold-web` serves the tool catalogue and the prompt generators over a
//! small stateless REST API and a Model Context Protocol endpoint. Every
//! request is independent; the [`ToolSet`] and [`PromptAssembler`] are built
//! once at startup and shared read-only.
//!
//! # Quick start
//!
//! ```ignore
//! use dbtmold_web::{WebConfig, spawn_web};
//!
//! let addr = spawn_web(WebConfig::default()).await?;
//! println!("Listening on http://{addr}");
//! ```
//!
//! # Routes
//!
//! | Method | Path | Response |
//! |--------|------|----------|
//! | GET | `/api/health` | `{"status": "ok", "message": ...}` |
//! | GET | `/api/tools` | tool definitions, sorted by name |
//! | POST | `/api/tools/{name}` | `{"result": value, "terminal": bool}` or `{"error": {...}}` |
//! | GET | `/api/prompts` | prompt kinds with their arguments |
//! | POST | `/api/prompts/{kind}` | assembled prompt or `{"error": {...}}` |
//! | POST | `/mcp` | JSON-RPC 2.0 (`initialize`, `tools/*`, `prompts/*`) |
//!
//! On the REST routes, validation failures map to `400` and unknown tools and
//! prompt kinds to `404`. `/mcp` always answers `200` with a JSON-RPC body,
//! or `202` for notifications.
//!
//! [`ToolSet`]: dbtmold::tools::ToolSet
//! [`PromptAssembler`]: dbtmold::prompts::PromptAssembler

mod api;
pub mod health;
mod mcp;
mod server;

pub use health::{HEALTH_CHECK, HEALTH_MESSAGE, HealthCheck};
pub use mcp::{PROTOCOL_VERSION, SERVER_NAME};

use std::net::SocketAddr;

use dbtmold::config::MoldConfig;

/// Environment variable overriding the bind address.
pub const BIND_ENV: &str = "DBTMOLD_BIND";

/// Configuration for the web server.
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// Address to bind to. Default: `127.0.0.1:8000`.
    pub bind_addr: SocketAddr,
    /// Template root and argument validation for the shared core.
    pub mold: MoldConfig,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            mold: MoldConfig::default(),
        }
    }
}

/// Bind the server and run it on a Tokio task.
///
/// Returns the bound address (useful with port `0`). The server runs until
/// the Tokio runtime shuts down.
pub async fn spawn_web(config: WebConfig) -> std::io::Result<SocketAddr> {
    let router = server::build_router(&config.mold);
    server::start_server(router, config.bind_addr).await
}
