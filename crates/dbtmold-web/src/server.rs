//! Axum server setup and router construction.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use dbtmold::config::MoldConfig;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use crate::api::{self, AppState};
use crate::health::HealthCheck;
use crate::mcp;

/// Build the full axum router over a tool set and assembler built from
/// `mold`.
pub fn build_router(mold: &MoldConfig) -> Router {
    let app_state = AppState {
        tools: Arc::new(mold.build_tool_set().with(HealthCheck)),
        assembler: Arc::new(mold.build_assembler()),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(api::get_health))
        .route("/api/tools", get(api::get_tools))
        .route("/api/tools/{name}", post(api::post_tool))
        .route("/api/prompts", get(api::get_prompts))
        .route("/api/prompts/{kind}", post(api::post_prompt))
        .route("/mcp", post(mcp::post_mcp))
        .with_state(app_state)
        .layer(cors)
}

/// Bind `bind_addr`, start serving on a Tokio task, and return the bound
/// address.
pub async fn start_server(router: Router, bind_addr: SocketAddr) -> std::io::Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    let addr = listener.local_addr()?;
    info!("[web] listening on http://{addr}");

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            error!("[web] server stopped: {e}");
        }
    });

    Ok(addr)
}
