//! Serve dbtmold prompts and tools over HTTP.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p dbtmold-web
//! cargo run -p dbtmold-web -- --bind 0.0.0.0:8080 --template-dir /srv/dbt/template
//! ```
//!
//! Then:
//!
//! ```bash
//! curl http://127.0.0.1:8000/api/tools
//! curl -X POST http://127.0.0.1:8000/api/tools/divide -d '{"a": 9, "b": 3}'
//! curl -X POST http://127.0.0.1:8000/api/prompts/schema \
//!   -d '{"model_name": "fct_orders", "description": "Daily orders"}'
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use dbtmold::config::{MoldConfig, TEMPLATE_DIR_ENV};
use dbtmold_web::{BIND_ENV, WebConfig, spawn_web};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// JSON-over-HTTP server for dbtmold prompts and tools.
#[derive(Parser)]
#[command(name = "dbtmold-web")]
struct Args {
    /// Address to listen on.
    #[arg(long, env = BIND_ENV, default_value = "127.0.0.1:8000")]
    bind: SocketAddr,

    /// Directory holding the reference artifacts.
    #[arg(long, env = TEMPLATE_DIR_ENV, default_value = dbtmold::artifacts::DEFAULT_TEMPLATE_DIR)]
    template_dir: PathBuf,

    /// Skip JSON Schema validation of tool arguments.
    #[arg(long)]
    no_arg_validation: bool,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = WebConfig {
        bind_addr: args.bind,
        mold: MoldConfig::default()
            .with_template_dir(args.template_dir)
            .with_arg_validation(!args.no_arg_validation),
    };

    let addr = spawn_web(config)
        .await
        .map_err(|e| format!("failed to bind {}: {e}", args.bind))?;
    println!("Serving on http://{addr}");

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| format!("failed to listen for shutdown signal: {e}"))?;
    Ok(())
}
