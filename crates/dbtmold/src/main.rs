//! Inspect the tool catalogue, call tools, and assemble dbt prompts from the
//! command line.
//!
//! Results are printed to stdout as JSON; logs go to stderr (filter with
//! `RUST_LOG`).
//!
//! # Examples
//!
//! ```sh
//! # List tool definitions
//! dbtmold tools
//!
//! # Call a tool
//! dbtmold call lcm --args '{"a": 4, "b": 6}'
//!
//! # List prompt kinds and their arguments
//! dbtmold prompts
//!
//! # Assemble a prompt
//! dbtmold prompt schema --param model_name=fct_orders --param description="Daily orders"
//!
//! # Read artifacts from another template root
//! DBTMOLD_TEMPLATE_DIR=/srv/dbt/template dbtmold prompt sql-model \
//!   --param table_name=bal_rpt --param description=Balances --param source_tables=core.bal
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dbtmold::config::TEMPLATE_DIR_ENV;
use dbtmold::prelude::*;
use dbtmold::prompts;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Prompt assembly and arithmetic tools for dbt-generating agents.
#[derive(Parser)]
#[command(name = "dbtmold")]
struct Cli {
    /// Directory holding the reference artifacts.
    #[arg(long, env = TEMPLATE_DIR_ENV, default_value = dbtmold::artifacts::DEFAULT_TEMPLATE_DIR)]
    template_dir: PathBuf,

    /// Skip JSON Schema validation of tool arguments.
    #[arg(long)]
    no_arg_validation: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print every tool definition as JSON.
    Tools,
    /// Call a tool by name.
    Call {
        /// Tool name, e.g. `divide`.
        name: String,
        /// Arguments as a JSON object.
        #[arg(long, default_value = "{}")]
        args: String,
    },
    /// Print every prompt kind with its arguments.
    Prompts,
    /// Assemble a prompt.
    Prompt {
        /// Prompt kind: sql-model, schema, test-config or explain-topic.
        kind: String,
        /// Parameter as `key=value`. Repeatable.
        #[arg(long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))
}

fn print_json(value: &impl serde::Serialize) -> Result<(), String> {
    let out = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{out}");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = MoldConfig::default()
        .with_template_dir(cli.template_dir)
        .with_arg_validation(!cli.no_arg_validation);

    match cli.command {
        Command::Tools => print_json(&config.build_tool_set().definitions()),
        Command::Call { name, args } => {
            let tools = config.build_tool_set();
            match tools.dispatch(&name, &args).await {
                Ok(value) => print_json(&serde_json::json!({
                    "result": value,
                    "terminal": tools.is_terminal(&name),
                })),
                Err(e) => {
                    print_json(&serde_json::json!({ "error": &e }))?;
                    Err(e.to_string())
                }
            }
        }
        Command::Prompts => print_json(&prompts::catalogue()),
        Command::Prompt { kind, params } => {
            let params: serde_json::Map<String, serde_json::Value> = params
                .into_iter()
                .map(|(k, v)| (k, serde_json::Value::String(v)))
                .collect();
            let request = PromptRequest::from_parts(&kind, params.into())
                .map_err(|e| e.to_string())?;
            let prompt = config
                .build_assembler()
                .build(&request)
                .map_err(|e| e.to_string())?;
            print_json(&prompt)
        }
    }
}
