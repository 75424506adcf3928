//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod agent;
mod chat;
mod fscheck;
mod inject;
mod resources;
mod serve;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

pub use inject::Placement;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;

/// mcpshelf - MCP resource/tool servers and local-model client demos
#[derive(Parser)]
#[command(name = "mcpshelf")]
#[command(about = "MCP resource/tool servers and local-model client demos")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// How a server talks to its clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Transport {
    /// Streamable HTTP at http://127.0.0.1:<port>/mcp
    Http,
    /// JSON-RPC over stdin/stdout (for tool integrations)
    Stdio,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the docs/config resource catalog over MCP
    Serve {
        /// Transport to serve on
        #[arg(long, value_enum, default_value = "http")]
        transport: Transport,

        /// HTTP port (ignored with --transport stdio)
        #[arg(long, default_value_t = 5000)]
        port: u16,
    },

    /// Serve files under a root directory as MCP resources
    ServeFs {
        /// Root directory to serve; created and seeded with sample files
        /// when missing (default: ./sample-resources)
        root: Option<PathBuf>,

        /// Transport to serve on
        #[arg(long, value_enum, default_value = "http")]
        transport: Transport,

        /// HTTP port (ignored with --transport stdio)
        #[arg(long, default_value_t = 5002)]
        port: u16,
    },

    /// Serve the echo demo tool over MCP
    ServeEcho {
        /// Transport to serve on
        #[arg(long, value_enum, default_value = "http")]
        transport: Transport,

        /// HTTP port (ignored with --transport stdio)
        #[arg(long, default_value_t = 5001)]
        port: u16,
    },

    /// List and read catalog resources (client demo)
    Resources {
        /// Catalog server endpoint
        #[arg(long, default_value = "http://127.0.0.1:5000/mcp")]
        url: String,
    },

    /// Read every filesystem resource and verify binary round-trips
    FsCheck {
        /// Filesystem server endpoint
        #[arg(long, default_value = "http://127.0.0.1:5002/mcp")]
        url: String,
    },

    /// Chat with a local model that can call the echo tool
    Chat {
        /// Echo server endpoint
        #[arg(long, default_value = "http://127.0.0.1:5001/mcp")]
        url: String,

        /// Model name (default: OLLAMA_MODEL or qwen2.5:1.5b)
        #[arg(long)]
        model: Option<String>,
    },

    /// Let the model browse catalog resources through tool calls
    Agent {
        /// Catalog server endpoint
        #[arg(long, default_value = "http://127.0.0.1:5000/mcp")]
        url: String,

        /// Model name (default: OLLAMA_MODEL or qwen2.5:1.5b)
        #[arg(long)]
        model: Option<String>,
    },

    /// Demonstrate resource placement in the conversation
    Inject {
        /// Where the resource content lands in the conversation
        #[arg(long, value_enum, default_value = "user")]
        placement: Placement,

        /// Catalog server endpoint
        #[arg(long, default_value = "http://127.0.0.1:5000/mcp")]
        url: String,

        /// Model name (default: OLLAMA_MODEL or qwen2.5:1.5b)
        #[arg(long)]
        model: Option<String>,
    },
}

fn init_tracing() {
    // Logs go to stderr so the stdio transport keeps stdout clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Parse arguments, run the selected command, and map the outcome to an
/// exit code.
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("mcpshelf: failed to start runtime: {err}");
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let result = runtime.block_on(async {
        match cli.command {
            Commands::Serve { transport, port } => serve::run_catalog(transport, port).await,
            Commands::ServeFs { root, transport, port } => {
                serve::run_filesystem(root, transport, port).await
            }
            Commands::ServeEcho { transport, port } => serve::run_echo(transport, port).await,
            Commands::Resources { url } => resources::run(&url).await,
            Commands::FsCheck { url } => fscheck::run(&url).await,
            Commands::Chat { url, model } => chat::run(&url, model).await,
            Commands::Agent { url, model } => agent::run(&url, model).await,
            Commands::Inject { placement, url, model } => {
                inject::run(placement, &url, model).await
            }
        }
    });

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(err) => {
            eprintln!("mcpshelf: {err}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Read one line from stdin, trimmed.
pub(crate) fn read_line() -> std::io::Result<String> {
    let mut buf = String::new();
    std::io::stdin().read_line(&mut buf)?;
    Ok(buf.trim().to_string())
}
