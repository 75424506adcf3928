//! Server command implementations

use std::path::PathBuf;

use super::Transport;
use crate::mcp::{self, EchoServer, ResourceServer};
use crate::resolver::FsResolver;

type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Serve the fixed docs/config catalog.
pub async fn run_catalog(transport: Transport, port: u16) -> CommandResult {
    let server = ResourceServer::catalog();
    match transport {
        Transport::Stdio => mcp::serve_stdio(server).await,
        Transport::Http => {
            tracing::info!("resource server starting");
            tracing::info!("static resources: handbook, coding-standards, api/endpoints");
            tracing::info!("templates: user preferences, project settings");
            mcp::serve_http(server, port).await
        }
    }
}

/// Serve regular files below a root directory.
pub async fn run_filesystem(
    root: Option<PathBuf>,
    transport: Transport,
    port: u16,
) -> CommandResult {
    let root = root.unwrap_or_else(|| PathBuf::from("sample-resources"));
    let resolver = FsResolver::new(root)?;
    tracing::info!(root = %resolver.root().display(), "serving filesystem resources");

    let server = ResourceServer::filesystem(resolver);
    match transport {
        Transport::Stdio => mcp::serve_stdio(server).await,
        Transport::Http => mcp::serve_http(server, port).await,
    }
}

/// Serve the echo demo tool.
pub async fn run_echo(transport: Transport, port: u16) -> CommandResult {
    let server = EchoServer::new();
    match transport {
        Transport::Stdio => mcp::serve_stdio(server).await,
        Transport::Http => mcp::serve_http(server, port).await,
    }
}
