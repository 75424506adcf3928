//! Model Context Protocol (MCP) surface.
//!
//! Servers expose the resolvers and the echo demo tool over the protocol;
//! the transports (stdio and streamable HTTP) come from the rmcp SDK and
//! are consumed as-is.

pub mod client;
mod server;

pub use server::{EchoServer, ResourceServer};

use std::sync::Arc;

use rmcp::transport::{
    streamable_http_server::session::local::LocalSessionManager, StreamableHttpServerConfig,
    StreamableHttpService,
};
use rmcp::{ServerHandler, ServiceExt};

/// Run an MCP server on stdin/stdout until the client disconnects.
pub async fn serve_stdio<H>(handler: H) -> Result<(), Box<dyn std::error::Error>>
where
    H: ServerHandler,
{
    let service = handler.serve(rmcp::transport::stdio()).await?;
    service.waiting().await?;
    Ok(())
}

/// Run an MCP server over streamable HTTP at `http://127.0.0.1:<port>/mcp`.
pub async fn serve_http<H>(handler: H, port: u16) -> Result<(), Box<dyn std::error::Error>>
where
    H: ServerHandler + Clone,
{
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;

    let config = StreamableHttpServerConfig { stateful_mode: true, ..Default::default() };
    let session_manager = Arc::new(LocalSessionManager::default());
    let service = StreamableHttpService::new(move || Ok(handler.clone()), session_manager, config);

    let router = axum::Router::new().nest_service("/mcp", service);
    tracing::info!(port, "MCP server listening on http://127.0.0.1:{port}/mcp");
    axum::serve(listener, router).await?;
    Ok(())
}
