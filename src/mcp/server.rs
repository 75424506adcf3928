//! Core MCP server implementations.
//!
//! `ResourceServer` serves a resolver over the resources protocol;
//! `EchoServer` exposes the echo demo tool. Binary resource payloads are
//! base64-encoded here, at the wire boundary, not in the resolvers.

use std::sync::Arc;

use base64::Engine;
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::service::{RequestContext, RoleServer};
use rmcp::{tool, tool_handler, tool_router, ErrorData, ServerHandler};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::resolver::{
    CatalogResolver, FsResolver, ResolveError, ResourceContent, ResourceInfo, ResourceResolver,
    TemplateInfo,
};

/// An MCP server that answers `resources/list`, `resources/templates/list`,
/// and `resources/read` from a [`ResourceResolver`].
#[derive(Clone)]
pub struct ResourceServer {
    resolver: Arc<dyn ResourceResolver>,
    name: &'static str,
    instructions: &'static str,
}

impl ResourceServer {
    pub fn new(
        resolver: Arc<dyn ResourceResolver>,
        name: &'static str,
        instructions: &'static str,
    ) -> Self {
        Self { resolver, name, instructions }
    }

    /// Server over the fixed docs/config catalog.
    pub fn catalog() -> Self {
        Self::new(
            Arc::new(CatalogResolver::new()),
            "resource-server",
            "Company documentation and configuration resources. Static docs live \
             under docs://, and per-user/per-project configuration is addressed \
             through the config:// templates.",
        )
    }

    /// Server over files below a root directory.
    pub fn filesystem(resolver: FsResolver) -> Self {
        Self::new(
            Arc::new(resolver),
            "filesystem-server",
            "Files under the configured resource folder, addressed as \
             file://resources/{relative-path}. Text files are returned as text; \
             images and other binaries as base64 blobs.",
        )
    }
}

impl ServerHandler for ResourceServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_resources().build(),
            server_info: Implementation {
                name: self.name.into(),
                version: env!("CARGO_PKG_VERSION").into(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(self.instructions.into()),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, ErrorData> {
        let resources = self.resolver.list().into_iter().map(to_rmcp_resource).collect();
        Ok(ListResourcesResult { resources, next_cursor: None, meta: None })
    }

    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, ErrorData> {
        let resource_templates =
            self.resolver.list_templates().into_iter().map(to_rmcp_template).collect();
        Ok(ListResourceTemplatesResult { resource_templates, next_cursor: None, meta: None })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, ErrorData> {
        let uri = request.uri;
        match self.resolver.read(&uri) {
            Ok(content) => Ok(to_read_result(&uri, content)),
            Err(err) => Err(to_error_data(&uri, err)),
        }
    }
}

fn to_rmcp_resource(info: ResourceInfo) -> Resource {
    RawResource {
        uri: info.uri,
        name: info.name,
        title: None,
        description: Some(info.description),
        mime_type: Some(info.mime_type),
        size: None,
        icons: None,
        meta: None,
    }
    .no_annotation()
}

fn to_rmcp_template(info: TemplateInfo) -> ResourceTemplate {
    RawResourceTemplate {
        uri_template: info.uri_template,
        name: info.name,
        title: None,
        description: Some(info.description),
        mime_type: Some(info.mime_type),
        icons: None,
    }
    .no_annotation()
}

fn to_read_result(uri: &str, content: ResourceContent) -> ReadResourceResult {
    let contents = match content {
        ResourceContent::Text { mime_type, text } => ResourceContents::TextResourceContents {
            uri: uri.into(),
            mime_type: Some(mime_type),
            text,
            meta: None,
        },
        ResourceContent::Binary { mime_type, bytes } => ResourceContents::BlobResourceContents {
            uri: uri.into(),
            mime_type: Some(mime_type),
            blob: base64::engine::general_purpose::STANDARD.encode(&bytes),
            meta: None,
        },
    };
    ReadResourceResult { contents: vec![contents] }
}

fn to_error_data(uri: &str, err: ResolveError) -> ErrorData {
    let data = Some(serde_json::json!({ "uri": uri }));
    match err {
        ResolveError::NotFound(_) => ErrorData::resource_not_found(err.to_string(), data),
        ResolveError::InvalidUri(_) => ErrorData::invalid_params(err.to_string(), data),
        ResolveError::AccessDenied(_) => ErrorData::invalid_request(err.to_string(), data),
    }
}

/// Input parameters for the echo tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct EchoParams {
    /// The message to echo back.
    #[schemars(description = "The message to echo back")]
    pub message: String,

    /// Whether to uppercase the message.
    #[schemars(description = "Whether to uppercase the message")]
    pub uppercase: Option<bool>,
}

/// An MCP server with a single echo tool, the smallest useful `tools/call`
/// demonstration.
#[derive(Clone)]
pub struct EchoServer {
    tool_router: ToolRouter<Self>,
}

impl Default for EchoServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl EchoServer {
    pub fn new() -> Self {
        Self { tool_router: Self::tool_router() }
    }

    /// Echo the input message back, optionally uppercased.
    #[tool(name = "echo")]
    async fn echo(&self, params: Parameters<EchoParams>) -> Result<CallToolResult, ErrorData> {
        let EchoParams { message, uppercase } = params.0;

        let reply = if message.is_empty() {
            "No message provided".to_owned()
        } else if uppercase.unwrap_or(false) {
            format!("Echo: {}", message.to_uppercase())
        } else {
            format!("Echo: {message}")
        };

        Ok(CallToolResult::success(vec![Content::text(reply)]))
    }
}

#[tool_handler]
impl ServerHandler for EchoServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "echo-server".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "A demo server with a single echo tool. Call echo with a message \
                 (and optionally uppercase: true) to get it repeated back."
                    .into(),
            ),
        }
    }
}
