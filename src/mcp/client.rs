//! Thin MCP client connector shared by the demo commands.

use rmcp::model::*;
use rmcp::service::{RoleClient, RunningService};
use rmcp::transport::StreamableHttpClientTransport;
use rmcp::ServiceExt;

pub type McpClient = RunningService<RoleClient, ClientInfo>;

/// Connect to an MCP server over streamable HTTP and complete the
/// initialize handshake.
pub async fn connect(url: &str) -> Result<McpClient, Box<dyn std::error::Error>> {
    let transport = StreamableHttpClientTransport::from_uri(url.to_owned());

    let client_info = ClientInfo {
        meta: None,
        protocol_version: Default::default(),
        capabilities: ClientCapabilities::default(),
        client_info: Implementation {
            name: "mcpshelf-client".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            title: None,
            icons: None,
            website_url: None,
        },
    };

    let client = client_info.serve(transport).await?;
    Ok(client)
}

/// First text payload of a read result, if any.
pub fn first_text(result: &ReadResourceResult) -> Option<&str> {
    result.contents.iter().find_map(|content| match content {
        ResourceContents::TextResourceContents { text, .. } => Some(text.as_str()),
        _ => None,
    })
}

/// First base64 blob payload of a read result, if any.
pub fn first_blob(result: &ReadResourceResult) -> Option<&str> {
    result.contents.iter().find_map(|content| match content {
        ResourceContents::BlobResourceContents { blob, .. } => Some(blob.as_str()),
        _ => None,
    })
}

/// All text content of a tool result, joined with newlines.
pub fn tool_text(result: &CallToolResult) -> String {
    result
        .content
        .iter()
        .filter_map(|content| content.as_text())
        .map(|text| text.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_text_skips_blobs() {
        let result = ReadResourceResult {
            contents: vec![
                ResourceContents::BlobResourceContents {
                    uri: "file://resources/logo.png".into(),
                    mime_type: Some("image/png".into()),
                    blob: "iVBORw==".into(),
                    meta: None,
                },
                ResourceContents::TextResourceContents {
                    uri: "file://resources/notes.txt".into(),
                    mime_type: Some("text/plain".into()),
                    text: "hello".into(),
                    meta: None,
                },
            ],
        };
        assert_eq!(first_text(&result), Some("hello"));
        assert_eq!(first_blob(&result), Some("iVBORw=="));
    }

    #[test]
    fn test_first_text_empty_result() {
        let result = ReadResourceResult { contents: Vec::new() };
        assert_eq!(first_text(&result), None);
        assert_eq!(first_blob(&result), None);
    }
}
