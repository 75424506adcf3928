//! Resource addressing and retrieval.
//!
//! A resolver decides whether a URI names a static resource, a templated
//! resource instance, or a file under a configured root, and produces
//! either text or raw bytes plus a MIME type. Wire concerns (base64 for
//! binary payloads, protocol error shapes) belong to the MCP layer, not
//! here.

mod catalog;
mod fs;
mod mime;

pub use catalog::CatalogResolver;
pub use fs::{FsResolver, FS_URI_PREFIX};
pub use mime::{format_file_size, is_text_mime, mime_type_for_path};

use serde::Serialize;
use thiserror::Error;

/// Terminal failure of a single `read` call. Never recovered internally;
/// the caller converts it into a protocol-level error response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Malformed URI or unrecognized scheme/prefix.
    #[error("invalid resource URI: {0}")]
    InvalidUri(String),
    /// Well-formed URI with no matching catalog entry or file.
    #[error("resource not found: {0}")]
    NotFound(String),
    /// Path traversal attempt detected.
    #[error("access denied: {0}")]
    AccessDenied(String),
}

/// An addressable document exposed for reading. Identity is the URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceInfo {
    pub uri: String,
    pub name: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub description: String,
}

/// A parameterized resource address with one `{placeholder}` segment.
/// Instances are not enumerable; only the pattern is advertised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateInfo {
    #[serde(rename = "uriTemplate")]
    pub uri_template: String,
    pub name: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub description: String,
}

/// Resolved resource content, produced fresh on every read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceContent {
    Text { mime_type: String, text: String },
    Binary { mime_type: String, bytes: Vec<u8> },
}

impl ResourceContent {
    pub fn mime_type(&self) -> &str {
        match self {
            ResourceContent::Text { mime_type, .. } => mime_type,
            ResourceContent::Binary { mime_type, .. } => mime_type,
        }
    }
}

/// The retrieval contract shared by the catalog and filesystem resolvers.
///
/// Invariant: every URI returned by `list` resolves through `read` with the
/// same identity. Resolution is a pure function of the URI string and the
/// current catalog/filesystem state.
pub trait ResourceResolver: Send + Sync {
    /// Ordered sequence of currently addressable resources.
    fn list(&self) -> Vec<ResourceInfo>;

    /// Ordered sequence of templated address patterns, if any.
    fn list_templates(&self) -> Vec<TemplateInfo> {
        Vec::new()
    }

    /// Resolve one URI to its content.
    fn read(&self, uri: &str) -> Result<ResourceContent, ResolveError>;
}
