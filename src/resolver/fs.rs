//! Filesystem-backed resolver: every regular file under a configured root
//! becomes a readable resource.

use std::io;
use std::path::{Component, Path, PathBuf};

use glob::glob;

use super::mime::{format_file_size, is_text_mime, mime_type_for_path};
use super::{ResolveError, ResourceContent, ResourceInfo, ResourceResolver};

/// Fixed scheme prefix for filesystem resource URIs.
pub const FS_URI_PREFIX: &str = "file://resources/";

const SEED_README: &str = "\
# Sample Resources

This folder contains sample resources for the filesystem resource server demo.

## Contents
- readme.md (this file)
- config.json (sample configuration)
- notes.txt (plain text notes)
- logo.png (sample image - demonstrates binary resources)
";

const SEED_CONFIG: &str = "\
{
  \"appName\": \"mcpshelf filesystem server demo\",
  \"version\": \"1.0.0\",
  \"settings\": {
    \"maxFileSize\": \"10MB\",
    \"allowedExtensions\": [\".txt\", \".md\", \".json\", \".png\", \".jpg\"],
    \"cacheEnabled\": true
  }
}
";

const SEED_NOTES: &str = "\
Development Notes
==================

This server demonstrates dynamic resource loading from a filesystem.

Key features:
- Files are discovered on every listing (no hardcoded catalog)
- Binary files (images) are served as base64-encoded blobs
- Text files are served as plain text
- MIME types are inferred from file extensions

Try adding more files to this folder and they'll appear automatically!
";

/// A minimal valid PNG: 1x1 red pixel.
const SEED_PNG: [u8; 69] = [
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, // PNG signature
    0x00, 0x00, 0x00, 0x0D, // IHDR chunk length
    0x49, 0x48, 0x44, 0x52, // "IHDR"
    0x00, 0x00, 0x00, 0x01, // width: 1
    0x00, 0x00, 0x00, 0x01, // height: 1
    0x08, 0x02, // bit depth: 8, color type: 2 (RGB)
    0x00, 0x00, 0x00, // compression, filter, interlace
    0x90, 0x77, 0x53, 0xDE, // IHDR CRC
    0x00, 0x00, 0x00, 0x0C, // IDAT chunk length
    0x49, 0x44, 0x41, 0x54, // "IDAT"
    0x08, 0xD7, 0x63, 0xF8, 0xCF, 0xC0, 0x00, 0x00, // compressed data
    0x01, 0x01, 0x01, 0x00, // Adler-32 checksum
    0x1B, 0xB6, 0xEE, 0x56, // IDAT CRC
    0x00, 0x00, 0x00, 0x00, // IEND chunk length
    0x49, 0x45, 0x4E, 0x44, // "IEND"
    0xAE, 0x42, 0x60, 0x82, // IEND CRC
];

/// Resolver over regular files below a root directory.
///
/// The listing is recomputed from disk on every call, so it is always
/// consistent with current filesystem state at the cost of repeated I/O.
#[derive(Debug, Clone)]
pub struct FsResolver {
    root: PathBuf,
}

impl FsResolver {
    /// Create a resolver over `root`, seeding the directory with a small
    /// set of demo files when it does not exist yet.
    pub fn new(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        if !root.exists() {
            std::fs::create_dir_all(&root)?;
            seed_sample_files(&root)?;
            tracing::info!(root = %root.display(), "created sample resource folder");
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a URI to an absolute path that is guaranteed to stay under
    /// the root directory.
    fn resolve_path(&self, uri: &str) -> Result<PathBuf, ResolveError> {
        let relative = uri
            .strip_prefix(FS_URI_PREFIX)
            .ok_or_else(|| ResolveError::InvalidUri(uri.to_string()))?;
        if relative.is_empty() {
            return Err(ResolveError::InvalidUri(uri.to_string()));
        }

        // Lexical escape check before touching the filesystem, so probes at
        // paths that do not exist still fail as traversal attempts.
        let mut depth: i32 = 0;
        for component in Path::new(relative).components() {
            match component {
                Component::Normal(_) => depth += 1,
                Component::CurDir => {}
                Component::ParentDir => {
                    depth -= 1;
                    if depth < 0 {
                        return Err(ResolveError::AccessDenied(uri.to_string()));
                    }
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(ResolveError::InvalidUri(uri.to_string()));
                }
            }
        }

        let canonical_root = self
            .root
            .canonicalize()
            .map_err(|_| ResolveError::NotFound(uri.to_string()))?;

        let candidate = self.root.join(relative);
        let canonical = match candidate.canonicalize() {
            Ok(path) => path,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(ResolveError::NotFound(uri.to_string()));
            }
            Err(_) => return Err(ResolveError::AccessDenied(uri.to_string())),
        };

        // Component-wise ancestor check; a sibling like `root-evil` does not
        // pass even though it shares a string prefix with `root`.
        if !canonical.starts_with(&canonical_root) {
            return Err(ResolveError::AccessDenied(uri.to_string()));
        }

        Ok(canonical)
    }
}

impl ResourceResolver for FsResolver {
    fn list(&self) -> Vec<ResourceInfo> {
        let mut resources = Vec::new();

        let pattern = format!("{}/**/*", self.root.display());
        let Ok(paths) = glob(&pattern) else {
            return resources;
        };

        for path in paths.filter_map(Result::ok) {
            if !path.is_file() {
                continue;
            }
            let Ok(relative) = path.strip_prefix(&self.root) else {
                continue;
            };

            let uri_path = relative
                .components()
                .filter_map(|c| c.as_os_str().to_str())
                .collect::<Vec<_>>()
                .join("/");
            let size = path.metadata().map(|m| m.len()).unwrap_or(0);
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default()
                .to_string();

            resources.push(ResourceInfo {
                uri: format!("{FS_URI_PREFIX}{uri_path}"),
                name,
                mime_type: mime_type_for_path(&path).to_string(),
                description: format!(
                    "File: {} ({})",
                    relative.display(),
                    format_file_size(size)
                ),
            });
        }

        resources.sort_by(|a, b| a.uri.cmp(&b.uri));
        tracing::debug!(count = resources.len(), "listed filesystem resources");
        resources
    }

    fn read(&self, uri: &str) -> Result<ResourceContent, ResolveError> {
        let path = self.resolve_path(uri)?;
        if !path.is_file() {
            return Err(ResolveError::NotFound(uri.to_string()));
        }

        let mime_type = mime_type_for_path(&path);
        tracing::debug!(uri, mime_type, "reading filesystem resource");

        // The file can vanish between resolution and read; report that as
        // not-found rather than panicking.
        let bytes = std::fs::read(&path).map_err(|_| ResolveError::NotFound(uri.to_string()))?;

        if is_text_mime(mime_type) {
            // A text-typed file with invalid UTF-8 is served lossily rather
            // than failing the read.
            let text = String::from_utf8_lossy(&bytes).into_owned();
            Ok(ResourceContent::Text { mime_type: mime_type.to_string(), text })
        } else {
            Ok(ResourceContent::Binary { mime_type: mime_type.to_string(), bytes })
        }
    }
}

fn seed_sample_files(root: &Path) -> io::Result<()> {
    std::fs::write(root.join("readme.md"), SEED_README)?;
    std::fs::write(root.join("config.json"), SEED_CONFIG)?;
    std::fs::write(root.join("notes.txt"), SEED_NOTES)?;
    std::fs::write(root.join("logo.png"), SEED_PNG)?;
    Ok(())
}
