//! Static and templated resource catalog: company docs plus per-user and
//! per-project configuration payloads.

use super::{ResolveError, ResourceContent, ResourceInfo, ResourceResolver, TemplateInfo};

/// URI for the company handbook.
pub const URI_HANDBOOK: &str = "docs://company/handbook";
/// URI for the coding standards guide.
pub const URI_CODING_STANDARDS: &str = "docs://company/coding-standards";
/// URI for the API endpoint documentation.
pub const URI_API_ENDPOINTS: &str = "docs://api/endpoints";

/// URI template for per-user preferences.
pub const URI_TEMPLATE_USER_PREFS: &str = "config://user/{id}/preferences";
/// URI template for per-project settings.
pub const URI_TEMPLATE_PROJECT_SETTINGS: &str = "config://project/{id}/settings";

const HANDBOOK: &str = "\
# Company Handbook

## Mission Statement
We build tools that empower developers to create better software.

## Core Values
- **Quality**: We ship code we're proud of
- **Collaboration**: We succeed as a team
- **Transparency**: We communicate openly and honestly
- **Growth**: We continuously learn and improve

## Policies

### Remote Work
All team members may work remotely. Core hours are 10am-3pm in your local timezone.

### Code Review
All code changes require at least one approving review before merge.

### On-Call
Engineering teams rotate on-call responsibilities weekly.
";

const CODING_STANDARDS: &str = "\
# Coding Standards

## General Principles
- Write self-documenting code with clear naming
- Keep functions small and focused (< 20 lines preferred)
- Prefer composition over inheritance

## Rust Specific
- Propagate errors with `?` instead of unwrapping
- Derive `Debug` on public types
- Prefer borrowed parameters (`&str`, `&[T]`) on public APIs
- Keep `unsafe` out of application code

## Testing
- Aim for 80%+ code coverage on business logic
- Use descriptive test names: `method_scenario_expected_result`
- Mock external dependencies, not internal modules
";

/// Resolver over the fixed document catalog and the two config templates.
///
/// The catalog is fixed at construction; every call re-derives content from
/// the static tables, so concurrent reads need no synchronization.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogResolver;

impl CatalogResolver {
    pub fn new() -> Self {
        Self
    }
}

impl ResourceResolver for CatalogResolver {
    fn list(&self) -> Vec<ResourceInfo> {
        vec![
            ResourceInfo {
                uri: URI_HANDBOOK.into(),
                name: "Company Handbook".into(),
                mime_type: "text/markdown".into(),
                description: "The company handbook with policies and guidelines".into(),
            },
            ResourceInfo {
                uri: URI_CODING_STANDARDS.into(),
                name: "Coding Standards".into(),
                mime_type: "text/markdown".into(),
                description: "The coding standards and best practices guide".into(),
            },
            ResourceInfo {
                uri: URI_API_ENDPOINTS.into(),
                name: "API Endpoints".into(),
                mime_type: "application/json".into(),
                description: "Documentation of available API endpoints".into(),
            },
        ]
    }

    fn list_templates(&self) -> Vec<TemplateInfo> {
        vec![
            TemplateInfo {
                uri_template: URI_TEMPLATE_USER_PREFS.into(),
                name: "User Preferences".into(),
                mime_type: "application/json".into(),
                description: "User-specific preferences and settings".into(),
            },
            TemplateInfo {
                uri_template: URI_TEMPLATE_PROJECT_SETTINGS.into(),
                name: "Project Settings".into(),
                mime_type: "application/json".into(),
                description: "Project-specific configuration and settings".into(),
            },
        ]
    }

    fn read(&self, uri: &str) -> Result<ResourceContent, ResolveError> {
        // Static catalog first, exact match on the URI.
        match uri {
            URI_HANDBOOK => {
                return Ok(ResourceContent::Text {
                    mime_type: "text/markdown".into(),
                    text: HANDBOOK.into(),
                })
            }
            URI_CODING_STANDARDS => {
                return Ok(ResourceContent::Text {
                    mime_type: "text/markdown".into(),
                    text: CODING_STANDARDS.into(),
                })
            }
            URI_API_ENDPOINTS => {
                return Ok(ResourceContent::Text {
                    mime_type: "application/json".into(),
                    text: api_endpoints_json(),
                })
            }
            _ => {}
        }

        // Then the templates. Unknown identifiers still resolve to a
        // fallback payload; only a shape mismatch falls through.
        if let Some(id) = match_template(uri, URI_TEMPLATE_USER_PREFS) {
            return Ok(ResourceContent::Text {
                mime_type: "application/json".into(),
                text: pretty(&user_preferences(id)),
            });
        }

        if let Some(id) = match_template(uri, URI_TEMPLATE_PROJECT_SETTINGS) {
            return Ok(ResourceContent::Text {
                mime_type: "application/json".into(),
                text: pretty(&project_settings(id)),
            });
        }

        Err(ResolveError::NotFound(uri.to_string()))
    }
}

/// Match a URI against a template with a single `{placeholder}` segment,
/// returning the extracted identifier.
///
/// The placeholder binds exactly one path segment: an identifier containing
/// `/` does not match.
fn match_template<'a>(uri: &'a str, template: &str) -> Option<&'a str> {
    let open = template.find('{')?;
    let close = template.find('}')?;
    let prefix = &template[..open];
    let suffix = &template[close + 1..];

    let id = uri.strip_prefix(prefix)?.strip_suffix(suffix)?;
    if id.is_empty() || id.contains('/') {
        return None;
    }
    Some(id)
}

fn pretty(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).expect("config payload serialization cannot fail")
}

fn api_endpoints_json() -> String {
    pretty(&serde_json::json!({
        "endpoints": [
            {
                "path": "/api/users",
                "method": "GET",
                "description": "List all users",
                "auth": "required",
            },
            {
                "path": "/api/users/{id}",
                "method": "GET",
                "description": "Get user by ID",
                "auth": "required",
            },
            {
                "path": "/api/projects",
                "method": "GET",
                "description": "List all projects",
                "auth": "required",
            },
        ],
    }))
}

/// Preferences payload for a user id. Lookup is case-insensitive; unknown
/// ids get a neutral default instead of an error.
fn user_preferences(id: &str) -> serde_json::Value {
    match id.to_lowercase().as_str() {
        "alice" => serde_json::json!({
            "theme": "dark",
            "language": "en",
            "notifications": true,
            "timezone": "America/New_York",
        }),
        "bob" => serde_json::json!({
            "theme": "light",
            "language": "es",
            "notifications": false,
            "timezone": "Europe/Madrid",
        }),
        _ => serde_json::json!({
            "theme": "system",
            "language": "en",
            "notifications": true,
            "timezone": "UTC",
        }),
    }
}

/// Settings payload for a project id. Unknown ids get an explanatory note
/// rather than fabricated configuration.
fn project_settings(id: &str) -> serde_json::Value {
    match id.to_lowercase().as_str() {
        "frontend" => serde_json::json!({
            "framework": "React",
            "buildTool": "Vite",
            "testRunner": "Vitest",
            "linter": "ESLint",
            "deployTarget": "Vercel",
        }),
        "backend" => serde_json::json!({
            "framework": "ASP.NET Core",
            "database": "PostgreSQL",
            "cache": "Redis",
            "testRunner": "xUnit",
            "deployTarget": "Azure",
        }),
        "mobile" => serde_json::json!({
            "framework": "MAUI",
            "platforms": ["iOS", "Android"],
            "testRunner": "NUnit",
            "deployTarget": "App Store / Play Store",
        }),
        _ => serde_json::json!({
            "framework": "Unknown",
            "note": format!("No configuration found for project '{id}'"),
        }),
    }
}
