//! Resource client demo: list resources and templates, then read a static
//! resource and two templated instances.

use rmcp::model::ReadResourceRequestParam;

use crate::mcp::client;

type CommandResult = Result<(), Box<dyn std::error::Error>>;

pub async fn run(url: &str) -> CommandResult {
    let session = client::connect(url).await?;

    println!("=== MCP Resource Client Demo ===\n");

    // 1. List all direct resources
    println!("Available Resources:");
    println!("{}", "-".repeat(50));

    let listed = session.list_resources(Default::default()).await?;
    for resource in &listed.resources {
        println!("  Name: {}", resource.name);
        println!("  URI:  {}", resource.uri);
        println!("  Type: {}", resource.mime_type.as_deref().unwrap_or("text/plain"));
        if let Some(description) = &resource.description {
            println!("  Desc: {description}");
        }
        println!();
    }

    // 2. List all resource templates
    println!("Available Resource Templates:");
    println!("{}", "-".repeat(50));

    let templates = session.list_resource_templates(Default::default()).await?;
    for template in &templates.resource_templates {
        println!("  Name: {}", template.name);
        println!("  URI:  {}", template.uri_template);
        println!("  Type: {}", template.mime_type.as_deref().unwrap_or("text/plain"));
        if let Some(description) = &template.description {
            println!("  Desc: {description}");
        }
        println!();
    }

    // 3. Read a specific static resource
    println!("Reading 'Company Handbook' resource:");
    println!("{}", "-".repeat(50));

    let handbook = session
        .read_resource(ReadResourceRequestParam { uri: "docs://company/handbook".into(), meta: None })
        .await?;
    if let Some(text) = client::first_text(&handbook) {
        println!("{}", preview(text, 500));
    }
    println!();

    // 4. Read a templated resource with the placeholder filled in
    println!("Reading User Preferences for 'alice':");
    println!("{}", "-".repeat(50));

    let alice = session
        .read_resource(ReadResourceRequestParam { uri: "config://user/alice/preferences".into(), meta: None })
        .await?;
    if let Some(text) = client::first_text(&alice) {
        println!("{text}");
    }
    println!();

    // 5. Read another templated resource
    println!("Reading Project Settings for 'backend':");
    println!("{}", "-".repeat(50));

    let backend = session
        .read_resource(ReadResourceRequestParam {
            uri: "config://project/backend/settings".into(),
            meta: None,
        })
        .await?;
    if let Some(text) = client::first_text(&backend) {
        println!("{text}");
    }
    println!();

    println!("Resource client demo complete!");

    session.cancel().await?;
    Ok(())
}

/// First `limit` characters of `text`, marking truncation.
fn preview(text: &str, limit: usize) -> String {
    if text.chars().count() > limit {
        let head: String = text.chars().take(limit).collect();
        format!("{head}\n[... truncated ...]")
    } else {
        text.to_string()
    }
}
