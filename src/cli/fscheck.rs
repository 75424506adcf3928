//! Filesystem client demo: read every listed resource and verify that
//! binary payloads round-trip through the wire encoding.

use base64::Engine;
use rmcp::model::ReadResourceRequestParam;

use crate::mcp::client;

type CommandResult = Result<(), Box<dyn std::error::Error>>;

const PNG_MAGIC: [u8; 4] = [0x89, 0x50, 0x4E, 0x47];

pub async fn run(url: &str) -> CommandResult {
    let session = client::connect(url).await?;

    println!("=== FileSystem Resource Client ===\n");

    let listed = session.list_resources(Default::default()).await?;
    println!("Found {} resources\n", listed.resources.len());

    for resource in &listed.resources {
        let mime_type = resource.mime_type.as_deref().unwrap_or("text/plain");
        println!("--- {} ({}) ---", resource.name, mime_type);

        let result = session
            .read_resource(ReadResourceRequestParam { uri: resource.uri.clone(), meta: None })
            .await?;

        if let Some(text) = client::first_text(&result) {
            println!("[TEXT RESOURCE]");
            if text.chars().count() > 200 {
                let head: String = text.chars().take(200).collect();
                println!("{head}...");
            } else {
                println!("{text}");
            }
        } else if let Some(blob) = client::first_blob(&result) {
            println!("[BINARY RESOURCE (base64)]");
            println!("Base64 length: {} chars", blob.len());
            let shown = blob.len().min(60);
            println!("Preview: {}...", &blob[..shown]);

            let bytes = base64::engine::general_purpose::STANDARD.decode(blob)?;
            println!("Decoded: {} bytes", bytes.len());

            if mime_type == "image/png" && bytes.len() >= 8 {
                println!("Valid PNG header: {}", bytes[..4] == PNG_MAGIC);
            }
        }

        println!();
    }

    println!("=== Check Complete ===");

    session.cancel().await?;
    Ok(())
}
