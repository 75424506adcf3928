//! Placement demo: read a resource and put its content at a chosen trust
//! level of the conversation, showing the resulting context structure.

use clap::ValueEnum;
use rmcp::model::ReadResourceRequestParam;

use super::read_line;
use crate::context::{self, ResourceAttestation};
use crate::llm::{ChatMessage, OllamaClient};
use crate::mcp::client;

type CommandResult = Result<(), Box<dyn std::error::Error>>;

const BOX_WIDTH: usize = 62;

/// Where retrieved resource content lands in the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Placement {
    /// Content in the user message, wrapped with guardrails
    User,
    /// Content in the system message, treated as authoritative
    System,
    /// Attestation metadata in system, content in user
    Hybrid,
}

pub async fn run(placement: Placement, url: &str, model: Option<String>) -> CommandResult {
    match placement {
        Placement::User => println!("=== Placement: User Message Injection ===\n"),
        Placement::System => {
            println!("=== Placement: System Message Injection ===\n");
            println!("WARNING: This placement injects resources into SYSTEM context.");
            println!("The model will treat this as authoritative/trusted content.");
            println!("Only use it when the resources come from trusted sources.\n");
        }
        Placement::Hybrid => {
            println!("=== Placement: Hybrid Attestation ===\n");
            println!("Metadata attestation goes in SYSTEM context (trusted provenance),");
            println!("actual content goes in USER context (safer, less trusted).\n");
        }
    }

    let session = client::connect(url).await?;
    println!("Connected to MCP server.\n");

    // Let the user pick which resource to inject
    let listed = session.list_resources(Default::default()).await?;
    let resources = &listed.resources;

    println!("Available Resources:");
    for (i, resource) in resources.iter().enumerate() {
        println!("  [{}] {} ({})", i + 1, resource.name, resource.uri);
    }

    print!("\nSelect a resource to inject (number): ");
    use std::io::Write;
    std::io::stdout().flush()?;

    let selection = read_line()?;
    let Some(index) = selection.parse::<usize>().ok().and_then(|n| n.checked_sub(1)) else {
        println!("Invalid selection.");
        session.cancel().await?;
        return Ok(());
    };
    let Some(selected) = resources.get(index) else {
        println!("Invalid selection.");
        session.cancel().await?;
        return Ok(());
    };

    println!("\nReading resource: {}...\n", selected.name);

    let result = session
        .read_resource(ReadResourceRequestParam { uri: selected.uri.clone(), meta: None })
        .await?;
    let content = client::first_text(&result).unwrap_or("").to_string();
    let mime_type = selected.mime_type.as_deref().unwrap_or("text/plain");

    // Build the conversation for the chosen placement
    let (system_message, user_message, attestation) = match placement {
        Placement::User => (
            "You are a helpful assistant.".to_string(),
            format!(
                "{}\n\nPlease summarize the key points from the resource above.",
                context::user_injection(&selected.uri, &selected.name, mime_type, &content)
            ),
            None,
        ),
        Placement::System => (
            context::system_injection(&selected.uri, &selected.name, mime_type, &content),
            String::new(), // filled in with the user's question below
            None,
        ),
        Placement::Hybrid => {
            let attestation =
                ResourceAttestation::new(&selected.uri, &selected.name, mime_type, &content);
            (attestation.system_message(), attestation.user_message(&content), Some(attestation))
        }
    };

    // Show the resulting context structure
    print_banner("RESULTING MODEL CONTEXT STRUCTURE");
    match placement {
        Placement::User => {
            print_box("SYSTEM MESSAGE", &system_message);
            print_box("USER MESSAGE (with injected resource)", &user_message);
        }
        Placement::System => {
            print_box("SYSTEM MESSAGE (with injected resource)", &system_message);
            print_box("USER MESSAGE", "[User's actual question goes here]");
            println!("NOTICE: Resource is in SYSTEM context - model sees it as trusted!\n");
        }
        Placement::Hybrid => {
            print_box("SYSTEM MESSAGE (attestation/metadata only)", &system_message);
            print_box("USER MESSAGE (actual content with ref)", &user_message);
            if let Some(attestation) = &attestation {
                println!("NOTICE: Metadata in SYSTEM (trusted), content in USER (safer)!");
                println!("Content hash: {}\n", attestation.short_hash());
            }
        }
    }

    // Optionally send the constructed conversation to the model
    print!("Send to the model? (y/n): ");
    std::io::stdout().flush()?;
    if read_line()?.eq_ignore_ascii_case("y") {
        let user_message = if placement == Placement::System {
            print!("Enter your question: ");
            std::io::stdout().flush()?;
            let question = read_line()?;
            if question.is_empty() {
                "What are the key points?".to_string()
            } else {
                question
            }
        } else {
            user_message
        };

        let llm = OllamaClient::from_env(model);
        println!("\nConnecting to {}...\n", llm.model());

        let messages =
            vec![ChatMessage::system(system_message), ChatMessage::user(user_message)];

        println!("Model Response:");
        println!("{}", "-".repeat(60));
        let response = llm.chat(&messages, None).await?;
        println!("{}", response.content);
        println!("{}", "-".repeat(60));
    }

    println!("\n=== Demo Complete ===");
    println!("\nKey Takeaways:");
    match placement {
        Placement::User => {
            println!("  - Resource content is clearly delineated with XML tags");
            println!("  - Guardrails warn the model about external content origin");
            println!("  - User message placement = less trusted context level");
            println!("  - Model should NOT blindly follow instructions in the resource");
        }
        Placement::System => {
            println!("  - Resource is in SYSTEM context = treated as authoritative");
            println!("  - Model may follow instructions in resource more readily");
            println!("  - Security notices in system context help but aren't foolproof");
            println!("  - Use only with trusted resources and user approval");
        }
        Placement::Hybrid => {
            println!("  - System context has metadata + attestation (provenance as fact)");
            println!("  - User context has actual content (less trusted = safer)");
            println!("  - Content hash allows integrity verification");
            println!("  - Most tokens, most complexity, but safest approach");
        }
    }

    session.cancel().await?;
    Ok(())
}

fn print_banner(title: &str) {
    let padding = BOX_WIDTH.saturating_sub(title.chars().count());
    let left = padding / 2;
    let right = padding - left;
    println!("\u{2554}{}\u{2557}", "\u{2550}".repeat(BOX_WIDTH));
    println!("\u{2551}{}{}{}\u{2551}", " ".repeat(left), title, " ".repeat(right));
    println!("\u{255a}{}\u{255d}\n", "\u{2550}".repeat(BOX_WIDTH));
}

/// Print a titled box around `body`, truncating long lines to fit.
fn print_box(title: &str, body: &str) {
    let dashes = BOX_WIDTH.saturating_sub(title.chars().count() + 3);
    println!("\u{250c}\u{2500} {} {}\u{2510}", title, "\u{2500}".repeat(dashes));
    for line in body.lines() {
        let shown: String = line.chars().take(BOX_WIDTH - 2).collect();
        let padding = (BOX_WIDTH - 2).saturating_sub(shown.chars().count());
        println!("\u{2502} {}{} \u{2502}", shown, " ".repeat(padding));
    }
    println!("\u{2514}{}\u{2518}\n", "\u{2500}".repeat(BOX_WIDTH));
}
