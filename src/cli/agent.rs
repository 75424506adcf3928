//! Agent demo: the model decides when to list and read resources through
//! tool calls, instead of having content pre-injected.

use rmcp::model::ReadResourceRequestParam;

use super::read_line;
use crate::llm::{ChatMessage, OllamaClient, ToolSpec};
use crate::mcp::client::{self, McpClient};
use crate::resolver::{ResourceInfo, TemplateInfo};

type CommandResult = Result<(), Box<dyn std::error::Error>>;

const SYSTEM_MESSAGE: &str = "\
You are a helpful assistant with access to a company's resource system.
You can list and read resources to help answer questions.

Available tools:
- list_resources: See what static resources are available
- list_resource_templates: See what templated resources are available
- read_resource: Read the content of a specific resource by URI

When users ask about company policies, coding standards, user preferences,
or project settings, use these tools to find and retrieve the relevant information.

Always check what resources are available before trying to read them.
";

fn resource_tools() -> Vec<ToolSpec> {
    vec![
        ToolSpec::function(
            "list_resources",
            "Lists all available resources from the MCP server. Returns a JSON \
             array of resources with their names, URIs, descriptions, and MIME types.",
            serde_json::json!({ "type": "object", "properties": {}, "required": [] }),
        ),
        ToolSpec::function(
            "list_resource_templates",
            "Lists all available resource templates from the MCP server. Templates \
             have URI patterns with placeholders like {id} that need to be filled \
             in when reading.",
            serde_json::json!({ "type": "object", "properties": {}, "required": [] }),
        ),
        ToolSpec::function(
            "read_resource",
            "Reads the content of a specific resource by its URI. For templated \
             resources, provide the full URI with placeholders filled in \
             (e.g., 'config://user/alice/preferences').",
            serde_json::json!({
                "type": "object",
                "properties": {
                    "uri": {
                        "type": "string",
                        "description": "The URI of the resource to read",
                    },
                },
                "required": ["uri"],
            }),
        ),
    ]
}

async fn list_resources_tool(session: &McpClient) -> String {
    println!("[Tool Call: list_resources]");
    match session.list_resources(Default::default()).await {
        Ok(listed) => {
            let entries: Vec<ResourceInfo> = listed
                .resources
                .iter()
                .map(|r| ResourceInfo {
                    uri: r.uri.to_string(),
                    name: r.name.to_string(),
                    mime_type: r.mime_type.clone().unwrap_or_default(),
                    description: r.description.clone().unwrap_or_default(),
                })
                .collect();
            println!("[Returned {} resources]", entries.len());
            serde_json::to_string_pretty(&entries).unwrap_or_else(|e| format!("Error: {e}"))
        }
        Err(e) => format!("Error listing resources: {e}"),
    }
}

async fn list_resource_templates_tool(session: &McpClient) -> String {
    println!("[Tool Call: list_resource_templates]");
    match session.list_resource_templates(Default::default()).await {
        Ok(listed) => {
            let entries: Vec<TemplateInfo> = listed
                .resource_templates
                .iter()
                .map(|t| TemplateInfo {
                    uri_template: t.uri_template.to_string(),
                    name: t.name.to_string(),
                    mime_type: t.mime_type.clone().unwrap_or_default(),
                    description: t.description.clone().unwrap_or_default(),
                })
                .collect();
            println!("[Returned {} templates]", entries.len());
            serde_json::to_string_pretty(&entries).unwrap_or_else(|e| format!("Error: {e}"))
        }
        Err(e) => format!("Error listing resource templates: {e}"),
    }
}

async fn read_resource_tool(session: &McpClient, uri: &str) -> String {
    println!("[Tool Call: read_resource(\"{uri}\")]");
    match session.read_resource(ReadResourceRequestParam { uri: uri.into(), meta: None }).await {
        Ok(result) => match client::first_text(&result) {
            Some(text) => text.to_string(),
            None => "Resource has no text content".to_string(),
        },
        Err(e) => format!("Error reading resource: {e}"),
    }
}

pub async fn run(url: &str, model: Option<String>) -> CommandResult {
    println!("=== Model Resource Client ===");
    println!("The model has agency over resource access.\n");

    let session = client::connect(url).await?;
    let specs = resource_tools();

    println!("Resource tools available to model:");
    for spec in &specs {
        println!("  - {}", spec.function.name);
    }
    println!();

    let llm = OllamaClient::from_env(model);
    println!("Connecting to {}...\n", llm.model());

    let mut messages = vec![ChatMessage::system(SYSTEM_MESSAGE)];

    println!("Chat with the AI! Try asking things like:");
    println!("  - 'What resources are available?'");
    println!("  - 'What are the company's core values?'");
    println!("  - 'Show me the coding standards'");
    println!("  - 'What are Alice's preferences?'");
    println!("  - 'What framework does the backend project use?'");
    println!("\nType 'quit' to exit.\n");

    loop {
        print!("You: ");
        use std::io::Write;
        std::io::stdout().flush()?;

        let user_prompt = read_line()?;
        if user_prompt.is_empty() {
            continue;
        }
        if user_prompt.eq_ignore_ascii_case("quit") {
            break;
        }

        messages.push(ChatMessage::user(user_prompt));

        let response = llm.chat(&messages, Some(&specs)).await?;

        if let Some(calls) = &response.tool_calls {
            let calls = calls.clone();
            messages.push(response);

            for call in &calls {
                let result = match call.function.name.as_str() {
                    "list_resources" => list_resources_tool(&session).await,
                    "list_resource_templates" => list_resource_templates_tool(&session).await,
                    "read_resource" => {
                        let uri = call.function.arguments["uri"].as_str().unwrap_or("");
                        read_resource_tool(&session, uri).await
                    }
                    other => format!("Unknown tool: {other}"),
                };
                messages.push(ChatMessage::tool(result));
            }

            let final_response = llm.chat(&messages, Some(&specs)).await?;
            println!("\nAssistant: {}\n", final_response.content);
            messages.push(final_response);
        } else {
            println!("\nAssistant: {}\n", response.content);
            messages.push(response);
        }
    }

    println!("Goodbye!");
    session.cancel().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_tools_shape() {
        let specs = resource_tools();
        let names: Vec<&str> = specs.iter().map(|s| s.function.name.as_str()).collect();
        assert_eq!(names, vec!["list_resources", "list_resource_templates", "read_resource"]);

        let read = &specs[2];
        let required = read.function.parameters["required"].as_array().unwrap();
        assert_eq!(required[0], "uri");
    }
}
