//! Chat demo: forward an MCP server's tools to a local model and run a
//! tool-calling conversation loop.

use rmcp::model::CallToolRequestParam;

use super::read_line;
use crate::llm::{ChatMessage, OllamaClient, ToolSpec};
use crate::mcp::client;

type CommandResult = Result<(), Box<dyn std::error::Error>>;

pub async fn run(url: &str, model: Option<String>) -> CommandResult {
    let session = client::connect(url).await?;

    let tools = session.list_tools(Default::default()).await?.tools;
    println!("Connected to MCP server with tools:");
    for tool in &tools {
        println!("  - {}: {}", tool.name, tool.description.as_deref().unwrap_or(""));
    }
    println!();

    // Convert MCP tool schemas to the model's function-call format
    let specs: Vec<ToolSpec> = tools
        .iter()
        .map(|tool| {
            ToolSpec::function(
                tool.name.to_string(),
                tool.description.as_deref().unwrap_or("").to_string(),
                serde_json::Value::Object((*tool.input_schema).clone()),
            )
        })
        .collect();

    let llm = OllamaClient::from_env(model);
    println!("Chatting with {} (type 'quit' to exit).\n", llm.model());

    let mut messages = vec![ChatMessage::system(
        "You are a helpful assistant. Use the available tools when they help \
         answer the user's question.",
    )];

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
                println!("[Tool Call: {}]", call.function.name);
                let result = session
                    .call_tool(CallToolRequestParam {
                        name: call.function.name.clone().into(),
                        arguments: call.function.arguments.as_object().cloned(),
                        meta: None,
                        task: None,
                    })
                    .await?;
                messages.push(ChatMessage::tool(client::tool_text(&result)));
            }

            // Final response once the tool results are in the conversation
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
