//! MCP server integration tests.
//!
//! These tests spawn the mcpshelf servers as subprocesses and communicate
//! via JSON-RPC 2.0 over stdin/stdout, verifying the full MCP protocol
//! handshake, resource listing/reading, template expansion, tool
//! invocation, and error handling.

use std::io::{BufRead, BufReader, Write};
use std::process::{Command, Stdio};
use std::time::Duration;

use base64::Engine;

/// A lightweight MCP client that talks to a server subprocess over stdio.
struct McpClient {
    child: std::process::Child,
    stdin: std::process::ChildStdin,
    reader: BufReader<std::process::ChildStdout>,
    next_id: u64,
}

impl McpClient {
    fn spawn(args: &[&str]) -> Self {
        let mut child = Command::new(env!("CARGO_BIN_EXE_mcpshelf"))
            .args(args)
            .arg("--transport")
            .arg("stdio")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("failed to spawn mcpshelf server");

        let stdin = child.stdin.take().expect("no stdin");
        let stdout = child.stdout.take().expect("no stdout");
        let reader = BufReader::new(stdout);

        McpClient { child, stdin, reader, next_id: 1 }
    }

    /// Send a JSON-RPC request and return the parsed response.
    fn request(&mut self, method: &str, params: serde_json::Value) -> serde_json::Value {
        let id = self.next_id;
        self.next_id += 1;

        let msg = serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        let line = serde_json::to_string(&msg).unwrap();
        writeln!(self.stdin, "{}", line).expect("write to stdin failed");
        self.stdin.flush().expect("flush stdin failed");

        let mut buf = String::new();
        self.reader.read_line(&mut buf).expect("read from stdout failed");
        serde_json::from_str(&buf)
            .unwrap_or_else(|e| panic!("failed to parse response JSON: {}\nraw: {}", e, buf))
    }

    /// Send the initialize handshake and return the result.
    fn initialize(&mut self) -> serde_json::Value {
        let resp = self.request(
            "initialize",
            serde_json::json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {},
                "clientInfo": {
                    "name": "test-client",
                    "version": "0.1.0"
                }
            }),
        );

        // Send initialized notification (no id, no response expected)
        let notif = serde_json::json!({
            "jsonrpc": "2.0",
            "method": "notifications/initialized",
        });
        let line = serde_json::to_string(&notif).unwrap();
        writeln!(self.stdin, "{}", line).expect("write notification failed");
        self.stdin.flush().expect("flush notification failed");

        // Small delay to let the server process the notification
        std::thread::sleep(Duration::from_millis(50));

        resp
    }

    fn list_resources(&mut self) -> serde_json::Value {
        self.request("resources/list", serde_json::json!({}))
    }

    fn list_resource_templates(&mut self) -> serde_json::Value {
        self.request("resources/templates/list", serde_json::json!({}))
    }

    fn read_resource(&mut self, uri: &str) -> serde_json::Value {
        self.request("resources/read", serde_json::json!({ "uri": uri }))
    }

    fn list_tools(&mut self) -> serde_json::Value {
        self.request("tools/list", serde_json::json!({}))
    }

    fn call_tool(&mut self, name: &str, args: serde_json::Value) -> serde_json::Value {
        self.request(
            "tools/call",
            serde_json::json!({
                "name": name,
                "arguments": args,
            }),
        )
    }

    /// Shut down by closing stdin, which causes the server to exit.
    fn shutdown(mut self) {
        drop(self.stdin);
        let _ = self.child.wait();
    }
}

fn catalog_client() -> McpClient {
    McpClient::spawn(&["serve"])
}

fn echo_client() -> McpClient {
    McpClient::spawn(&["serve-echo"])
}

/// Text of the first content entry of a resources/read result.
fn read_text(resp: &serde_json::Value) -> &str {
    resp["result"]["contents"][0]["text"].as_str().expect("text content expected")
}

// ── Handshake ─────────────────────────────────────────────────────────

#[test]
fn test_catalog_initialize_handshake() {
    let mut client = catalog_client();
    let resp = client.initialize();

    let result = resp.get("result").expect("initialize should return result");

    assert_eq!(
        result["protocolVersion"].as_str().unwrap(),
        "2024-11-05",
        "protocol version mismatch"
    );

    let info = &result["serverInfo"];
    assert_eq!(info["name"].as_str().unwrap(), "resource-server");
    assert!(info["version"].as_str().is_some(), "version should be present");

    let caps = &result["capabilities"];
    assert!(caps.get("resources").is_some(), "resources capability should be present");

    client.shutdown();
}

// ── Catalog Resources ─────────────────────────────────────────────────

#[test]
fn test_catalog_resources_list() {
    let mut client = catalog_client();
    client.initialize();

    let resp = client.list_resources();
    let result = resp.get("result").expect("resources/list should return result");
    let resources = result["resources"].as_array().expect("resources should be an array");

    assert_eq!(resources.len(), 3, "expected 3 static resources");

    let uris: Vec<&str> = resources.iter().map(|r| r["uri"].as_str().unwrap()).collect();
    assert!(uris.contains(&"docs://company/handbook"), "missing handbook");
    assert!(uris.contains(&"docs://company/coding-standards"), "missing coding standards");
    assert!(uris.contains(&"docs://api/endpoints"), "missing api endpoints");

    for resource in resources {
        assert!(resource["name"].as_str().is_some());
        assert!(resource["mimeType"].as_str().is_some());
        assert!(resource["description"].as_str().is_some());
    }

    client.shutdown();
}

#[test]
fn test_catalog_templates_list() {
    let mut client = catalog_client();
    client.initialize();

    let resp = client.list_resource_templates();
    let result = resp.get("result").expect("templates/list should return result");
    let templates = result["resourceTemplates"].as_array().expect("templates should be an array");

    assert_eq!(templates.len(), 2, "expected 2 resource templates");

    let uris: Vec<&str> = templates.iter().map(|t| t["uriTemplate"].as_str().unwrap()).collect();
    assert!(uris.contains(&"config://user/{id}/preferences"), "missing user template");
    assert!(uris.contains(&"config://project/{id}/settings"), "missing project template");

    client.shutdown();
}

#[test]
fn test_catalog_read_handbook() {
    let mut client = catalog_client();
    client.initialize();

    let resp = client.read_resource("docs://company/handbook");
    let text = read_text(&resp);
    assert!(text.contains("# Company Handbook"));
    assert!(text.contains("Core Values"));

    client.shutdown();
}

#[test]
fn test_catalog_read_user_preferences() {
    let mut client = catalog_client();
    client.initialize();

    let alice = client.read_resource("config://user/alice/preferences");
    let parsed: serde_json::Value = serde_json::from_str(read_text(&alice)).unwrap();
    assert_eq!(parsed["theme"], "dark");

    let bob = client.read_resource("config://user/bob/preferences");
    let parsed: serde_json::Value = serde_json::from_str(read_text(&bob)).unwrap();
    assert_eq!(parsed["theme"], "light");

    // Unrecognized ids get the fallback payload, not an error
    let carol = client.read_resource("config://user/carol/preferences");
    let parsed: serde_json::Value = serde_json::from_str(read_text(&carol)).unwrap();
    assert_eq!(parsed["theme"], "system");
    assert_eq!(parsed["timezone"], "UTC");

    client.shutdown();
}

#[test]
fn test_catalog_read_project_settings() {
    let mut client = catalog_client();
    client.initialize();

    let backend = client.read_resource("config://project/backend/settings");
    let parsed: serde_json::Value = serde_json::from_str(read_text(&backend)).unwrap();
    assert_eq!(parsed["database"], "PostgreSQL");

    let unknown = client.read_resource("config://project/skunkworks/settings");
    let parsed: serde_json::Value = serde_json::from_str(read_text(&unknown)).unwrap();
    assert!(parsed["note"].as_str().unwrap().contains("skunkworks"));
    assert!(parsed.get("database").is_none(), "no fabricated fields for unknown projects");

    client.shutdown();
}

#[test]
fn test_catalog_read_unknown_uri_is_error() {
    let mut client = catalog_client();
    client.initialize();

    let resp = client.read_resource("docs://company/nonexistent");
    assert!(
        resp.get("error").is_some(),
        "reading unknown resource should return error: {:?}",
        resp
    );

    client.shutdown();
}

// ── Echo Tool ─────────────────────────────────────────────────────────

#[test]
fn test_echo_tools_list() {
    let mut client = echo_client();
    client.initialize();

    let resp = client.list_tools();
    let result = resp.get("result").expect("tools/list should return result");
    let tools = result["tools"].as_array().expect("tools should be an array");

    assert_eq!(tools.len(), 1, "expected 1 tool, got {}", tools.len());
    assert_eq!(tools[0]["name"].as_str().unwrap(), "echo");
    assert!(tools[0]["description"].as_str().is_some());
    assert_eq!(tools[0]["inputSchema"]["type"].as_str().unwrap(), "object");

    client.shutdown();
}

#[test]
fn test_echo_tool_call() {
    let mut client = echo_client();
    client.initialize();

    let resp = client.call_tool("echo", serde_json::json!({ "message": "hello" }));
    let result = resp.get("result").expect("tool call should return result");
    let content = result["content"].as_array().expect("content should be array");
    assert_eq!(content[0]["type"].as_str().unwrap(), "text");
    assert_eq!(content[0]["text"].as_str().unwrap(), "Echo: hello");

    let resp =
        client.call_tool("echo", serde_json::json!({ "message": "hello", "uppercase": true }));
    let content = resp["result"]["content"].as_array().expect("content should be array");
    assert_eq!(content[0]["text"].as_str().unwrap(), "Echo: HELLO");

    client.shutdown();
}

#[test]
fn test_echo_missing_required_field_is_error() {
    let mut client = echo_client();
    client.initialize();

    let resp = client.call_tool("echo", serde_json::json!({}));
    assert!(
        resp.get("error").is_some() || {
            resp.get("result")
                .and_then(|r| r.get("isError"))
                .and_then(|e| e.as_bool())
                .unwrap_or(false)
        },
        "missing required field should return error: {:?}",
        resp
    );

    client.shutdown();
}

#[test]
fn test_echo_unknown_tool_is_error() {
    let mut client = echo_client();
    client.initialize();

    let resp = client.call_tool("nonexistent_tool", serde_json::json!({}));
    assert!(
        resp.get("error").is_some() || {
            resp.get("result")
                .and_then(|r| r.get("isError"))
                .and_then(|e| e.as_bool())
                .unwrap_or(false)
        },
        "calling nonexistent tool should return an error: {:?}",
        resp
    );

    client.shutdown();
}

// ── Filesystem Resources ──────────────────────────────────────────────

#[test]
fn test_filesystem_seeds_and_lists() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path().join("resources");
    let mut client = McpClient::spawn(&["serve-fs", root.to_str().unwrap()]);
    client.initialize();

    let resp = client.list_resources();
    let resources = resp["result"]["resources"].as_array().expect("resources array");

    let uris: Vec<&str> = resources.iter().map(|r| r["uri"].as_str().unwrap()).collect();
    assert_eq!(
        uris,
        vec![
            "file://resources/config.json",
            "file://resources/logo.png",
            "file://resources/notes.txt",
            "file://resources/readme.md",
        ],
        "seeded root should list exactly the sample files, sorted"
    );

    // Size-annotated description, e.g. "File: notes.txt (431.0 B)"
    let notes = resources.iter().find(|r| r["uri"] == "file://resources/notes.txt").unwrap();
    let description = notes["description"].as_str().unwrap();
    assert!(description.starts_with("File: notes.txt ("));
    assert!(description.ends_with(" B)"));
    assert_eq!(notes["mimeType"].as_str().unwrap(), "text/plain");

    client.shutdown();
}

#[test]
fn test_filesystem_read_text_resource() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path().join("resources");
    std::fs::create_dir_all(&root).unwrap();
    std::fs::write(root.join("greeting.txt"), "hello from disk\n").unwrap();

    let mut client = McpClient::spawn(&["serve-fs", root.to_str().unwrap()]);
    client.initialize();

    let resp = client.read_resource("file://resources/greeting.txt");
    assert_eq!(read_text(&resp), "hello from disk\n");
    assert_eq!(resp["result"]["contents"][0]["mimeType"].as_str().unwrap(), "text/plain");

    client.shutdown();
}

#[test]
fn test_filesystem_binary_round_trip() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path().join("resources");
    let mut client = McpClient::spawn(&["serve-fs", root.to_str().unwrap()]);
    client.initialize();

    let resp = client.read_resource("file://resources/logo.png");
    let contents = &resp["result"]["contents"][0];
    assert_eq!(contents["mimeType"].as_str().unwrap(), "image/png");

    let blob = contents["blob"].as_str().expect("binary resource should be a blob");
    let bytes = base64::engine::general_purpose::STANDARD.decode(blob).expect("valid base64");
    assert_eq!(&bytes[0..4], &[0x89, 0x50, 0x4E, 0x47], "decoded bytes should start with PNG magic");

    // The decoded blob matches the file on disk byte for byte
    let on_disk = std::fs::read(root.join("logo.png")).unwrap();
    assert_eq!(bytes, on_disk);

    client.shutdown();
}

#[test]
fn test_filesystem_traversal_is_rejected() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path().join("resources");
    let mut client = McpClient::spawn(&["serve-fs", root.to_str().unwrap()]);
    client.initialize();

    let resp = client.read_resource("file://resources/../../etc/passwd");
    let error = resp.get("error").expect("traversal attempt should return error");
    assert!(
        error["message"].as_str().unwrap().contains("access denied"),
        "unexpected error: {:?}",
        error
    );

    client.shutdown();
}

#[test]
fn test_filesystem_missing_file_is_error() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path().join("resources");
    let mut client = McpClient::spawn(&["serve-fs", root.to_str().unwrap()]);
    client.initialize();

    let resp = client.read_resource("file://resources/nope.txt");
    assert!(resp.get("error").is_some(), "missing file should return error: {:?}", resp);

    client.shutdown();
}
