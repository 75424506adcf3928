//! mcpshelf - command-line entry point for the MCP resource/tool server demos

use std::process::ExitCode;

use mcpshelf::cli;

fn main() -> ExitCode {
    cli::run()
}
