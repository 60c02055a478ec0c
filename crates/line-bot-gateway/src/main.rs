//! line-bot-mcp-server: LINE Bot MCP Server Main Binary
//!
//! Serves the LINE tools over MCP on stdin/stdout.
//!
//! Usage:
//!   line-bot-mcp-server            - Start the stdio MCP server
//!   line-bot-mcp-server --help     - Show help
//!   line-bot-mcp-server --version  - Show version

use std::sync::Arc;

use line_bot_api::LineApiClient;
use line_bot_core::Config;
use line_bot_mcp::LineGateway;
use rmcp::{service::ServiceExt, transport::stdio};
use tracing_subscriber::EnvFilter;

/// Run mode
enum RunMode {
    /// Stdio MCP server
    Serve,
    /// Show help
    Help,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    match parse_args() {
        RunMode::Help => {
            print_help();
            return Ok(());
        }
        RunMode::Version => {
            println!("line-bot-mcp-server {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        RunMode::Serve => {}
    }

    // Load .env file
    dotenvy::dotenv().ok();

    // stdout carries the protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    // 必須の環境変数がない場合はツールを公開せずに終了する
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let api = LineApiClient::with_base_url(
        &config.line.channel_access_token,
        &config.line.api_base_url,
    )
    .map_err(|e| anyhow::anyhow!("Failed to create LINE client: {}", e))?;

    let gateway = LineGateway::new(Arc::new(api), config.gateway);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        api_base_url = %config.line.api_base_url,
        "Starting LINE Bot MCP server on stdio"
    );

    let service = gateway
        .serve(stdio())
        .await
        .inspect_err(|e| tracing::error!("Failed to start MCP server: {}", e))?;

    let reason = service.waiting().await?;
    tracing::info!(?reason, "MCP server stopped");
    Ok(())
}

/// Parse command line arguments
fn parse_args() -> RunMode {
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--help" | "-h" => return RunMode::Help,
            "--version" | "-v" => return RunMode::Version,
            _ => {}
        }
    }

    RunMode::Serve
}

/// Print help message
fn print_help() {
    println!("line-bot-mcp-server - LINE Messaging API tools over MCP (stdio)");
    println!();
    println!("Usage:");
    println!("  line-bot-mcp-server            Start the stdio MCP server");
    println!("  line-bot-mcp-server --help     Show this help message");
    println!("  line-bot-mcp-server --version  Show version");
    println!();
    println!("Environment Variables:");
    println!("  CHANNEL_ACCESS_TOKEN    LINE channel access token (required)");
    println!("  DESTINATION_USER_ID     Default recipient ID (required)");
    println!("  LINE_API_BASE_URL       API endpoint (default: https://api.line.me)");
    println!("  LINE_GROUP_MAPPINGS     Extra group mappings: name=id,name=id");
    println!("  LINE_GROUP_RESOLUTION   Enable groupName and list_groups (default: true)");
    println!("  LINE_ERROR_MODE         catch or propagate (default: catch)");
    println!("  LINE_BOT_MCP_CONFIG     Path to config file (default: line-bot-mcp.toml)");
    println!("  RUST_LOG                Log filter (default: info, written to stderr)");
}
