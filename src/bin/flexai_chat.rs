//! flexai-chat — terminal front-end for the FlexAI coaching workflow
//!
//! Usage:
//!   flexai-chat [chat] [--config <path>]     Interactive chat (default)
//!   flexai-chat check [--config <path>]      Report missing configuration
//!   flexai-chat session [--clear]            Show or clear the persisted session id

use anyhow::Context;
use flexai_chat::config::ConfigLoader;
use flexai_chat::session::{FileSessionStore, SessionIdentityProvider};
use flexai_chat::types::MessageRole;
use flexai_chat::{ChatSession, WebhookClient, WebhookConfig};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("chat");
    let rest = args.get(2..).unwrap_or(&[]);

    match command {
        "chat" => cmd_chat(rest).await,
        "check" => cmd_check(rest),
        "session" => cmd_session(rest),
        "version" | "--version" | "-V" => {
            println!("flexai-chat {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        // Allow `flexai-chat --config x.yaml` without the explicit `chat`.
        "--config" => cmd_chat(&args[1..]).await,
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(2);
        }
    }
}

fn print_usage() {
    println!(
        r#"flexai-chat — chat with the FlexAI fitness coach

USAGE:
    flexai-chat <COMMAND> [OPTIONS]

COMMANDS:
    chat [--config <path>]      Interactive chat (default); /quit or EOF exits
    check [--config <path>]     Report missing configuration, exit 1 if invalid
    session [--clear]           Show or clear the persisted session id
    version                     Show version information
    help                        Show this help message

ENVIRONMENT:
    N8N_WEBHOOK_URL / NEXT_PUBLIC_N8N_WEBHOOK_URL    Workflow webhook URL
    N8N_AUTH_KEY / NEXT_PUBLIC_N8N_AUTH_KEY          Shared secret sent as `key`
    N8N_TIMEOUT_SECS                                 Optional request timeout
    FLEXAI_CONFIG                                    Optional YAML config file
    FLEXAI_STATE_DIR                                 Where the session id is kept
    RUST_LOG                                         Log filter (default: warn)"#
    );
}

fn flag_value(args: &[String], flag: &str) -> Option<PathBuf> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from)
}

fn load_config(args: &[String]) -> anyhow::Result<WebhookConfig> {
    let mut loader = ConfigLoader::new().with_keyring(true);
    if let Some(path) = flag_value(args, "--config") {
        loader = loader.with_file(path);
    }
    loader.load().context("loading configuration")
}

fn session_provider() -> SessionIdentityProvider {
    match FileSessionStore::open_default() {
        Ok(store) => {
            tracing::debug!(path = %store.path().display(), "using file session store");
            SessionIdentityProvider::new(Arc::new(store))
        }
        Err(e) => {
            tracing::warn!(error = %e, "no durable session store; session id will not persist");
            SessionIdentityProvider::ephemeral()
        }
    }
}

fn cmd_check(args: &[String]) -> anyhow::Result<()> {
    let config = load_config(args)?;
    let report = config.validate();
    if report.is_valid {
        println!("Configuration OK");
        if let Some(url) = config.webhook_url() {
            println!("  webhook: {url}");
        }
        return Ok(());
    }
    println!("{} problem(s):", report.errors.len());
    for err in &report.errors {
        println!("  {err}");
    }
    std::process::exit(1);
}

fn cmd_session(args: &[String]) -> anyhow::Result<()> {
    let provider = session_provider();
    if args.iter().any(|a| a == "--clear") {
        provider.clear();
        println!("Session cleared");
        return Ok(());
    }
    println!("{}", provider.get_or_create_session_id());
    Ok(())
}

async fn cmd_chat(args: &[String]) -> anyhow::Result<()> {
    let config = load_config(args)?;
    let report = config.validate();
    for err in &report.errors {
        eprintln!("warning: {err}");
    }

    let client = WebhookClient::new(config)?;
    let session_id = session_provider().get_or_create_session_id();
    let mut chat = ChatSession::new(client, session_id);

    for message in chat.messages() {
        print_message(message.role, &message.content);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("you> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };
        if line.trim() == "/quit" {
            break;
        }
        if let Some(reply) = chat.submit(&line).await {
            print_message(reply.role, &reply.content);
        }
    }
    Ok(())
}

fn print_message(role: MessageRole, content: &str) {
    match role {
        MessageRole::Assistant => println!("flexai> {content}"),
        MessageRole::User => println!("you> {content}"),
    }
}
