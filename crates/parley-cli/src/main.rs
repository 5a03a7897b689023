//! Parley CLI: entry point.
//!
//! # Commands
//!
//! - `parley chat [-m MESSAGE] [-p PROVIDER] [--model ID] [-i INSTRUCTION] [-u ID]`: chat (single-shot or REPL)
//! - `parley status`: show configuration and provider status
//! - `parley models`: list the models each handler accepts
//! - `parley init`: write a default config file

mod helpers;
mod init;
mod models;
mod repl;
mod status;

use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use parley_chat::{Ai, Chatbot};
use parley_core::config::{get_config_path, load_config, Config};
use parley_core::ChatMessage;
use parley_providers::ChatModel;

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// Parley: talk to hosted chat models from the terminal
#[derive(Parser)]
#[command(name = "parley", version, about, long_about = None)]
struct Cli {
    /// Config file (default: ~/.parley/config.json)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with a provider (single-shot or interactive REPL)
    Chat {
        /// Single message (non-interactive). Omit for REPL mode.
        #[arg(short, long)]
        message: Option<String>,

        /// Registered provider name (default: the configured default provider)
        #[arg(short, long)]
        provider: Option<String>,

        /// Model wire id, e.g. "gemini-2.0-flash"
        #[arg(long)]
        model: Option<String>,

        /// System instruction sent with every turn
        #[arg(short, long)]
        instruction: Option<String>,

        /// Correlation id attached to lifecycle events
        #[arg(short = 'u', long = "user")]
        correlation_id: Option<String>,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Show configuration and provider status
    Status,

    /// List supported models
    Models,

    /// Write a default config file
    Init {
        /// Overwrite an existing config
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

/// Options for the `chat` command.
#[derive(Debug, Default)]
struct ChatOptions {
    message: Option<String>,
    provider: Option<String>,
    model: Option<String>,
    instruction: Option<String>,
    correlation_id: Option<String>,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli
        .config
        .as_deref()
        .map(helpers::expand_tilde)
        .unwrap_or_else(get_config_path);

    match cli.command {
        Commands::Chat {
            message,
            provider,
            model,
            instruction,
            correlation_id,
            logs,
        } => {
            init_logging(logs);
            let options = ChatOptions {
                message,
                provider,
                model,
                instruction,
                correlation_id,
            };
            run_chat(&config_path, options).await
        }
        Commands::Status => status::run(&config_path),
        Commands::Models => models::run(&config_path),
        Commands::Init { force } => init::run(&config_path, force),
    }
}

// ─────────────────────────────────────────────
// Chat command
// ─────────────────────────────────────────────

async fn run_chat(config_path: &Path, options: ChatOptions) -> Result<()> {
    let config = load_config(Some(config_path));
    let chatbot = build_chatbot(&config, &options)?;

    match options.message {
        Some(msg) => {
            // Single-shot mode
            info!(provider = chatbot.provider().display_name(), "processing single message");
            let response = chatbot
                .chat(&msg, options.correlation_id.as_deref())
                .await
                .context("chat failed")?;
            helpers::print_response(&response);
        }
        None => {
            // Interactive REPL mode
            repl::run(&chatbot, options.correlation_id.as_deref()).await?;
        }
    }

    Ok(())
}

/// Resolve the provider and apply the per-invocation overrides.
fn build_chatbot(config: &Config, options: &ChatOptions) -> Result<Chatbot> {
    let ai = Ai::from_config(config);

    let chatbot = match options.provider.as_deref() {
        Some(name) => ai
            .chatbot_named(name)
            .with_context(|| format!("provider '{name}' is not configured"))?,
        None => ai
            .chatbot(None)
            .context("no default provider; set \"defaultProvider\" in the config or pass --provider")?,
    };

    if let Some(model) = options.model.as_deref() {
        let model: ChatModel = model
            .parse()
            .context("run `parley models` for the supported ids")?;
        chatbot.use_model(model);
    }

    if let Some(instruction) = options.instruction.as_deref() {
        chatbot.with_instruction(ChatMessage::instructor(instruction));
    }

    Ok(chatbot)
}

/// Initialize tracing/logging.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("parley=debug,info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use parley_core::config::ProviderConfig;

    fn two_provider_config() -> Config {
        let mut config = Config::default();
        config.chatbot.providers.clear();
        for name in ["work", "home"] {
            config.chatbot.providers.insert(
                name.to_string(),
                ProviderConfig {
                    handler: "gemini".to_string(),
                    api_key: "k".to_string(),
                    model: Some("gemini-2.0-flash".to_string()),
                    ..Default::default()
                },
            );
        }
        config.default_provider = None;
        config
    }

    #[test]
    fn parse_chat_flags() {
        let cli = Cli::try_parse_from([
            "parley", "chat", "-m", "hi", "-p", "work", "--model", "gemini-1.5-pro", "-i",
            "be brief", "-u", "42", "--logs",
        ])
        .unwrap();

        match cli.command {
            Commands::Chat {
                message,
                provider,
                model,
                instruction,
                correlation_id,
                logs,
            } => {
                assert_eq!(message.as_deref(), Some("hi"));
                assert_eq!(provider.as_deref(), Some("work"));
                assert_eq!(model.as_deref(), Some("gemini-1.5-pro"));
                assert_eq!(instruction.as_deref(), Some("be brief"));
                assert_eq!(correlation_id.as_deref(), Some("42"));
                assert!(logs);
            }
            _ => panic!("expected chat command"),
        }
    }

    #[test]
    fn parse_global_config_flag() {
        let cli = Cli::try_parse_from(["parley", "status", "--config", "/tmp/p.json"]).unwrap();
        assert_eq!(cli.config.as_deref(), Some("/tmp/p.json"));
        assert!(matches!(cli.command, Commands::Status));
    }

    #[test]
    fn build_chatbot_requires_default_with_many_providers() {
        let config = two_provider_config();
        let err = build_chatbot(&config, &ChatOptions::default()).unwrap_err();
        assert!(err.to_string().contains("no default provider"));
    }

    #[test]
    fn build_chatbot_by_name_with_overrides() {
        let config = two_provider_config();
        let options = ChatOptions {
            provider: Some("home".to_string()),
            model: Some("gemini-1.5-flash".to_string()),
            instruction: Some("Answer in French.".to_string()),
            ..Default::default()
        };

        let chatbot = build_chatbot(&config, &options).unwrap();
        let cfg = chatbot.provider().configuration().read().unwrap();
        assert_eq!(cfg.chat_model().unwrap().as_str(), "gemini-1.5-flash");
        assert_eq!(cfg.instruction().unwrap().text(), "Answer in French.");
    }

    #[test]
    fn build_chatbot_rejects_unknown_model() {
        let mut config = two_provider_config();
        config.default_provider = Some("work".to_string());
        let options = ChatOptions {
            model: Some("gpt-4o".to_string()),
            ..Default::default()
        };
        assert!(build_chatbot(&config, &options).is_err());
    }

    #[test]
    fn build_chatbot_unknown_provider_name() {
        let config = two_provider_config();
        let options = ChatOptions {
            provider: Some("office".to_string()),
            ..Default::default()
        };
        let err = build_chatbot(&config, &options).unwrap_err();
        assert!(err.to_string().contains("office"));
    }
}
