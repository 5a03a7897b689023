//! `parley init`: write a default configuration file.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use parley_core::config::{save_config, Config};
use parley_core::utils::get_data_path;
use parley_providers::ChatModel;

/// Model preselected for the gemini entry of a fresh config.
const DEFAULT_MODEL: ChatModel = ChatModel::Gemini2_0Flash;

/// Run the init command.
pub fn run(config_path: &Path, force: bool) -> Result<()> {
    println!();
    println!("{}", "💬 Parley Setup".cyan().bold());
    println!();

    if write_default_config(config_path, force)? {
        println!("  {} created config at {}", "✓".green(), config_path.display());
    } else {
        println!(
            "  {} config already exists at {} (use --force to overwrite)",
            "✓".green(),
            config_path.display()
        );
    }

    let history_dir = get_data_path().join("history");
    std::fs::create_dir_all(&history_dir)
        .with_context(|| format!("failed to create {}", history_dir.display()))?;

    println!();
    println!(
        "{}",
        "  Setup complete! Add your API key (or export GEMINI_API_KEY), then run `parley chat`.".green()
    );
    println!();

    Ok(())
}

/// The config written by `init`.
fn default_config() -> Config {
    let mut config = Config::default();
    for provider in config.chatbot.providers.values_mut() {
        provider.model.get_or_insert_with(|| DEFAULT_MODEL.api_id().to_string());
    }
    config
}

/// Write the default config unless one exists. Returns whether it wrote.
fn write_default_config(path: &Path, force: bool) -> Result<bool> {
    if path.exists() && !force {
        return Ok(false);
    }
    save_config(&default_config(), Some(path))
        .with_context(|| format!("failed to write config to {}", path.display()))?;
    Ok(true)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
