//! `parley status`: show configuration and provider status.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use parley_core::config::{load_config, Config, ProviderConfig};
use parley_core::utils::mask_secret;
use parley_providers::{find_handler, ProvidersManager};

/// Run the status command.
pub fn run(config_path: &Path) -> Result<()> {
    let config = load_config(Some(config_path));

    println!();
    println!("{}", "💬 Parley Status".cyan().bold());
    println!();

    println!(
        "  {:<18} {} {}",
        "Config:".bold(),
        config_path.display(),
        if config_path.exists() {
            "✓".green().to_string()
        } else {
            "(not found)".red().to_string()
        }
    );

    println!(
        "  {:<18} {}",
        "Default provider:".bold(),
        resolved_default(&config)
    );

    let generation = &config.generation;
    println!(
        "  {:<18} {}",
        "Parameters:".bold(),
        format!(
            "temp: {} | max_tokens: {} | top_p: {} | top_k: {}",
            generation.temperature, generation.max_output_tokens, generation.top_p, generation.top_k
        )
        .dimmed(),
    );

    println!();
    println!("  {}", "Providers:".bold());
    for (name, provider) in &config.chatbot.providers {
        println!("    {:<20} {}", name, provider_line(provider));
    }

    println!();

    Ok(())
}

/// What `parley chat` without `--provider` would use.
fn resolved_default(config: &Config) -> String {
    let manager = ProvidersManager::from_config(config);
    if manager.get_default().is_none() {
        return "(none)".red().to_string();
    }
    // A sole registered provider resolves without a configured name
    manager
        .default_name()
        .or_else(|| manager.names().into_iter().next())
        .unwrap_or_default()
}

fn provider_line(provider: &ProviderConfig) -> String {
    let Some(spec) = find_handler(&provider.handler) else {
        return format!("{} unknown handler '{}'", "✗".red(), provider.handler);
    };

    let key = if provider.is_configured() {
        format!("{} key {}", "✓".green(), mask_secret(&provider.api_key))
    } else {
        format!("{} (set {})", "· no key".dimmed(), spec.env_key)
    };
    let model = provider.model.as_deref().unwrap_or("(no default model)");
    format!("{:<8} {} {}", spec.display_name, key, model.dimmed())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolved_default_sole_provider() {
        let config = Config {
            default_provider: None,
            ..Default::default()
        };
        assert_eq!(resolved_default(&config), "gemini");
    }

    #[test]
    fn provider_line_unknown_handler() {
        let provider = ProviderConfig {
            handler: "mystery".to_string(),
            ..Default::default()
        };
        assert!(provider_line(&provider).contains("mystery"));
    }

    #[test]
    fn provider_line_masks_key() {
        let provider = ProviderConfig {
            handler: "gemini".to_string(),
            api_key: "AIzaSECRET1234".to_string(),
            ..Default::default()
        };
        let line = provider_line(&provider);
        assert!(line.contains("1234"));
        assert!(!line.contains("SECRET"));
    }
}
