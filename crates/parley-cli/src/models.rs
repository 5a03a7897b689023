//! `parley models`: list the chat models each handler accepts.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use parley_core::config::load_config;
use parley_providers::HANDLERS;

pub fn run(config_path: &Path) -> Result<()> {
    let config = load_config(Some(config_path));

    println!();
    for spec in HANDLERS {
        println!("{} {}", spec.display_name.cyan().bold(), format!("({})", spec.name).dimmed());

        // Models configured as a default by some provider using this handler
        let selected: Vec<&str> = config
            .chatbot
            .providers
            .values()
            .filter(|p| p.handler == spec.name)
            .filter_map(|p| p.model.as_deref())
            .collect();

        for model in (spec.models)() {
            if selected.contains(&model) {
                println!("  {} {}", model, "(default)".green());
            } else {
                println!("  {model}");
            }
        }
        println!();
    }

    Ok(())
}
