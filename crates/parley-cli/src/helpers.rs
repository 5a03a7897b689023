//! Shared CLI helpers: path expansion, response printing, version banner.

use std::path::PathBuf;

use colored::Colorize;

use parley_core::ChatResponse;

/// Expand `~` at the start of a path to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_next::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs_next::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

/// Print a chat response to stdout (errors to stderr).
pub fn print_response(response: &ChatResponse) {
    println!();
    if response.is_success() {
        println!("{}", "💬 Parley".cyan().bold());
        println!("{}", response.message());
        println!("{}", usage_line(response).dimmed());
    } else {
        eprintln!(
            "{} {}",
            format!("❌ Request failed ({})", status_label(response.status_code)).red().bold(),
            response.failed_message()
        );
    }
    println!();
}

/// `"tokens: 10 in / 5 out / 15 total"`, plus the model version when known.
pub fn usage_line(response: &ChatResponse) -> String {
    let mut line = format!(
        "tokens: {} in / {} out / {} total",
        response.input_tokens, response.output_tokens, response.total_tokens
    );
    if !response.model_version.is_empty() {
        line.push_str(&format!(" · {}", response.model_version));
    }
    line
}

/// Human label for a normalized status code; `0` means no HTTP response.
pub fn status_label(status_code: u16) -> String {
    if status_code == 0 {
        "network error".to_string()
    } else {
        format!("HTTP {status_code}")
    }
}

/// Print the banner shown at REPL start.
pub fn print_banner(provider: &str) {
    let version = env!("CARGO_PKG_VERSION");
    println!();
    println!(
        "{}  v{}  {}",
        "💬 Parley".cyan().bold(),
        version.dimmed(),
        format!("[{provider}]").dimmed()
    );
    println!(
        "{}",
        "Type a message, or \"exit\" to quit.".dimmed()
    );
    println!();
}

/// Print a "thinking" placeholder (for non-log mode).
pub fn print_thinking() {
    eprint!("{}", "⠿ thinking...".dimmed());
}

/// Clear the "thinking" placeholder.
pub fn clear_thinking() {
    eprint!("\r{}\r", " ".repeat(40));
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
