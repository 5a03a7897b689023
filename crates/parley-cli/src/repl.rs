//! Interactive REPL.
//!
//! Uses `rustyline` for readline-style editing with persistent history.
//! Successful turns are appended to the provider's chat history so the
//! conversation carries context.

use anyhow::Result;
use rustyline::config::Configurer;
use rustyline::history::DefaultHistory;
use rustyline::{DefaultEditor, Editor};
use tracing::debug;

use parley_chat::Chatbot;
use parley_core::utils::truncate_string;
use parley_core::ChatbotError;

use crate::helpers;

/// Exit commands (case-insensitive match).
const EXIT_COMMANDS: &[&str] = &["exit", "quit", "/exit", "/quit", ":q"];

/// Run the interactive REPL loop.
pub async fn run(chatbot: &Chatbot, correlation_id: Option<&str>) -> Result<()> {
    helpers::print_banner(chatbot.provider().display_name());

    let mut editor = create_editor()?;

    loop {
        let input = match editor.readline("You: ") {
            Ok(line) => line,
            Err(rustyline::error::ReadlineError::Interrupted) => {
                // Ctrl-C: exit cleanly
                break;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                // Ctrl-D: exit cleanly
                break;
            }
            Err(e) => {
                eprintln!("Input error: {e}");
                break;
            }
        };

        let trimmed = input.trim();
        if trimmed.is_empty() {
            continue;
        }

        if is_exit_command(trimmed) {
            println!("\nGoodbye! 👋");
            break;
        }

        let _ = editor.add_history_entry(&input);

        let preview = truncate_string(trimmed, 80);
        debug!(
            turns = chatbot.history().len(),
            input = %preview,
            "processing input"
        );
        helpers::print_thinking();

        match chatbot.chat(trimmed, correlation_id).await {
            Ok(response) => {
                helpers::clear_thinking();
                chatbot.record_turn(trimmed, &response);
                helpers::print_response(&response);
            }
            Err(ChatbotError::ModelNotSet) => {
                helpers::clear_thinking();
                eprintln!("\n❌ No model selected. Pass --model or set \"model\" for the provider.\n");
                break;
            }
            Err(e) => {
                helpers::clear_thinking();
                eprintln!("\n❌ Error: {e}\n");
            }
        }
    }

    save_history(&mut editor);

    Ok(())
}

/// Create a rustyline editor with history.
fn create_editor() -> Result<Editor<(), DefaultHistory>> {
    let mut editor = DefaultEditor::new()?;
    editor.set_max_history_size(1000)?;

    let history_path = history_path();
    if history_path.exists() {
        let _ = editor.load_history(&history_path);
        debug!("loaded REPL history from {}", history_path.display());
    }

    Ok(editor)
}

/// Save history to disk.
fn save_history(editor: &mut Editor<(), DefaultHistory>) {
    let path = history_path();
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    if let Err(e) = editor.save_history(&path) {
        debug!("failed to save history: {e}");
    }
}

/// `~/.parley/history/cli_history`
fn history_path() -> std::path::PathBuf {
    parley_core::utils::get_data_path().join("history").join("cli_history")
}

fn is_exit_command(input: &str) -> bool {
    let lower = input.to_lowercase();
    EXIT_COMMANDS.contains(&lower.as_str())
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
