use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use shopbot_agent::SalesSession;
use shopbot_core::config::AppConfig;
use shopbot_core::ApplicationError;
use tracing::info;

use crate::commands::CommandResult;

pub const SPEAKER: &str = "Sales Chatbot";
pub const FAREWELL: &str = "Thank you for shopping with us. Goodbye!";
const EXIT_COMMANDS: &[&str] = &["quit", "exit", "bye"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatEnd {
    /// The shopper typed an exit command.
    Farewell,
    EndOfInput,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChatSummary {
    pub turns: usize,
    pub ended_by: ChatEnd,
}

pub fn is_exit_command(line: &str) -> bool {
    let trimmed = line.trim();
    EXIT_COMMANDS.iter().any(|command| trimmed.eq_ignore_ascii_case(command))
}

pub fn banner(store_name: &str) -> String {
    format!("{SPEAKER}: Hello! Welcome to {store_name}. How can I help you today?")
}

pub fn run(config: &AppConfig) -> CommandResult {
    let catalog = match config.catalog() {
        Ok(catalog) => catalog,
        Err(error) => return CommandResult::from_error("chat", &ApplicationError::from(error)),
    };
    let mut session = SalesSession::new(catalog).with_store_name(config.store.name.clone());

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    match run_loop(&mut session, stdin.lock(), &mut stdout) {
        Ok(_) => CommandResult::text(String::new()),
        Err(error) => CommandResult::failure("chat", "io", format!("{error:#}"), 3),
    }
}

/// Reads one utterance per line until an exit command or end of input.
pub fn run_loop<R, W>(session: &mut SalesSession, input: R, output: &mut W) -> Result<ChatSummary>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "{}", banner(session.store_name())).context("failed to write banner")?;

    let mut turns = 0;
    let mut lines = input.lines();
    let ended_by = loop {
        write!(output, "You: ").context("failed to write prompt")?;
        output.flush().context("failed to flush prompt")?;

        let Some(line) = lines.next() else {
            writeln!(output).context("failed to finish transcript")?;
            break ChatEnd::EndOfInput;
        };
        let line = line.context("failed to read input line")?;

        if is_exit_command(&line) {
            writeln!(output, "{SPEAKER}: {FAREWELL}").context("failed to write farewell")?;
            break ChatEnd::Farewell;
        }
        // Blank lines re-prompt; they never reach the help fallback.
        if line.trim().is_empty() {
            continue;
        }

        let response = session.respond(&line);
        writeln!(output, "{SPEAKER}: {response}").context("failed to write response")?;
        turns += 1;
    };

    info!(event_name = "chat.session.ended", turns, ended_by = ?ended_by, "chat session ended");
    Ok(ChatSummary { turns, ended_by })
}
