use shopbot_agent::SalesSession;
use shopbot_core::config::AppConfig;
use shopbot_core::ApplicationError;

use crate::commands::CommandResult;

/// Answers a single utterance with a fresh session.
pub fn run(config: &AppConfig, words: &[String]) -> CommandResult {
    let catalog = match config.catalog() {
        Ok(catalog) => catalog,
        Err(error) => return CommandResult::from_error("ask", &ApplicationError::from(error)),
    };

    let mut session = SalesSession::new(catalog).with_store_name(config.store.name.clone());
    CommandResult::text(session.respond(&words.join(" ")))
}
