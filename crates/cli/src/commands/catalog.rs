use shopbot_agent::handlers;
use shopbot_core::config::AppConfig;
use shopbot_core::{ApplicationError, Product};

use crate::commands::CommandResult;

pub fn run(config: &AppConfig, json: bool) -> CommandResult {
    let catalog = match config.catalog() {
        Ok(catalog) => catalog,
        Err(error) => return CommandResult::from_error("catalog", &ApplicationError::from(error)),
    };

    if !json {
        return CommandResult::text(handlers::list_products(&catalog).trim_end());
    }

    let products =
        catalog.products().iter().map(|product| product.as_ref()).collect::<Vec<&Product>>();
    match serde_json::to_string_pretty(&products) {
        Ok(output) => CommandResult::text(output),
        Err(error) => CommandResult::failure("catalog", "serialization", error.to_string(), 4),
    }
}
