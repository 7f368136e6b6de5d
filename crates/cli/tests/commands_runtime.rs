use std::env;
use std::fs;
use std::io::Cursor;
use std::sync::{Mutex, OnceLock};

use clap::Parser;
use serde_json::Value;
use shopbot_agent::handlers::HELP_MESSAGE;
use shopbot_agent::SalesSession;
use shopbot_cli::commands::{ask, catalog, chat, config, CommandResult};
use shopbot_cli::Cli;
use shopbot_core::config::{AppConfig, CatalogConfig, ConfigOverrides, ProductEntry};
use shopbot_core::{ApplicationError, CatalogError, ConfigError, LogFormat};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> &'static Mutex<()> {
    ENV_LOCK.get_or_init(|| Mutex::new(()))
}

fn transcript(script: &str) -> (String, chat::ChatSummary, SalesSession) {
    let mut session = SalesSession::default();
    let mut output = Vec::new();
    let summary = chat::run_loop(&mut session, Cursor::new(script.as_bytes()), &mut output)
        .expect("chat loop over in-memory buffers should not fail");
    (String::from_utf8(output).expect("transcript is utf-8"), summary, session)
}

fn parse_payload(raw: &str) -> Value {
    serde_json::from_str(raw).expect("command output should be json")
}

fn duplicate_catalog_config() -> AppConfig {
    let entry = |name: &str| ProductEntry {
        name: name.to_string(),
        description: String::new(),
        price: "1.00".parse().expect("decimal literal"),
        available: true,
    };
    AppConfig {
        catalog: CatalogConfig { products: vec![entry("Lamp"), entry("LAMP")] },
        ..AppConfig::default()
    }
}

#[test]
fn chat_prints_banner_replies_and_farewell() {
    let (output, summary, _) =
        transcript("hello\nadd 3 fitness tracker\nshow cart\nbye\nshow products\n");

    assert!(output.starts_with(
        "Sales Chatbot: Hello! Welcome to our virtual store. How can I help you today?\n"
    ));
    assert!(output.contains("You: Sales Chatbot: Added 3 Fitness Tracker(s) to your cart."));
    assert!(output.contains("- Fitness Tracker (x3): $149.97"));
    assert!(output.ends_with("Sales Chatbot: Thank you for shopping with us. Goodbye!\n"));
    assert!(!output.contains("Here are our available products"), "input after bye is ignored");
    assert_eq!(summary, chat::ChatSummary { turns: 3, ended_by: chat::ChatEnd::Farewell });
}

#[test]
fn chat_stops_quietly_at_end_of_input() {
    let (output, summary, session) = transcript("add portable charger\n\n   \n");

    assert_eq!(summary.turns, 1);
    assert_eq!(summary.ended_by, chat::ChatEnd::EndOfInput);
    assert!(!output.contains("Goodbye"));
    assert_eq!(session.cart().len(), 1);
}

#[test]
fn blank_lines_reprompt_without_a_reply() {
    let (output, summary, _) = transcript("\n   \nshow cart\nbye\n");

    assert!(output.contains("You: You: You: Sales Chatbot: Your cart is empty.\n"));
    assert!(!output.contains(HELP_MESSAGE));
    assert_eq!(summary, chat::ChatSummary { turns: 1, ended_by: chat::ChatEnd::Farewell });
}

#[test]
fn checkout_through_chat_clears_the_cart() {
    let (output, _, session) = transcript("add portable charger\ncheckout\nview cart\nquit\n");

    assert!(output.contains("Your total was $29.99."));
    assert!(output.contains("Sales Chatbot: Your cart is empty.\n"));
    assert!(session.cart().is_empty());
}

#[test]
fn exit_commands_are_whole_line_and_case_insensitive() {
    assert!(chat::is_exit_command("QUIT"));
    assert!(chat::is_exit_command("  Exit  "));
    assert!(chat::is_exit_command("bye"));
    assert!(!chat::is_exit_command("goodbye"));
    assert!(!chat::is_exit_command("bye bye"));
}

#[test]
fn ask_answers_single_utterance() {
    let result = ask::run(
        &AppConfig::default(),
        &["tell".to_string(), "me about".to_string(), "Wireless Earbuds".to_string()],
    );

    assert_eq!(result.exit_code, 0);
    assert_eq!(
        result.output,
        "Wireless Earbuds: Bluetooth earbuds with noise cancellation\nPrice: $59.99"
    );
}

#[test]
fn catalog_json_lists_products_in_order() {
    let result = catalog::run(&AppConfig::default(), true);
    assert_eq!(result.exit_code, 0);

    let payload = parse_payload(&result.output);
    let products = payload.as_array().expect("catalog json is an array");
    assert_eq!(products.len(), 5);
    assert_eq!(products[2]["name"], "Smart Home Camera");
    assert_eq!(products[2]["price"], "89.99");
    assert_eq!(products[2]["available"], true);
}

#[test]
fn catalog_text_matches_list_products_reply() {
    let result = catalog::run(&AppConfig::default(), false);
    assert!(result.output.starts_with("Here are our available products:\n"));
    assert!(result.output.ends_with("- Fitness Tracker: $49.99 (Available)"));
}

#[test]
fn invalid_catalog_yields_structured_failure() {
    let result = catalog::run(&duplicate_catalog_config(), false);
    assert_eq!(result.exit_code, 2);

    let payload = parse_payload(&result.output);
    assert_eq!(payload["command"], "catalog");
    assert_eq!(payload["status"], "error");
    assert_eq!(payload["error_class"], "catalog_validation");
}

#[test]
fn failure_payload_carries_error_class_and_exit_code() {
    let error = ApplicationError::from(CatalogError::EmptyName { position: 3 });
    let result = CommandResult::from_error("ask", &error);

    assert_eq!(result.exit_code, 2);
    let payload = parse_payload(&result.output);
    assert_eq!(payload["command"], "ask");
    assert_eq!(payload["error_class"], "catalog_validation");
    assert!(payload["message"].as_str().unwrap_or("").contains("position 3"));
}

#[test]
fn config_reports_sources() {
    let _guard = env_lock().lock().expect("env lock");
    let dir = tempfile::TempDir::new().expect("tempdir");
    let path = dir.path().join("shopbot.toml");
    fs::write(&path, "[store]\nname = \"Gadget Corner\"\n").expect("write config");
    env::set_var("SHOPBOT_LOG_LEVEL", "info");

    let loaded = AppConfig::load(shopbot_core::LoadOptions {
        config_path: Some(path.clone()),
        ..shopbot_core::LoadOptions::default()
    });
    let output = loaded
        .map(|app_config| config::run(&app_config, Some(&path), &ConfigOverrides::default()));
    env::remove_var("SHOPBOT_LOG_LEVEL");

    let output = output.expect("config should load");
    assert!(output.contains(&format!(
        "- store.name = Gadget Corner (source: file ({}))",
        path.display()
    )));
    assert!(output.contains("- logging.level = info (source: env (SHOPBOT_LOG_LEVEL))"));
    assert!(output.contains("- logging.format = Compact (source: default)"));
    assert!(output.contains("- catalog.products = <storefront> (source: default)"));
}

#[test]
fn global_flags_override_file_and_env() {
    let _guard = env_lock().lock().expect("env lock");
    let dir = tempfile::TempDir::new().expect("tempdir");
    let path = dir.path().join("shopbot.toml");
    fs::write(&path, "[store]\nname = \"Gadget Corner\"\n").expect("write config");
    env::set_var("SHOPBOT_LOG_LEVEL", "info");

    let path_arg = path.display().to_string();
    let cli = Cli::try_parse_from([
        "shopbot",
        "config",
        "--config",
        path_arg.as_str(),
        "--store-name",
        "Flag Mart",
        "--log-level",
        "debug",
        "--log-format",
        "json",
    ])
    .expect("flags should parse");
    let options = cli.load_options();
    let overrides = options.overrides.clone();
    let loaded = AppConfig::load(options);
    let output = loaded.map(|app_config| {
        (app_config.clone(), config::run(&app_config, Some(&path), &overrides))
    });
    env::remove_var("SHOPBOT_LOG_LEVEL");

    let (loaded, output) = output.expect("config should load");
    assert_eq!(loaded.store.name, "Flag Mart");
    assert_eq!(loaded.logging.level, "debug");
    assert_eq!(loaded.logging.format, LogFormat::Json);
    assert!(output.contains("- store.name = Flag Mart (source: cli (--store-name))"));
    assert!(output.contains("- logging.level = debug (source: cli (--log-level))"));
    assert!(output.contains("- logging.format = Json (source: cli (--log-format))"));

    let ask = ask::run(&loaded, &["hello".to_string()]);
    assert!(ask.output.contains("Welcome to Flag Mart."));
}

#[test]
fn explicit_config_path_must_exist() {
    let _guard = env_lock().lock().expect("env lock");
    let dir = tempfile::TempDir::new().expect("tempdir");
    let missing = dir.path().join("absent.toml").display().to_string();

    let cli = Cli::try_parse_from(["shopbot", "--config", missing.as_str(), "catalog"])
        .expect("flags should parse");
    let error = AppConfig::load(cli.load_options()).expect_err("missing file is an error");

    assert!(matches!(error, ConfigError::MissingConfigFile(_)));
    let result = CommandResult::from_error("catalog", &ApplicationError::from(error));
    assert_eq!(result.exit_code, 2);
    assert_eq!(parse_payload(&result.output)["error_class"], "config_validation");
}

#[test]
fn unknown_log_format_flag_is_rejected_by_the_parser() {
    let parsed = Cli::try_parse_from(["shopbot", "--log-format", "xml", "catalog"]);
    assert!(parsed.is_err());
}
