pub mod commands;
pub mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use shopbot_core::config::{AppConfig, ConfigOverrides, LoadOptions, LogFormat};
use shopbot_core::ApplicationError;

#[derive(Debug, Parser)]
#[command(
    name = "shopbot",
    about = "Text-driven sales assistant",
    long_about = "Chat with the store assistant, ask one-off questions, and inspect the catalog and configuration.",
    after_help = "Examples:\n  shopbot chat\n  shopbot ask add 3 fitness tracker\n  shopbot catalog --json"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to a shopbot.toml config file (must exist)")]
    config: Option<PathBuf>,
    #[arg(long, global = true, help = "Override store.name")]
    store_name: Option<String>,
    #[arg(long, global = true, help = "Override logging.level (trace|debug|info|warn|error)")]
    log_level: Option<String>,
    #[arg(long, global = true, help = "Override logging.format (compact|pretty|json)")]
    log_format: Option<LogFormat>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Start an interactive shopping conversation (type quit, exit or bye to leave)")]
    Chat,
    #[command(about = "Answer a single utterance with a fresh cart and print the reply")]
    Ask {
        #[arg(required = true, num_args = 1.., help = "What the shopper says")]
        text: Vec<String>,
    },
    #[command(about = "Print the effective product catalog")]
    Catalog {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

impl Cli {
    /// Flag values take precedence over env and file. An explicit `--config` must exist.
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            config_path: self.config.clone(),
            require_file: self.config.is_some(),
            overrides: self.overrides(),
        }
    }

    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            store_name: self.store_name.clone(),
            log_level: self.log_level.clone(),
            log_format: self.log_format,
        }
    }
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::load(cli.load_options()) {
        Ok(config) => config,
        Err(error) => {
            let result = commands::CommandResult::from_error(
                command_name(&cli.command),
                &ApplicationError::from(error),
            );
            println!("{}", result.output);
            return ExitCode::from(result.exit_code);
        }
    };
    logging::init_logging(&config.logging);
    let overrides = cli.overrides();

    let result = match cli.command {
        Command::Chat => commands::chat::run(&config),
        Command::Ask { text } => commands::ask::run(&config, &text),
        Command::Catalog { json } => commands::catalog::run(&config, json),
        Command::Config => commands::CommandResult::text(commands::config::run(
            &config,
            cli.config.as_deref(),
            &overrides,
        )),
    };

    if !result.output.is_empty() {
        println!("{}", result.output);
    }
    ExitCode::from(result.exit_code)
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Chat => "chat",
        Command::Ask { .. } => "ask",
        Command::Catalog { .. } => "catalog",
        Command::Config => "config",
    }
}
