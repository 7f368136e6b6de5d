use std::env;
use std::fs;
use std::path::Path;

use shopbot_core::config::{detect_config_path, AppConfig, ConfigOverrides};
use toml::Value;

/// Renders effective settings with where each value came from.
pub fn run(
    config: &AppConfig,
    explicit_path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> String {
    let config_file_path = detect_config_path(explicit_path);
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let source = |key_path: &str, flag: Option<&str>, env_keys: &[&str]| -> String {
        if let Some(flag) = flag {
            return format!("cli ({flag})");
        }
        field_source(key_path, env_keys, config_file_doc.as_ref(), config_file_path.as_deref())
    };

    let mut lines =
        vec!["effective config (source precedence: cli > env > file > default):".to_string()];

    lines.push(render_line(
        "store.name",
        &config.store.name,
        source(
            "store.name",
            overrides.store_name.as_ref().map(|_| "--store-name"),
            &["SHOPBOT_STORE_NAME"],
        ),
    ));
    lines.push(render_line(
        "logging.level",
        &config.logging.level,
        source(
            "logging.level",
            overrides.log_level.as_ref().map(|_| "--log-level"),
            &["SHOPBOT_LOGGING_LEVEL", "SHOPBOT_LOG_LEVEL"],
        ),
    ));
    lines.push(render_line(
        "logging.format",
        &format!("{:?}", config.logging.format),
        source(
            "logging.format",
            overrides.log_format.map(|_| "--log-format"),
            &["SHOPBOT_LOGGING_FORMAT", "SHOPBOT_LOG_FORMAT"],
        ),
    ));

    let products = if config.catalog.products.is_empty() {
        "<storefront>".to_string()
    } else {
        format!("{} configured", config.catalog.products.len())
    };
    lines.push(render_line("catalog.products", &products, source("catalog.products", None, &[])));

    lines.join("\n")
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}
