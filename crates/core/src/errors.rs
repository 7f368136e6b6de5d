use rust_decimal::Decimal;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate product name `{name}` (names are case-insensitive)")]
    DuplicateProduct { name: String },
    #[error("product at position {position} has an empty name")]
    EmptyName { position: usize },
    #[error("product `{name}` has a negative price")]
    NegativePrice { name: String },
    #[error("product `{name}` is priced above the {max} limit")]
    PriceTooLarge { name: String, max: Decimal },
}

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("terminal i/o failure: {0}")]
    Io(String),
}

impl ApplicationError {
    /// Stable machine-readable class used by CLI failure payloads.
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::Catalog(_) => "catalog_validation",
            Self::Config(_) => "config_validation",
            Self::Io(_) => "io",
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Catalog(_) | Self::Config(_) => 2,
            Self::Io(_) => 3,
        }
    }
}

impl From<std::io::Error> for ApplicationError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value.to_string())
    }
}
