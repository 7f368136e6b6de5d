pub mod config;
pub mod domain;
pub mod errors;
pub mod matcher;
pub mod store;

pub use config::{AppConfig, ConfigError, LoadOptions, LogFormat};
pub use domain::product::{Product, ProductId};
pub use errors::{ApplicationError, CatalogError};
pub use matcher::IntegerLiteral;
pub use store::cart::{Cart, CartLine, EMPTY_CART_MESSAGE};
pub use store::catalog::{Catalog, MAX_PRICE};
pub use store::pricing::format_price;
