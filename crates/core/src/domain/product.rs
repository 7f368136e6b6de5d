use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Case-insensitive product key: the product name, lower-cased.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn from_name(name: &str) -> Self {
        Self(name.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub available: bool,
}

impl Product {
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: Decimal) -> Self {
        let name = name.into();
        Self {
            id: ProductId::from_name(&name),
            name,
            description: description.into(),
            price,
            available: true,
        }
    }

    pub fn out_of_stock(mut self) -> Self {
        self.available = false;
        self
    }

    /// Lower-cased name used for matching against normalized user text.
    pub fn match_key(&self) -> &str {
        self.id.as_str()
    }

    pub fn availability_label(&self) -> &'static str {
        if self.available {
            "Available"
        } else {
            "Out of stock"
        }
    }
}
