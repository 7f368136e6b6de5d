use std::collections::BTreeSet;
use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::product::{Product, ProductId};
use crate::errors::CatalogError;
use crate::matcher::contains_whole_word;

/// Highest unit price a catalog accepts. Keeps `price * u32::MAX` summed over
/// any realistic cart well inside `Decimal`'s range.
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Ordered, read-only product list. Order doubles as match priority.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    products: Vec<Arc<Product>>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = BTreeSet::new();
        for (position, product) in products.iter().enumerate() {
            if product.name.trim().is_empty() {
                return Err(CatalogError::EmptyName { position });
            }
            if product.price < Decimal::ZERO {
                return Err(CatalogError::NegativePrice { name: product.name.clone() });
            }
            if product.price > MAX_PRICE {
                return Err(CatalogError::PriceTooLarge {
                    name: product.name.clone(),
                    max: MAX_PRICE,
                });
            }
            if !seen.insert(product.id.clone()) {
                return Err(CatalogError::DuplicateProduct { name: product.name.clone() });
            }
        }

        Ok(Self { products: products.into_iter().map(Arc::new).collect() })
    }

    /// The built-in five-product store.
    pub fn storefront() -> Self {
        let products = vec![
            Product::new(
                "Wireless Earbuds",
                "Bluetooth earbuds with noise cancellation",
                Decimal::new(5999, 2),
            ),
            Product::new(
                "Portable Charger",
                "10000mAh portable charger with fast charging",
                Decimal::new(2999, 2),
            ),
            Product::new(
                "Smart Home Camera",
                "1080p HD security camera with night vision",
                Decimal::new(8999, 2),
            ),
            Product::new(
                "Electric Toothbrush",
                "Rechargeable toothbrush with multiple modes",
                Decimal::new(3999, 2),
            ),
            Product::new(
                "Fitness Tracker",
                "Water-resistant tracker with heart rate monitor",
                Decimal::new(4999, 2),
            ),
        ];

        Self { products: products.into_iter().map(Arc::new).collect() }
    }

    pub fn products(&self) -> &[Arc<Product>] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn find(&self, product_id: &ProductId) -> Option<&Arc<Product>> {
        self.products.iter().find(|product| &product.id == product_id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Arc<Product>> {
        self.find(&ProductId::from_name(name))
    }

    /// First product whose lower-cased name is a plain substring of `text`.
    /// `text` is expected to be normalized already.
    pub fn find_in_text(&self, text: &str) -> Option<&Arc<Product>> {
        self.products.iter().find(|product| text.contains(product.match_key()))
    }

    /// First product whose lower-cased name appears in `text` as a whole word.
    pub fn find_whole_word_in_text(&self, text: &str) -> Option<&Arc<Product>> {
        self.products.iter().find(|product| contains_whole_word(text, product.match_key()))
    }

    pub fn mentions_any_product(&self, text: &str) -> bool {
        self.find_in_text(text).is_some()
    }

    /// Highest-priced product; ties go to the earliest in catalog order.
    pub fn most_expensive(&self) -> Option<&Arc<Product>> {
        self.products.iter().fold(None, |best: Option<&Arc<Product>>, product| match best {
            Some(current) if current.price >= product.price => Some(current),
            _ => Some(product),
        })
    }
}
