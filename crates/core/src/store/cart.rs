use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::product::{Product, ProductId};
use crate::store::pricing::{format_price, line_total};

pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty.";

#[derive(Clone, Debug, PartialEq)]
pub struct CartLine {
    pub product: Arc<Product>,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> Decimal {
        line_total(self.product.price, self.quantity)
    }
}

/// Session cart. Lines stay in first-added order and never hold a zero quantity.
#[derive(Clone, Debug, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` units, merging into an existing line for the same product.
    /// Quantity validation belongs to the caller; zero is ignored here, and so is
    /// a merge whose running quantity would not fit in a `u32`.
    pub fn add_item(&mut self, product: &Arc<Product>, quantity: u32) {
        if quantity == 0 {
            return;
        }

        match self.lines.iter_mut().find(|line| line.product.id == product.id) {
            Some(line) => {
                if let Some(merged) = line.quantity.checked_add(quantity) {
                    line.quantity = merged;
                }
            }
            None => self.lines.push(CartLine { product: Arc::clone(product), quantity }),
        }
    }

    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn display(&self) -> String {
        if self.lines.is_empty() {
            return EMPTY_CART_MESSAGE.to_string();
        }

        let mut rendered = String::from("Your cart:\n");
        for line in &self.lines {
            rendered.push_str(&format!(
                "- {} (x{}): {}\n",
                line.product.name,
                line.quantity,
                format_price(line.line_total())
            ));
        }
        rendered.push_str(&format!("\nTotal: {}", format_price(self.total())));
        rendered
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn quantity_of(&self, product_id: &ProductId) -> u32 {
        self.lines
            .iter()
            .find(|line| &line.product.id == product_id)
            .map(|line| line.quantity)
            .unwrap_or(0)
    }
}
