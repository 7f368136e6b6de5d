use rust_decimal::{Decimal, RoundingStrategy};

/// Dollar amount rounded half-up to cents, e.g. `$149.97`.
pub fn format_price(amount: Decimal) -> String {
    format!("${:.2}", amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

pub fn line_total(unit_price: Decimal, quantity: u32) -> Decimal {
    unit_price * Decimal::from(quantity)
}
