//! Pricing

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};

use crate::cart::CartItem;

/// Returns `price * quantity`.
pub fn line_total(price: Decimal, quantity: u32) -> Decimal {
    price * Decimal::from(quantity)
}

/// Sum of the line totals of `items`.
pub fn cart_total(items: &[CartItem]) -> Decimal {
    items.iter().map(CartItem::subtotal).sum()
}

/// Formats an amount for display in the given currency, e.g. `$45.50` for MXN.
///
/// The amount is rounded to the currency's minor unit first. Amounts too large for
/// minor-unit arithmetic fall back to the plain decimal rendering.
pub fn format_price(amount: Decimal, currency: &'static Currency) -> String {
    let scale = Decimal::from(10_i64.pow(currency.exponent));

    match (amount * scale).round().to_i64() {
        Some(minor) => Money::from_minor(minor, currency).to_string(),
        None => format!("{} {}", amount.round_dp(currency.exponent), currency.iso_alpha_code),
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::MXN;

    use super::*;

    #[test]
    fn line_total_multiplies_price_by_quantity() {
        assert_eq!(line_total(Decimal::new(1099, 2), 3), Decimal::new(3297, 2));
        assert_eq!(line_total(Decimal::new(1099, 2), 0), Decimal::ZERO);
    }

    #[test]
    fn cart_total_avoids_binary_float_drift() {
        let items = [
            CartItem::new(1, "A", Decimal::new(1, 1), 1),
            CartItem::new(2, "B", Decimal::new(2, 1), 1),
        ];

        assert_eq!(cart_total(&items), Decimal::new(3, 1));
    }

    #[test]
    fn cart_total_of_nothing_is_zero() {
        assert_eq!(cart_total(&[]), Decimal::ZERO);
    }

    #[test]
    fn format_price_uses_currency_symbol_and_minor_units() {
        let formatted = format_price(Decimal::new(455, 1), MXN);

        assert!(formatted.starts_with('$'), "unexpected format: {formatted}");
        assert!(formatted.contains("45.50"), "unexpected format: {formatted}");
    }
}
