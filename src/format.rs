//! Display formatting for prices and percentages

use crate::types::Currency;
use num_format::{Locale, ToFormattedString};

/// Grouping locale for a display currency
///
/// INR uses the Indian lakh/crore grouping (1,00,000); USD and EUR use
/// western thousands grouping.
fn locale(currency: Currency) -> Locale {
    match currency {
        Currency::USD | Currency::EUR => Locale::en,
        Currency::INR => Locale::en_IN,
    }
}

/// Formats an amount as a localized currency string, e.g. `$50,000.00`
/// or `₹1,00,000.00`.
///
/// Rounds to two decimal places. Negative amounts carry a leading minus
/// before the currency symbol.
pub fn format_currency(amount: f64, currency: Currency) -> String {
    let negative = amount < 0.0;
    let cents_total = (amount.abs() * 100.0).round() as u128;
    let whole = cents_total / 100;
    let cents = cents_total % 100;

    format!(
        "{}{}{}.{:02}",
        if negative { "-" } else { "" },
        currency.symbol(),
        whole.to_formatted_string(&locale(currency)),
        cents
    )
}

/// Formats a 24h change percentage with an explicit sign, e.g. `+1.23%`.
pub fn format_change(pct: f64) -> String {
    format!("{:+.2}%", pct)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usd_uses_thousands_grouping() {
        assert_eq!(format_currency(50_000.0, Currency::USD), "$50,000.00");
        assert_eq!(format_currency(1_234_567.891, Currency::USD), "$1,234,567.89");
    }

    #[test]
    fn inr_uses_lakh_grouping() {
        assert_eq!(format_currency(100_000.0, Currency::INR), "₹1,00,000.00");
        assert_eq!(format_currency(12_345_678.0, Currency::INR), "₹1,23,45,678.00");
    }

    #[test]
    fn euro_and_small_amounts() {
        assert_eq!(format_currency(0.5, Currency::EUR), "€0.50");
        assert_eq!(format_currency(999.999, Currency::EUR), "€1,000.00");
    }

    #[test]
    fn negative_amounts_carry_a_leading_minus() {
        assert_eq!(format_currency(-42.5, Currency::USD), "-$42.50");
    }

    #[test]
    fn change_is_signed() {
        assert_eq!(format_change(1.234), "+1.23%");
        assert_eq!(format_change(-0.5), "-0.50%");
        assert_eq!(format_change(0.0), "+0.00%");
    }
}
