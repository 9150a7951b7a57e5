//! Type-safe price representation using decimal arithmetic.
//!
//! Amounts are kept at full precision while computing and only rounded to two
//! decimal places when displayed.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., rupees, not paise).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Format for display (e.g., "₹60.00").
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{}", self.currency_code.symbol(), format_amount(self.amount))
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

/// Round to two decimal places (half away from zero) and render with exactly
/// two fractional digits.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    INR,
    USD,
    EUR,
    GBP,
}

impl CurrencyCode {
    /// Currency symbol used in rendered prices and order messages.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::INR => "\u{20b9}",
            Self::USD => "$",
            Self::EUR => "\u{20ac}",
            Self::GBP => "\u{00a3}",
        }
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INR" => Ok(Self::INR),
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            other => Err(format!("unsupported currency: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pads_to_two_places() {
        let price = Price::new(Decimal::from(60), CurrencyCode::INR);
        assert_eq!(price.display(), "\u{20b9}60.00");
        assert_eq!(
            Price::new(Decimal::new(5, 1), CurrencyCode::USD).to_string(),
            "$0.50"
        );
    }

    #[test]
    fn test_display_rounds_half_away_from_zero() {
        // 0.125 -> 0.13 (banker's rounding would give 0.12)
        let amount = Decimal::new(125, 3);
        assert_eq!(format_amount(amount), "0.13");
        // Exact decimal midpoint, not the nearest binary double
        assert_eq!(format_amount(Decimal::new(1005, 3)), "1.01");
        assert_eq!(format_amount(Decimal::new(4995, 3)), "5.00");
    }

    #[test]
    fn test_format_amount_small_unit_price() {
        // 120 per kg is 0.12 per gram
        assert_eq!(format_amount(Decimal::new(12, 2)), "0.12");
    }

    #[test]
    fn test_currency_from_str() {
        assert_eq!("inr".parse::<CurrencyCode>(), Ok(CurrencyCode::INR));
        assert!("XYZ".parse::<CurrencyCode>().is_err());
    }
}
