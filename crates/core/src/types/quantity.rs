//! Lenient quantity parsing for form input.

use core::str::FromStr;

use rust_decimal::Decimal;

/// Parse a quantity typed by a customer.
///
/// Blank or non-numeric input yields zero, which removes the product from the
/// cart. Leading numeric text is honoured (`"1.5kg"` parses as `1.5`), matching
/// how a number field reports partially typed values.
#[must_use]
pub fn parse_quantity(input: &str) -> Decimal {
    let trimmed = input.trim();
    if let Ok(value) = Decimal::from_str(trimmed) {
        return value;
    }

    let prefix = numeric_prefix(trimmed);
    Decimal::from_str(prefix).unwrap_or(Decimal::ZERO)
}

/// Longest prefix that looks like a signed decimal number.
fn numeric_prefix(input: &str) -> &str {
    let mut end = 0;
    let mut seen_dot = false;
    let mut seen_digit = false;

    for (idx, ch) in input.char_indices() {
        match ch {
            '+' | '-' if idx == 0 => {}
            '.' if !seen_dot => seen_dot = true,
            '0'..='9' => seen_digit = true,
            _ => break,
        }
        end = idx + ch.len_utf8();
    }

    if seen_digit { input.get(..end).unwrap_or("") } else { "" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_quantity("500"), Decimal::from(500));
        assert_eq!(parse_quantity(" 0.5 "), Decimal::new(5, 1));
    }

    #[test]
    fn test_parse_blank_is_zero() {
        assert_eq!(parse_quantity(""), Decimal::ZERO);
        assert_eq!(parse_quantity("   "), Decimal::ZERO);
    }

    #[test]
    fn test_parse_garbage_is_zero() {
        assert_eq!(parse_quantity("abc"), Decimal::ZERO);
        assert_eq!(parse_quantity("."), Decimal::ZERO);
    }

    #[test]
    fn test_parse_numeric_prefix() {
        assert_eq!(parse_quantity("1.5kg"), Decimal::new(15, 1));
        assert_eq!(parse_quantity("2.5.1"), Decimal::new(25, 1));
    }

    #[test]
    fn test_parse_keeps_sign() {
        assert_eq!(parse_quantity("-3"), Decimal::from(-3));
    }
}
