//! Money type for representing monetary values.
//!
//! Amounts are integer minor units (centavos for BRL). Nothing in this module
//! goes through floating point, so a value that enters as cents leaves as the
//! same cents.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::PricingError;

/// Basis points in 100%.
pub const BPS_DENOMINATOR: i64 = 10_000;

/// Supported display currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    BRL,
    USD,
    EUR,
}

impl Currency {
    /// Get the currency code (e.g., "BRL").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::BRL => "BRL",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
        }
    }

    /// Get the currency symbol (e.g., "R$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::BRL => "R$",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
        }
    }

    /// Decimal and thousands separators used when displaying amounts.
    fn separators(&self) -> (char, char) {
        match self {
            Currency::BRL | Currency::EUR => (',', '.'),
            Currency::USD => ('.', ','),
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "BRL" => Some(Currency::BRL),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency, stored in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in cents.
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Format as a display string (e.g., "R$ 1.234,56").
    pub fn display(&self) -> String {
        format!("{} {}", self.currency.symbol(), self.display_amount())
    }

    /// Format without symbol (e.g., "1.234,56").
    pub fn display_amount(&self) -> String {
        let (decimal_sep, thousands_sep) = self.currency.separators();
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let cents = self.amount_cents.unsigned_abs();
        let whole = (cents / 100).to_string();

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, digit) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(thousands_sep);
            }
            grouped.push(digit);
        }

        format!("{sign}{grouped}{decimal_sep}{:02}", cents % 100)
    }

    /// Parse a user-typed decimal amount such as `"100"`, `"99.90"`,
    /// `"1.234,56"` or `"R$ 12,5"` into cents.
    ///
    /// When a comma is present it is the decimal separator and dots are
    /// thousands separators; otherwise a dot is the decimal separator.
    pub fn parse(input: &str, currency: Currency) -> Result<Money, PricingError> {
        let invalid = || PricingError::InvalidAmount(input.to_string());

        let cleaned: String = input
            .trim()
            .trim_start_matches(currency.symbol())
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();

        let normalized = if cleaned.contains(',') {
            cleaned.replace('.', "").replace(',', ".")
        } else {
            cleaned
        };

        let (whole, fraction) = match normalized.split_once('.') {
            Some((w, f)) => (w, f),
            None => (normalized.as_str(), ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if fraction.len() > 2 || !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let fraction: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };

        whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(fraction))
            .map(|cents| Money::new(cents, currency))
            .ok_or_else(invalid)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Ceiling of `amount * bps / 10_000` for non-negative amounts.
pub fn ceil_bps(amount_cents: i64, bps: i64) -> i64 {
    let product = i128::from(amount_cents.max(0)) * i128::from(bps.max(0));
    let denominator = i128::from(BPS_DENOMINATOR);
    let ceiled = (product + denominator - 1) / denominator;
    i64::try_from(ceiled).unwrap_or(i64::MAX)
}

/// Ceiling division of a non-negative amount by a positive count.
pub fn ceil_div(amount_cents: i64, count: i64) -> i64 {
    let count = count.max(1);
    let amount = amount_cents.max(0);
    amount / count + i64::from(amount % count != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_display_brl() {
        assert_eq!(Money::new(10000, Currency::BRL).display(), "R$ 100,00");
        assert_eq!(Money::new(123456, Currency::BRL).display(), "R$ 1.234,56");
        assert_eq!(Money::new(5, Currency::BRL).display(), "R$ 0,05");
        assert_eq!(Money::new(100_000_000, Currency::BRL).display_amount(), "1.000.000,00");
    }

    #[test]
    fn test_money_display_usd() {
        assert_eq!(Money::new(123456, Currency::USD).display(), "$ 1,234.56");
        assert_eq!(Money::new(-250, Currency::USD).display_amount(), "-2.50");
    }

    #[test]
    fn test_money_parse() {
        let brl = Currency::BRL;
        assert_eq!(Money::parse("100", brl).unwrap().amount_cents, 10000);
        assert_eq!(Money::parse("99.90", brl).unwrap().amount_cents, 9990);
        assert_eq!(Money::parse("99,9", brl).unwrap().amount_cents, 9990);
        assert_eq!(Money::parse("1.234,56", brl).unwrap().amount_cents, 123456);
        assert_eq!(Money::parse("R$ 12,50", brl).unwrap().amount_cents, 1250);
        assert_eq!(Money::parse(",50", brl).unwrap().amount_cents, 50);
    }

    #[test]
    fn test_money_parse_rejects_garbage() {
        let brl = Currency::BRL;
        assert!(Money::parse("", brl).is_err());
        assert!(Money::parse("abc", brl).is_err());
        assert!(Money::parse("-10", brl).is_err());
        assert!(Money::parse("1.999", brl).is_err());
        assert!(Money::parse("99999999999999999999", brl).is_err());
    }

    #[test]
    fn test_ceil_bps() {
        assert_eq!(ceil_bps(10000, 500), 500);
        assert_eq!(ceil_bps(150, 500), 8);
        assert_eq!(ceil_bps(105, 500), 6);
        assert_eq!(ceil_bps(0, 500), 0);
        assert_eq!(ceil_bps(-10, 500), 0);
    }

    #[test]
    fn test_ceil_div() {
        assert_eq!(ceil_div(10000, 3), 3334);
        assert_eq!(ceil_div(9000, 3), 3000);
        assert_eq!(ceil_div(0, 3), 0);
        assert_eq!(ceil_div(7, 0), 7);
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("brl"), Some(Currency::BRL));
        assert_eq!(Currency::from_code(" EUR "), Some(Currency::EUR));
        assert_eq!(Currency::from_code("XYZ"), None);
    }
}
