//! Fiat currency codes, glyphs, and price display formatting.
//!
//! The price index quotes Bitcoin Cash against a fixed set of fiat currencies.
//! This module defines that set together with the glyph and formatting rules
//! applied when a fiat price is rendered next to the payment button.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Fiat currencies the price index can quote against.
#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    /// United States dollar.
    #[default]
    #[serde(rename = "USD")]
    Usd,
    /// Canadian dollar.
    #[serde(rename = "CAD")]
    Cad,
    /// Hong Kong dollar.
    #[serde(rename = "HKD")]
    Hkd,
    /// Japanese yen.
    #[serde(rename = "JPY")]
    Jpy,
    /// Pound sterling.
    #[serde(rename = "GBP")]
    Gbp,
    /// Euro.
    #[serde(rename = "EUR")]
    Eur,
    /// Renminbi.
    #[serde(rename = "CNY")]
    Cny,
}

impl CurrencyCode {
    /// Return all known [`CurrencyCode`] variants.
    pub fn variants() -> &'static [CurrencyCode] {
        &[
            CurrencyCode::Usd,
            CurrencyCode::Cad,
            CurrencyCode::Hkd,
            CurrencyCode::Jpy,
            CurrencyCode::Gbp,
            CurrencyCode::Eur,
            CurrencyCode::Cny,
        ]
    }

    /// The ISO 4217 code, as it appears in the price endpoint path.
    pub fn code(&self) -> &'static str {
        match self {
            CurrencyCode::Usd => "USD",
            CurrencyCode::Cad => "CAD",
            CurrencyCode::Hkd => "HKD",
            CurrencyCode::Jpy => "JPY",
            CurrencyCode::Gbp => "GBP",
            CurrencyCode::Eur => "EUR",
            CurrencyCode::Cny => "CNY",
        }
    }

    /// Glyph rendered before the numeric price.
    pub fn pre_symbol(&self) -> &'static str {
        match self {
            CurrencyCode::Usd | CurrencyCode::Cad => "$",
            CurrencyCode::Gbp => "£",
            CurrencyCode::Eur => "€",
            CurrencyCode::Hkd => "HK$",
            CurrencyCode::Jpy => "¥",
            CurrencyCode::Cny => "",
        }
    }

    /// Glyph rendered after the numeric price.
    pub fn post_symbol(&self) -> &'static str {
        match self {
            CurrencyCode::Cny => "元",
            _ => "",
        }
    }
}

impl Display for CurrencyCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when parsing an unknown currency code.
#[derive(Debug, thiserror::Error)]
#[error("unknown currency code: {0}")]
pub struct ParseCurrencyError(String);

impl FromStr for CurrencyCode {
    type Err = ParseCurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CurrencyCode::variants()
            .iter()
            .find(|c| c.code() == s)
            .copied()
            .ok_or_else(|| ParseCurrencyError(s.to_string()))
    }
}

/// Formats a fiat price for display.
///
/// Whole values at or above 1 render with no decimals, fractional values at or
/// above 1 with exactly two, and sub-unit values with two significant digits,
/// trailing zeros kept.
///
/// # Panics
///
/// A negative or non-finite value is a contract violation and panics.
pub fn format_price(value: f64) -> String {
    assert!(
        value.is_finite() && value >= 0.0,
        "display price must be finite and non-negative"
    );
    if value >= 1.0 {
        if value.fract() == 0.0 {
            format!("{value:.0}")
        } else {
            format!("{value:.2}")
        }
    } else {
        two_significant_digits(value)
    }
}

/// Renders a sub-unit value with exactly two significant digits.
///
/// Goes through scientific notation so rounding carry lands in the right
/// decimal place (0.0999 renders as "0.10", not "0.100").
fn two_significant_digits(value: f64) -> String {
    if value == 0.0 {
        return "0.0".to_string();
    }
    let sci = format!("{value:.1e}");
    let (mantissa, exponent) = sci.split_once('e').expect("scientific notation");
    let exponent: i32 = exponent.parse().expect("scientific exponent");
    if exponent >= 0 {
        // Rounding carried the value up to 1 (e.g. 0.999).
        return mantissa.to_string();
    }
    let digits = mantissa.replace('.', "");
    let zeros = "0".repeat((-exponent - 1) as usize);
    format!("0.{zeros}{digits}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pre_symbols() {
        assert_eq!(CurrencyCode::Usd.pre_symbol(), "$");
        assert_eq!(CurrencyCode::Cad.pre_symbol(), "$");
        assert_eq!(CurrencyCode::Gbp.pre_symbol(), "£");
        assert_eq!(CurrencyCode::Eur.pre_symbol(), "€");
        assert_eq!(CurrencyCode::Hkd.pre_symbol(), "HK$");
        assert_eq!(CurrencyCode::Jpy.pre_symbol(), "¥");
        assert_eq!(CurrencyCode::Cny.pre_symbol(), "");
    }

    #[test]
    fn test_post_symbols() {
        for currency in CurrencyCode::variants() {
            let expected = if *currency == CurrencyCode::Cny {
                "元"
            } else {
                ""
            };
            assert_eq!(currency.post_symbol(), expected);
        }
    }

    #[test]
    fn test_code_round_trips() {
        for currency in CurrencyCode::variants() {
            assert_eq!(currency.code().parse::<CurrencyCode>().unwrap(), *currency);
        }
        assert!("XAU".parse::<CurrencyCode>().is_err());
    }

    #[test]
    fn test_serde_uses_iso_code() {
        let json = serde_json::to_string(&CurrencyCode::Eur).unwrap();
        assert_eq!(json, "\"EUR\"");
        let back: CurrencyCode = serde_json::from_str("\"CNY\"").unwrap();
        assert_eq!(back, CurrencyCode::Cny);
    }

    #[test]
    fn test_format_whole_values() {
        assert_eq!(format_price(1.0), "1");
        assert_eq!(format_price(12.0), "12");
        assert_eq!(format_price(100.0), "100");
    }

    #[test]
    fn test_format_fractional_values() {
        assert_eq!(format_price(1.5), "1.50");
        assert_eq!(format_price(19.99), "19.99");
    }

    #[test]
    fn test_format_sub_unit_values() {
        assert_eq!(format_price(0.25), "0.25");
        assert_eq!(format_price(0.0049), "0.0049");
        assert_eq!(format_price(0.1), "0.10");
        assert_eq!(format_price(0.0), "0.0");
    }

    #[test]
    fn test_format_sub_unit_rounding_carry() {
        assert_eq!(format_price(0.0999), "0.10");
        assert_eq!(format_price(0.999), "1.0");
    }

    #[test]
    #[should_panic(expected = "finite and non-negative")]
    fn test_format_rejects_negative() {
        format_price(-1.0);
    }
}
