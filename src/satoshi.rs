//! Satoshi amounts and fiat conversion.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::quote::PriceQuote;

/// Number of satoshis in one whole coin.
pub const SATOSHIS_PER_COIN: u64 = 100_000_000;

/// An amount of Bitcoin Cash in satoshis, the minor unit submitted to the
/// wallet provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Satoshis(u64);

impl Satoshis {
    pub const ZERO: Self = Self(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// The raw satoshi count.
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Converts a fiat price into satoshis at the quoted exchange rate.
    ///
    /// The index quotes the fiat value of one coin in hundredths of the fiat
    /// unit; the result is truncated, not rounded.
    ///
    /// Callers must hold a quote with a strictly positive price.
    pub fn from_fiat(fiat_price: f64, quote: &PriceQuote) -> Self {
        debug_assert!(quote.price > 0.0, "conversion requires a positive quote");
        let unit_fiat_value = quote.price / 100.0;
        let sats_per_fiat_unit = SATOSHIS_PER_COIN as f64 / unit_fiat_value;
        Self((fiat_price * sats_per_fiat_unit).trunc() as u64)
    }

    /// Display-scaled whole-coin value: the truncated satoshi count divided by
    /// 100,000,000 again.
    ///
    /// One shipped display path scales this way; whether that second division
    /// is the intended display unit is an open product question (see
    /// DESIGN.md), so the arithmetic is reproduced rather than corrected.
    pub fn as_coins(&self) -> f64 {
        self.0 as f64 / SATOSHIS_PER_COIN as f64
    }
}

impl Display for Satoshis {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Satoshis {
    fn from(value: u64) -> Self {
        Self(value)
    }
}
