//! Render model and theme tokens.
//!
//! The widget owns no rendering. [`crate::widget::PaymentWidget::view`]
//! snapshots the lifecycle into plain data; the embedding shell draws it with
//! whatever toolkit it has, styled with [`Theme`] tokens.

use serde::{Deserialize, Serialize};

use crate::currency::{CurrencyCode, format_price};
use crate::satoshi::Satoshis;

/// Visual tokens consumed by the widget chrome. Tokens only, no behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub brand: String,
    pub brand_dark: String,
    pub bg: String,
    pub fg_100: String,
    pub bch_orange: String,
    pub bch_grey: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            brand: "#0AC18E".to_string(),
            brand_dark: "#098E69".to_string(),
            bg: "#FFFFFF".to_string(),
            fg_100: "#EAEAEA".to_string(),
            bch_orange: "#F59332".to_string(),
            bch_grey: "#AAAAAA".to_string(),
        }
    }
}

/// Formatted fiat price line: prefix glyph, formatted value, suffix glyph,
/// ISO code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLine {
    pub symbol_prefix: String,
    pub formatted: String,
    pub symbol_suffix: String,
    pub code: CurrencyCode,
}

impl PriceLine {
    pub fn new(price: f64, currency: CurrencyCode) -> Self {
        Self {
            symbol_prefix: currency.pre_symbol().to_string(),
            formatted: format_price(price),
            symbol_suffix: currency.post_symbol().to_string(),
            code: currency,
        }
    }

    /// Single-line text form, e.g. `$ 0.25 USD` or `19.99元 CNY`.
    pub fn text(&self) -> String {
        let mut line = String::new();
        if !self.symbol_prefix.is_empty() {
            line.push_str(&self.symbol_prefix);
            line.push(' ');
        }
        line.push_str(&self.formatted);
        line.push_str(&self.symbol_suffix);
        line.push(' ');
        line.push_str(self.code.code());
        line
    }
}

/// Converted-amount slot on the fresh face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmountDisplay {
    /// Display disabled by configuration.
    Hidden,
    /// No payable quote loaded yet; rendered as a `----` placeholder.
    Unavailable,
    /// Converted amount in satoshis.
    Satoshis(Satoshis),
}

/// State-appropriate render model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WidgetView {
    /// Actionable face: call-to-action, fiat price, optional converted amount.
    Fresh {
        label: Option<String>,
        tag: String,
        price: PriceLine,
        amount: AmountDisplay,
    },
    /// A submission is in flight; the shell shows a progress affordance.
    Pending,
    /// Payment confirmed; the shell shows a completion indicator.
    Complete,
}
