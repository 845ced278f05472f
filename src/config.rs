//! Widget configuration.

use serde::Deserialize;
use std::time::Duration;

use crate::currency::CurrencyCode;
use crate::view::Theme;

/// Caller-supplied widget configuration.
///
/// The destination and fiat price are immutable for the widget's lifetime;
/// only the exchange rate and the derived satoshi amount vary. Fields use
/// serde defaults matching the defaults the button ships with.
#[derive(Debug, Clone, Deserialize)]
pub struct WidgetConfig {
    /// Destination address payments are sent to.
    destination: String,
    /// Display price in fiat units.
    price: f64,
    #[serde(default)]
    currency: CurrencyCode,
    /// Whether the converted satoshi amount is shown on the fresh face.
    #[serde(default = "config_defaults::show_amount")]
    show_amount: bool,
    /// Call-to-action text on the button itself.
    #[serde(default = "config_defaults::tag")]
    tag: String,
    /// Optional header label rendered above the button.
    #[serde(default)]
    label: Option<String>,
    /// Quote refresh cadence in seconds.
    #[serde(default = "config_defaults::poll_interval_secs")]
    poll_interval_secs: u64,
    /// Visual tokens handed through to the render model consumers.
    #[serde(default)]
    theme: Theme,
}

mod config_defaults {
    pub(super) fn show_amount() -> bool {
        true
    }

    pub(super) fn tag() -> String {
        "Donate BCH".to_string()
    }

    pub(super) fn poll_interval_secs() -> u64 {
        60
    }
}

impl WidgetConfig {
    /// Creates a configuration for the given destination and fiat price,
    /// with all other fields at their defaults.
    ///
    /// # Panics
    ///
    /// A negative or non-finite price is a contract violation and panics.
    pub fn new(destination: impl Into<String>, price: f64) -> Self {
        assert!(
            price.is_finite() && price >= 0.0,
            "display price must be finite and non-negative"
        );
        Self {
            destination: destination.into(),
            price,
            currency: CurrencyCode::default(),
            show_amount: config_defaults::show_amount(),
            tag: config_defaults::tag(),
            label: None,
            poll_interval_secs: config_defaults::poll_interval_secs(),
            theme: Theme::default(),
        }
    }

    pub fn with_currency(mut self, currency: CurrencyCode) -> Self {
        self.currency = currency;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Hides the converted satoshi amount on the fresh face.
    pub fn without_amount(mut self) -> Self {
        self.show_amount = false;
        self
    }

    /// Overrides the quote refresh cadence (seconds granularity).
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval_secs = interval.as_secs().max(1);
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn currency(&self) -> CurrencyCode {
        self.currency
    }

    pub fn show_amount(&self) -> bool {
        self.show_amount
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }
}
