//! Exchange-rate quotes and the quote-source capability.
//!
//! A [`QuoteSource`] produces the current exchange rate for one fiat currency.
//! The widget keeps one cached [`PriceQuote`] per configured currency,
//! replaced wholesale on each successful refresh and retained until replaced;
//! there is no expiry, only continuous refresh.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::currency::CurrencyCode;
use crate::timestamp::UnixTimestamp;

/// A timestamped exchange-rate sample for one fiat currency.
///
/// `price` follows the index convention: the fiat value of one whole coin,
/// expressed in hundredths of the fiat unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub currency: CurrencyCode,
    pub price: f64,
    pub fetched_at: UnixTimestamp,
}

impl PriceQuote {
    /// Whether this quote can price a payment.
    pub fn is_payable(&self) -> bool {
        self.price > 0.0
    }
}

/// Errors fetching a quote.
///
/// The widget treats every variant the same way: the failed refresh is
/// dropped, the cached quote (if any) stays, and the next poll tick retries.
#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    #[error("URL parse error: {context}: {source}")]
    UrlParse {
        context: &'static str,
        #[source]
        source: url::ParseError,
    },
    #[error("HTTP error: {context}: {source}")]
    Http {
        context: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("unexpected HTTP status {status}: {context}: {body}")]
    HttpStatus {
        context: &'static str,
        status: StatusCode,
        body: String,
    },
    #[error("malformed quote payload: {context}: {source}")]
    MalformedPayload {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to read response body as text: {context}: {source}")]
    ResponseBodyRead {
        context: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

/// Capability that produces the current exchange rate for a currency.
///
/// Implementations perform one fetch per call and do not retry; retry cadence
/// belongs to the widget poll loop.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn fetch_quote(&self, currency: CurrencyCode) -> Result<PriceQuote, QuoteError>;
}
