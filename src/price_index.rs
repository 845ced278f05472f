//! HTTP client for the remote price index.
//!
//! Builds `GET {base}{CODE}` requests against the bitcoin.com price index and
//! parses the `{price, stamp}` payload into a [`PriceQuote`]. No
//! authentication, no request body, and no retries: a failed fetch surfaces as
//! a [`QuoteError`] and the caller's poll cadence decides when to try again.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::currency::CurrencyCode;
use crate::quote::{PriceQuote, QuoteError, QuoteSource};
use crate::timestamp::UnixTimestamp;

/// Default base of the price endpoint; the currency code is appended per
/// request.
pub static DEFAULT_ENDPOINT: Lazy<Url> = Lazy::new(|| {
    Url::parse("https://index-api.bitcoin.com/api/v0/cash/price/").expect("valid endpoint URL")
});

/// Quote payload as served by the index.
#[derive(Debug, Deserialize)]
struct RawQuote {
    price: f64,
    stamp: u64,
}

/// A client for the remote price index.
#[derive(Debug, Clone)]
pub struct PriceIndexClient {
    /// Base URL the currency code is joined onto; must end with `/`.
    base_url: Url,
    /// Shared Reqwest HTTP client.
    client: Client,
    /// Optional request timeout.
    timeout: Option<Duration>,
}

impl PriceIndexClient {
    /// Constructs a client against the production price index.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_ENDPOINT.clone())
    }

    /// Constructs a client against a custom index base URL.
    pub fn with_base_url(base_url: Url) -> Self {
        Self {
            base_url,
            client: Client::new(),
            timeout: None,
        }
    }

    /// Returns the base URL used by this client.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Sets a timeout for all future requests.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        let mut this = self.clone();
        this.timeout = Some(timeout);
        this
    }

    /// Fetches the current quote for `currency`.
    pub async fn fetch(&self, currency: CurrencyCode) -> Result<PriceQuote, QuoteError> {
        let context = "GET price";
        let url = self
            .base_url
            .join(currency.code())
            .map_err(|e| QuoteError::UrlParse {
                context: "Failed to construct price URL",
                source: e,
            })?;

        let mut req = self.client.get(url);
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }
        let response = req
            .send()
            .await
            .map_err(|e| QuoteError::Http { context, source: e })?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response
                .text()
                .await
                .map_err(|e| QuoteError::ResponseBodyRead { context, source: e })?;
            return Err(QuoteError::HttpStatus {
                context,
                status,
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| QuoteError::ResponseBodyRead { context, source: e })?;
        let raw: RawQuote = serde_json::from_str(&body)
            .map_err(|e| QuoteError::MalformedPayload { context, source: e })?;

        debug!(currency = %currency, price = raw.price, stamp = raw.stamp, "fetched price quote");

        Ok(PriceQuote {
            currency,
            price: raw.price,
            fetched_at: UnixTimestamp::from_secs(raw.stamp),
        })
    }
}

impl Default for PriceIndexClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts a string URL into a [`PriceIndexClient`] against that base.
impl TryFrom<&str> for PriceIndexClient {
    type Error = QuoteError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let base_url = Url::parse(value).map_err(|e| QuoteError::UrlParse {
            context: "Failed to parse base URL",
            source: e,
        })?;
        Ok(Self::with_base_url(base_url))
    }
}

#[async_trait]
impl QuoteSource for PriceIndexClient {
    async fn fetch_quote(&self, currency: CurrencyCode) -> Result<PriceQuote, QuoteError> {
        self.fetch(currency).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(mock_server: &MockServer) -> PriceIndexClient {
        let base = format!("{}/price/", mock_server.uri());
        PriceIndexClient::try_from(base.as_str()).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_parses_quote() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/price/USD"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "price": 21035.0, "stamp": 1540938240 })),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let quote = client.fetch(CurrencyCode::Usd).await.unwrap();

        assert_eq!(quote.currency, CurrencyCode::Usd);
        assert_eq!(quote.price, 21035.0);
        assert_eq!(quote.fetched_at, UnixTimestamp::from_secs(1540938240));
    }

    #[tokio::test]
    async fn test_fetch_uses_currency_in_path() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/price/EUR"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "price": 18500.0, "stamp": 1 })),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let quote = client.fetch(CurrencyCode::Eur).await.unwrap();
        assert_eq!(quote.currency, CurrencyCode::Eur);
    }

    #[tokio::test]
    async fn test_fetch_surfaces_http_status() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/price/USD"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let err = client.fetch(CurrencyCode::Usd).await.unwrap_err();

        match err {
            QuoteError::HttpStatus { status, body, .. } => {
                assert_eq!(status, StatusCode::BAD_GATEWAY);
                assert_eq!(body, "bad gateway");
            }
            other => panic!("expected HttpStatus, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_surfaces_malformed_payload() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/price/USD"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not a quote"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let err = client.fetch(CurrencyCode::Usd).await.unwrap_err();
        assert!(matches!(err, QuoteError::MalformedPayload { .. }));
    }

    #[tokio::test]
    async fn test_fetch_surfaces_missing_fields_as_malformed() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/price/USD"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "price": 21035.0 })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let err = client.fetch(CurrencyCode::Usd).await.unwrap_err();
        assert!(matches!(err, QuoteError::MalformedPayload { .. }));
    }

    #[test]
    fn test_default_endpoint() {
        let client = PriceIndexClient::new();
        assert_eq!(
            client.base_url().as_str(),
            "https://index-api.bitcoin.com/api/v0/cash/price/"
        );
    }
}
