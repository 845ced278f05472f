//! The external wallet-provider capability.
//!
//! The widget does not sign or broadcast anything itself. It hands a
//! [`PaymentRequest`] to an injected [`WalletProvider`] and maps the single
//! resolution of that call onto its lifecycle. Presence of a provider is
//! probed through a [`WalletGateway`], once per activation.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;
use url::Url;

use crate::satoshi::Satoshis;

/// Where users without an installed wallet are sent instead of a payment
/// attempt.
pub static WALLET_INSTALL_URL: Lazy<Url> =
    Lazy::new(|| Url::parse("https://badger.bitcoin.com").expect("valid wallet URL"));

/// A single payment attempt handed to the wallet provider.
///
/// Constructed fresh per activation and never persisted. Field names follow
/// the provider's transaction-parameter wire form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Destination address.
    pub to: String,
    /// Source account, resolved from the provider at submission time.
    pub from: String,
    /// Amount in satoshis.
    pub value: Satoshis,
}

/// Transaction identifier returned by the provider on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxId(pub String);

impl Display for TxId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error reported by the wallet provider for a submitted transaction.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    /// The provider rejected the transaction, or the user cancelled it.
    #[error("transaction rejected: {0}")]
    Rejected(String),
}

/// Transaction-signing capability exposed by an installed wallet.
///
/// `send_transaction` resolves exactly once per request, with either the
/// transaction id or the provider's rejection.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// The provider's currently selected account.
    fn default_account(&self) -> String;

    /// Submits a payment for signing and broadcast.
    async fn send_transaction(&self, request: PaymentRequest) -> Result<TxId, ProviderError>;
}

/// Result of probing for a wallet provider.
#[derive(Clone)]
pub enum WalletCapability {
    /// A provider is installed and ready to sign.
    Available(Arc<dyn WalletProvider>),
    /// No provider; the widget falls back to [`WALLET_INSTALL_URL`].
    Unavailable,
}

impl Debug for WalletCapability {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            WalletCapability::Available(_) => f.write_str("WalletCapability::Available"),
            WalletCapability::Unavailable => f.write_str("WalletCapability::Unavailable"),
        }
    }
}

/// Probes the environment for a wallet provider.
///
/// The widget resolves the capability through this trait once per activation
/// rather than re-probing ad hoc.
pub trait WalletGateway: Send + Sync {
    fn capability(&self) -> WalletCapability;
}

/// A fixed capability is its own gateway. Useful when the embedding shell
/// probes once at startup, and in tests.
impl WalletGateway for WalletCapability {
    fn capability(&self) -> WalletCapability {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_request_wire_form() {
        let request = PaymentRequest {
            to: "bitcoincash:qpm2qsznhks23z7629mms6s4cwef74vcwvy22gdx6a".to_string(),
            from: "bitcoincash:qr95sy3j9xwd2ap32xkykttr4cvcu7as4y0qverfuy".to_string(),
            value: Satoshis::new(50_000_000),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["to"], request.to);
        assert_eq!(json["from"], request.from);
        assert_eq!(json["value"], 50_000_000u64);
    }

    #[test]
    fn test_fixed_capability_is_a_gateway() {
        let gateway: &dyn WalletGateway = &WalletCapability::Unavailable;
        assert!(matches!(
            gateway.capability(),
            WalletCapability::Unavailable
        ));
    }

    #[test]
    fn test_install_url() {
        assert_eq!(WALLET_INSTALL_URL.as_str(), "https://badger.bitcoin.com/");
    }
}
