//! Price-aware Bitcoin Cash payment button.
//!
//! This crate implements the payment widget behind a donate/buy button: it
//! polls a remote exchange-rate index, converts a fiat-denominated price into
//! a satoshi amount, drives a three-state payment lifecycle against an
//! injected wallet provider, and exposes a render model for each state.
//!
//! # Overview
//!
//! A mounted [`widget::PaymentWidget`] starts in `Fresh`, keeps one cached
//! exchange-rate quote warm through a recurring poll task, and prices the
//! payment at activation time. Submitting hands a payment request to the
//! wallet provider and moves the widget to `Pending`; the provider's single
//! outcome either completes the widget or returns it to `Fresh` for another
//! attempt. If no wallet provider is installed, activation yields a fallback
//! URL for the embedding shell to open instead.
//!
//! The crate renders nothing itself: [`widget::PaymentWidget::view`] returns
//! plain data, and [`view::Theme`] carries the visual tokens the shell styles
//! it with.
//!
//! # Modules
//!
//! - [`config`] — Caller-supplied widget configuration and defaults.
//! - [`currency`] — Fiat currency codes, glyphs, and price display formatting.
//! - [`price_index`] — HTTP client for the remote price index.
//! - [`quote`] — Exchange-rate quotes, the [`quote::QuoteSource`] capability, and fetch errors.
//! - [`satoshi`] — Satoshi amounts and fiat conversion.
//! - [`timestamp`] — Unix timestamp type used to stamp quotes.
//! - [`view`] — State-appropriate render models and theme tokens.
//! - [`wallet`] — The external wallet-provider capability and payment requests.
//! - [`widget`] — The payment widget state machine.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use badger_pay::config::WidgetConfig;
//! use badger_pay::price_index::PriceIndexClient;
//! use badger_pay::wallet::WalletCapability;
//! use badger_pay::widget::{PaymentWidget, WidgetHooks};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = WidgetConfig::new("bitcoincash:qpm2qsznhks23z7629mms6s4cwef74vcwvy22gdx6a", 0.25)
//!         .with_label("Buy me a coffee");
//!     let hooks = WidgetHooks::new(|txid| println!("payment confirmed: {txid}"));
//!
//!     // No wallet integration wired up: activation falls back to the
//!     // wallet install page.
//!     let widget = PaymentWidget::mount(
//!         config,
//!         Arc::new(PriceIndexClient::new()),
//!         Arc::new(WalletCapability::Unavailable),
//!         hooks,
//!     );
//!     let _view = widget.view();
//! }
//! ```

pub mod config;
pub mod currency;
pub mod price_index;
pub mod quote;
pub mod satoshi;
pub mod timestamp;
pub mod view;
pub mod wallet;
pub mod widget;

pub use config::WidgetConfig;
pub use currency::CurrencyCode;
pub use price_index::PriceIndexClient;
pub use quote::{PriceQuote, QuoteError, QuoteSource};
pub use satoshi::Satoshis;
pub use view::{AmountDisplay, Theme, WidgetView};
pub use wallet::{
    PaymentRequest, ProviderError, TxId, WalletCapability, WalletGateway, WalletProvider,
};
pub use widget::{Activation, PaymentWidget, WidgetHooks, WidgetState};
