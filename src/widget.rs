//! The payment widget state machine.
//!
//! A [`PaymentWidget`] owns the lifecycle of one payment button: it keeps the
//! exchange-rate cache warm through a recurring poll task, prices an
//! activation on demand, hands the request to the wallet provider, and maps
//! the provider's single-fire outcome onto `Fresh → Pending → Complete`
//! transitions and caller callbacks.
//!
//! Two background activities exist per instance: the poll task (which only
//! ever touches the quote cache) and at most one in-flight submission (which
//! only ever touches lifecycle state). Because neither touches the other's
//! data, a provider-driven transition can never race with polling.

use dashmap::DashMap;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, trace, warn};

use crate::config::WidgetConfig;
use crate::currency::CurrencyCode;
use crate::quote::{PriceQuote, QuoteSource};
use crate::satoshi::Satoshis;
use crate::view::{AmountDisplay, PriceLine, WidgetView};
use crate::wallet::{
    PaymentRequest, ProviderError, TxId, WALLET_INSTALL_URL, WalletCapability, WalletGateway,
};

/// Lifecycle of a payment attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetState {
    /// Actionable; no submission in flight.
    Fresh,
    /// A submission is in flight with the wallet provider.
    Pending,
    /// The provider confirmed the payment. Terminal for this instance;
    /// resetting means remounting.
    Complete,
}

/// Outcome of a single activation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// A payment request was handed to the wallet provider.
    Submitted,
    /// No payable quote was cached; a refresh was triggered and nothing was
    /// submitted.
    AwaitingQuote,
    /// The widget is pending or complete; the attempt was dropped.
    Ignored,
    /// No wallet provider is installed; the shell should navigate to the
    /// returned URL.
    Fallback(url::Url),
}

/// Invoked once with the transaction id when the provider confirms.
pub type SuccessFn = Arc<dyn Fn(TxId) + Send + Sync>;
/// Invoked once with the provider error when a submission is rejected.
pub type FailureFn = Arc<dyn Fn(ProviderError) + Send + Sync>;

/// Caller callbacks for submission outcomes.
#[derive(Clone)]
pub struct WidgetHooks {
    on_success: SuccessFn,
    on_failure: Option<FailureFn>,
}

impl WidgetHooks {
    pub fn new(on_success: impl Fn(TxId) + Send + Sync + 'static) -> Self {
        Self {
            on_success: Arc::new(on_success),
            on_failure: None,
        }
    }

    pub fn with_failure(mut self, on_failure: impl Fn(ProviderError) + Send + Sync + 'static) -> Self {
        self.on_failure = Some(Arc::new(on_failure));
        self
    }
}

/// A mounted payment button.
pub struct PaymentWidget {
    config: WidgetConfig,
    source: Arc<dyn QuoteSource>,
    wallet: Arc<dyn WalletGateway>,
    hooks: WidgetHooks,
    quotes: Arc<DashMap<CurrencyCode, PriceQuote>>,
    state: Arc<Mutex<WidgetState>>,
    teardown: CancellationToken,
    tasks: TaskTracker,
}

impl PaymentWidget {
    /// Mounts the widget: starts in `Fresh`, fetches a quote immediately, and
    /// keeps refreshing at the configured interval until teardown. Polling
    /// runs regardless of lifecycle state.
    ///
    /// Must be called within a Tokio runtime.
    pub fn mount(
        config: WidgetConfig,
        source: Arc<dyn QuoteSource>,
        wallet: Arc<dyn WalletGateway>,
        hooks: WidgetHooks,
    ) -> Self {
        let quotes: Arc<DashMap<CurrencyCode, PriceQuote>> = Arc::new(DashMap::new());
        let state = Arc::new(Mutex::new(WidgetState::Fresh));
        let teardown = CancellationToken::new();
        let tasks = TaskTracker::new();

        let poll = {
            let source = Arc::clone(&source);
            let quotes = Arc::clone(&quotes);
            let token = teardown.clone();
            let currency = config.currency();
            let interval = config.poll_interval();
            async move {
                // The first tick fires immediately: the mount-time fetch.
                let mut ticker = tokio::time::interval(interval);
                loop {
                    tokio::select! {
                        _ = token.cancelled() => break,
                        _ = ticker.tick() => refresh_quote(source.as_ref(), &quotes, currency).await,
                    }
                }
            }
        };
        tasks.spawn(poll);
        tasks.close();

        Self {
            config,
            source,
            wallet,
            hooks,
            quotes,
            state,
            teardown,
            tasks,
        }
    }

    /// Handles a button activation.
    ///
    /// Valid only in `Fresh`. The `Fresh → Pending` transition happens before
    /// this method returns, so a second activation can never race a first one
    /// into a double submission.
    pub fn activate(&self) -> Activation {
        let mut state = self.state.lock().expect("widget state lock poisoned");
        if *state != WidgetState::Fresh {
            trace!(state = ?*state, "activation ignored");
            return Activation::Ignored;
        }

        let currency = self.config.currency();
        let quote = self
            .quotes
            .get(&currency)
            .map(|entry| *entry.value())
            .filter(PriceQuote::is_payable);
        let Some(quote) = quote else {
            // No payable rate yet: kick one refresh and stay actionable.
            debug!(currency = %currency, "activation without a payable quote");
            let source = Arc::clone(&self.source);
            let quotes = Arc::clone(&self.quotes);
            self.tasks.spawn(async move {
                refresh_quote(source.as_ref(), &quotes, currency).await;
            });
            return Activation::AwaitingQuote;
        };

        // Resolve the capability once per activation.
        let provider = match self.wallet.capability() {
            WalletCapability::Available(provider) => provider,
            WalletCapability::Unavailable => {
                info!("no wallet provider installed, deferring to install page");
                return Activation::Fallback(WALLET_INSTALL_URL.clone());
            }
        };

        let request = PaymentRequest {
            to: self.config.destination().to_string(),
            from: provider.default_account(),
            value: Satoshis::from_fiat(self.config.price(), &quote),
        };
        debug!(value = %request.value, to = %request.to, "submitting payment");

        *state = WidgetState::Pending;
        drop(state);

        let widget_state = Arc::clone(&self.state);
        let hooks = self.hooks.clone();
        let token = self.teardown.clone();
        self.tasks.spawn(async move {
            let outcome = provider.send_transaction(request).await;
            if token.is_cancelled() {
                trace!("provider outcome after teardown dropped");
                return;
            }
            settle_outcome(&widget_state, &hooks, outcome);
        });

        Activation::Submitted
    }

    /// Snapshots the current render model.
    pub fn view(&self) -> WidgetView {
        match self.state() {
            WidgetState::Pending => WidgetView::Pending,
            WidgetState::Complete => WidgetView::Complete,
            WidgetState::Fresh => {
                let amount = if self.config.show_amount() {
                    self.quote()
                        .filter(PriceQuote::is_payable)
                        .map_or(AmountDisplay::Unavailable, |quote| {
                            AmountDisplay::Satoshis(Satoshis::from_fiat(
                                self.config.price(),
                                &quote,
                            ))
                        })
                } else {
                    AmountDisplay::Hidden
                };
                WidgetView::Fresh {
                    label: self.config.label().map(ToOwned::to_owned),
                    tag: self.config.tag().to_string(),
                    price: PriceLine::new(self.config.price(), self.config.currency()),
                    amount,
                }
            }
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> WidgetState {
        *self.state.lock().expect("widget state lock poisoned")
    }

    /// Visual tokens for the shell rendering this widget.
    pub fn theme(&self) -> &crate::view::Theme {
        self.config.theme()
    }

    /// Latest cached quote for the configured currency, if any.
    pub fn quote(&self) -> Option<PriceQuote> {
        self.quotes
            .get(&self.config.currency())
            .map(|entry| *entry.value())
    }

    /// Stops the poll task. A provider outcome arriving after this point is
    /// dropped without touching state or invoking callbacks.
    pub fn unmount(&self) {
        self.teardown.cancel();
    }

    /// Waits for background tasks to wind down after [`Self::unmount`].
    pub async fn drain(&self) {
        self.tasks.wait().await;
    }
}

impl Drop for PaymentWidget {
    fn drop(&mut self) {
        self.teardown.cancel();
    }
}

/// Replaces the cached quote on success; on failure the stale quote (if any)
/// stays until the next tick.
async fn refresh_quote(
    source: &dyn QuoteSource,
    quotes: &DashMap<CurrencyCode, PriceQuote>,
    currency: CurrencyCode,
) {
    match source.fetch_quote(currency).await {
        Ok(quote) => {
            trace!(currency = %currency, price = quote.price, "price quote refreshed");
            quotes.insert(currency, quote);
        }
        Err(err) => {
            debug!(currency = %currency, error = %err, "price quote refresh failed");
        }
    }
}

/// Applies a provider outcome: success completes the widget, an error returns
/// it to `Fresh` for another attempt. The caller callback fires after the
/// transition, outside the state lock.
fn settle_outcome(
    state: &Mutex<WidgetState>,
    hooks: &WidgetHooks,
    outcome: Result<TxId, ProviderError>,
) {
    let mut guard = state.lock().expect("widget state lock poisoned");
    if *guard != WidgetState::Pending {
        trace!(state = ?*guard, "stale provider outcome dropped");
        return;
    }
    match outcome {
        Ok(txid) => {
            *guard = WidgetState::Complete;
            drop(guard);
            info!(txid = %txid, "payment confirmed");
            (hooks.on_success)(txid);
        }
        Err(err) => {
            *guard = WidgetState::Fresh;
            drop(guard);
            warn!(error = %err, "payment rejected by provider");
            if let Some(on_failure) = &hooks.on_failure {
                on_failure(err);
            }
        }
    }
}
