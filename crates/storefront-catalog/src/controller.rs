//! Acquisition controller: picks the store for each listing fetch, applies
//! results to observable state, and performs the one automatic switch from
//! the primary to the fallback store.
//!
//! State has one writer (the controller) and any number of readers, who
//! either take a [`AcquisitionController::snapshot`] or watch for changes via
//! [`AcquisitionController::subscribe`].
//!
//! Every `fetch` takes a ticket when it is issued. When its store call
//! settles, the result is applied only if no newer ticket has been issued
//! since; otherwise it is dropped. The in-flight call itself is never
//! aborted.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use storefront_core::{FetchRequest, PageInfo, Product, SourceMode};
use tokio::sync::watch;

use crate::auth::AuthProvider;
use crate::error::{ClassifiedError, ErrorKind};
use crate::source::{AcquisitionResult, DataSource};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControllerOptions {
    /// When nobody is signed in, serve primary-mode fetches from the
    /// fallback store instead of making a call the primary store would
    /// reject. The mode itself is left alone.
    pub skip_primary_when_anonymous: bool,
}

/// What a `fetch` call did to controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The result was applied; mode unchanged.
    Applied,
    /// The result was a source-level failure from primary mode; the
    /// controller is now in fallback mode. The caller should notify the user
    /// and fetch again.
    SwitchedToFallback,
    /// A newer fetch (or a reset) was issued first; the result was dropped.
    Superseded,
}

/// The four observable states of the listing view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    PrimaryOk,
    PrimaryError,
    FallbackOk,
    FallbackError,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AcquisitionState {
    /// Products from the most recent applied success.
    pub products: Vec<Product>,
    pub page_info: PageInfo,
    pub error: Option<ClassifiedError>,
    pub mode: SourceMode,
    /// Set by the automatic switch, cleared by `retry_primary`.
    pub switched: bool,
    /// A fetch has been issued and its result is not yet applied.
    pub loading: bool,
    /// Store that produced `products`; `None` until the first success.
    pub served_by: Option<SourceMode>,
}

impl AcquisitionState {
    #[must_use]
    pub fn phase(&self) -> Phase {
        match (self.mode, self.error.is_some()) {
            (SourceMode::Primary, false) => Phase::PrimaryOk,
            (SourceMode::Primary, true) => Phase::PrimaryError,
            (SourceMode::Fallback, false) => Phase::FallbackOk,
            (SourceMode::Fallback, true) => Phase::FallbackError,
        }
    }

    /// A successful fetch that matched no products, as distinct from an error.
    #[must_use]
    pub fn is_empty_result(&self) -> bool {
        self.error.is_none() && self.served_by.is_some() && self.products.is_empty()
    }

    #[must_use]
    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error.as_ref().map(|e| e.kind)
    }
}

pub struct AcquisitionController<P, F> {
    primary: P,
    fallback: F,
    auth: Arc<dyn AuthProvider>,
    options: ControllerOptions,
    state: watch::Sender<AcquisitionState>,
    latest_ticket: AtomicU64,
}

impl<P, F> AcquisitionController<P, F>
where
    P: DataSource,
    F: DataSource,
{
    /// Creates a controller in primary mode with no products and no error.
    #[must_use]
    pub fn new(primary: P, fallback: F, auth: Arc<dyn AuthProvider>) -> Self {
        let (state, _) = watch::channel(AcquisitionState::default());
        Self {
            primary,
            fallback,
            auth,
            options: ControllerOptions::default(),
            state,
            latest_ticket: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: ControllerOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn snapshot(&self) -> AcquisitionState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AcquisitionState> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn mode(&self) -> SourceMode {
        self.state.borrow().mode
    }

    /// Fetches one page from the store selected by the current mode and
    /// applies the result, unless a newer fetch was issued meanwhile.
    ///
    /// A failure classified as `Unauthorized` or `NotFound` from the primary
    /// store while in primary mode switches to fallback mode and returns
    /// [`FetchOutcome::SwitchedToFallback`]. No fetch is re-issued; that is
    /// the caller's job. Failures in fallback mode are only recorded.
    pub async fn fetch(&self, request: FetchRequest) -> FetchOutcome {
        let ticket = self.latest_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        let mode = self.mode();
        self.state.send_if_modified(|state| !std::mem::replace(&mut state.loading, true));

        let target = self.route(mode);
        let result = match target {
            SourceMode::Primary => self.primary.get(&request).await,
            SourceMode::Fallback => self.fallback.get(&request).await,
        };

        let outcome = self.apply(ticket, target, result);
        match outcome {
            FetchOutcome::Superseded => {
                tracing::debug!(ticket, source = %target, "dropping result of superseded fetch");
            }
            FetchOutcome::SwitchedToFallback => {
                tracing::warn!(
                    ticket,
                    "primary store unavailable; switched to fallback store"
                );
            }
            FetchOutcome::Applied => {
                tracing::debug!(ticket, source = %target, "applied fetch result");
            }
        }
        outcome
    }

    /// Returns to primary mode and clears the error and the switch flag.
    ///
    /// Fetches still in flight are invalidated, so a late fallback result
    /// cannot overwrite the reset. Does not fetch.
    pub fn retry_primary(&self) {
        self.latest_ticket.fetch_add(1, Ordering::SeqCst);
        self.state.send_modify(|state| {
            state.mode = SourceMode::Primary;
            state.error = None;
            state.switched = false;
            state.loading = false;
        });
        tracing::info!("reset to primary store");
    }

    /// Clears the held error without touching the mode. Watchers are not
    /// notified when there was nothing to clear.
    pub fn clear_error(&self) {
        self.state.send_if_modified(|state| state.error.take().is_some());
    }

    fn route(&self, mode: SourceMode) -> SourceMode {
        if mode == SourceMode::Primary
            && self.options.skip_primary_when_anonymous
            && self.auth.current_identity().is_none()
        {
            tracing::debug!("no signed-in user; serving listing from fallback store");
            return SourceMode::Fallback;
        }
        mode
    }

    fn apply(&self, ticket: u64, target: SourceMode, result: AcquisitionResult) -> FetchOutcome {
        let mut outcome = FetchOutcome::Superseded;
        self.state.send_if_modified(|state| {
            if self.latest_ticket.load(Ordering::SeqCst) != ticket {
                return false;
            }
            state.loading = false;
            match result {
                Ok(page) => {
                    state.products = page.products;
                    state.page_info = page.info;
                    state.error = None;
                    state.served_by = Some(target);
                    outcome = FetchOutcome::Applied;
                }
                Err(error) => {
                    outcome = if target == SourceMode::Primary
                        && state.mode == SourceMode::Primary
                        && error.kind.triggers_fallback()
                    {
                        state.mode = SourceMode::Fallback;
                        state.switched = true;
                        FetchOutcome::SwitchedToFallback
                    } else {
                        FetchOutcome::Applied
                    };
                    tracing::info!(kind = %error.kind, code = ?error.code, "fetch failed: {}", error.message);
                    state.error = Some(error);
                }
            }
            true
        });
        outcome
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
