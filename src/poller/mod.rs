//! Wallet connection liveness poller.
//!
//! State machine:
//!   Unknown → Checking → Connected | Disconnected
//!
//! Each tick asks the provider for `eth_accounts`. An empty list means the
//! wallet is no longer connected and the caller runs the logout sequence.
//! A failed request is logged and leaves the previous state in place; the
//! next tick checks again. Without a provider every tick is a no-op.

use crate::provider::{self, ProviderError, WalletProvider};
use std::cell::Cell;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Unknown,
    Checking,
    Connected,
    Disconnected,
}

impl std::fmt::Display for PollState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PollState::Unknown => write!(f, "UNKNOWN"),
            PollState::Checking => write!(f, "CHECKING"),
            PollState::Connected => write!(f, "CONNECTED"),
            PollState::Disconnected => write!(f, "DISCONNECTED"),
        }
    }
}

/// Result of a single tick.
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// No provider injected.
    Skipped,
    /// A previous check has not finished yet.
    Busy,
    /// Provider reports this many accounts.
    Connected(usize),
    /// Provider reports no accounts.
    Disconnected,
    Failed(ProviderError),
}

#[derive(Debug)]
pub struct ConnectionPoller {
    state: Cell<PollState>,
    interval: Duration,
}

impl ConnectionPoller {
    pub fn new(interval: Duration) -> Self {
        Self {
            state: Cell::new(PollState::Unknown),
            interval,
        }
    }

    pub fn state(&self) -> PollState {
        self.state.get()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub async fn check<P: WalletProvider>(&self, provider: Option<&P>) -> PollOutcome {
        let Some(provider) = provider else {
            return PollOutcome::Skipped;
        };
        if self.state.get() == PollState::Checking {
            return PollOutcome::Busy;
        }

        let previous = self.state.replace(PollState::Checking);
        match provider::accounts(provider).await {
            Ok(accounts) if accounts.is_empty() => {
                debug!(previous = %previous, "no connected accounts found");
                self.state.set(PollState::Disconnected);
                PollOutcome::Disconnected
            }
            Ok(accounts) => {
                self.state.set(PollState::Connected);
                PollOutcome::Connected(accounts.len())
            }
            Err(e) => {
                warn!(error = %e, "connection check failed");
                self.state.set(previous);
                PollOutcome::Failed(e)
            }
        }
    }
}

/// Run `tick` now and then once per `interval`, forever. `sleep` supplies
/// the timer (`gloo_timers::future::sleep` in the browser). Dropping the
/// returned future stops the loop.
pub async fn run_every<S, SFut, F, Fut>(interval: Duration, mut sleep: S, mut tick: F)
where
    S: FnMut(Duration) -> SFut,
    SFut: Future<Output = ()>,
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    loop {
        tick().await;
        sleep(interval).await;
    }
}
