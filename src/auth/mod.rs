//! Wallet authentication flow.
//!
//! - connect: `eth_requestAccounts` → persist first account → dashboard
//! - gate: a protected page reads the session on mount; no session → login
//! - liveness: provider listeners (see `bridge`) plus the interval poller
//! - logout: revoke permissions → clear session → remove listeners → login
//!
//! Every logout step runs even when an earlier one fails. A logout already
//! in flight absorbs further triggers, so the poller, a provider event and a
//! user click racing each other navigate once.

use crate::bridge::{BridgeHooks, EventBridge};
use crate::poller::{ConnectionPoller, PollOutcome};
use crate::provider::{self, ProviderError, RpcMethod, WalletProvider};
use crate::session::{KeyValueStore, Session, SessionError};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info, warn};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuthError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error("wallet returned no accounts")]
    NoAccounts,
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl AuthError {
    pub fn user_message(&self) -> String {
        match self {
            AuthError::Provider(e) => e.user_message(),
            AuthError::NoAccounts => {
                "Your wallet did not share any account. Unlock it and try again.".to_string()
            }
            AuthError::Session(e) => format!("Could not save your session: {}", e),
        }
    }
}

/// Page transitions the auth flow needs. Implementations must tolerate
/// being called more than once.
pub trait Navigate {
    fn to_login(&self);
    fn to_dashboard(&self);
    fn reload(&self);
}

#[derive(Debug, Clone, PartialEq)]
pub enum GateOutcome {
    /// No session; navigation to the login page was requested.
    Redirected,
    Authenticated(String),
}

/// Ask the wallet to connect and persist the first account it returns.
pub async fn connect<P, S>(provider: Option<&P>, session: &Session<S>) -> Result<String, AuthError>
where
    P: WalletProvider,
    S: KeyValueStore,
{
    let provider = provider.ok_or(ProviderError::NotInstalled)?;
    let accounts = provider::request_accounts(provider).await?;
    let address = accounts.into_iter().next().ok_or(AuthError::NoAccounts)?;
    session.set_address(&address)?;
    info!(address = %address, "wallet connected");
    Ok(address)
}

/// Re-open the wallet's account picker, then persist the selected account.
pub async fn switch_account<P, S>(provider: Option<&P>, session: &Session<S>) -> Result<String, AuthError>
where
    P: WalletProvider,
    S: KeyValueStore,
{
    let provider = provider.ok_or(ProviderError::NotInstalled)?;
    provider
        .request(RpcMethod::RequestPermissions, provider::eth_accounts_permission())
        .await?;
    let address = provider::accounts(provider)
        .await?
        .into_iter()
        .next()
        .ok_or(AuthError::NoAccounts)?;
    session.set_address(&address)?;
    info!(address = %address, "wallet account switched");
    Ok(address)
}

pub async fn revoke_permissions<P: WalletProvider>(provider: &P) -> Result<(), ProviderError> {
    provider
        .request(RpcMethod::RevokePermissions, provider::eth_accounts_permission())
        .await?;
    info!("wallet permissions revoked");
    Ok(())
}

/// Owns the session, the provider listeners and the poller for one page.
pub struct SessionController<P, S, N>
where
    P: WalletProvider,
{
    provider: Option<P>,
    session: Session<S>,
    navigator: N,
    poller: ConnectionPoller,
    bridge: RefCell<Option<EventBridge<P>>>,
    logout_in_flight: Cell<bool>,
}

impl<P, S, N> SessionController<P, S, N>
where
    P: WalletProvider + Clone + 'static,
    S: KeyValueStore + Clone + 'static,
    N: Navigate + Clone + 'static,
{
    pub fn new(provider: Option<P>, session: Session<S>, navigator: N, poll_interval: Duration) -> Rc<Self> {
        Rc::new(Self {
            provider,
            session,
            navigator,
            poller: ConnectionPoller::new(poll_interval),
            bridge: RefCell::new(None),
            logout_in_flight: Cell::new(false),
        })
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    pub fn provider(&self) -> Option<&P> {
        self.provider.as_ref()
    }

    pub fn poller(&self) -> &ConnectionPoller {
        &self.poller
    }

    pub fn has_listeners(&self) -> bool {
        self.bridge
            .borrow()
            .as_ref()
            .map(|b| b.is_attached())
            .unwrap_or(false)
    }

    /// Gate check for a protected page. With a session present, provider
    /// listeners are attached; `on_disconnect` is what they call when the
    /// wallet goes away (normally: schedule [`Self::logout`]).
    pub fn mount(&self, on_disconnect: Rc<dyn Fn()>) -> GateOutcome {
        let Some(address) = self.session.address() else {
            info!("no wallet session, redirecting to login");
            self.navigator.to_login();
            return GateOutcome::Redirected;
        };

        match &self.provider {
            Some(provider) => {
                let mut slot = self.bridge.borrow_mut();
                if slot.is_none() {
                    let navigator = self.navigator.clone();
                    let hooks = BridgeHooks {
                        on_disconnect,
                        on_reload: Rc::new(move || navigator.reload()),
                    };
                    *slot = Some(EventBridge::attach(
                        provider.clone(),
                        self.session.clone(),
                        hooks,
                    ));
                }
            }
            None => warn!("no wallet provider injected, skipping listeners"),
        }

        info!(address = %address, "wallet session active");
        GateOutcome::Authenticated(address)
    }

    /// Release the provider listeners. Idempotent.
    pub fn unmount(&self) {
        let bridge = self.bridge.borrow_mut().take();
        if let Some(bridge) = bridge {
            bridge.detach();
        }
    }

    pub async fn connect(&self) -> Result<String, AuthError> {
        let result = connect(self.provider.as_ref(), &self.session).await;
        match &result {
            Ok(_) => self.navigator.to_dashboard(),
            Err(e) => error!(error = %e, "wallet connection failed"),
        }
        result
    }

    pub async fn switch_account(&self) -> Result<String, AuthError> {
        let result = switch_account(self.provider.as_ref(), &self.session).await;
        if let Err(e) = &result {
            error!(error = %e, "account switch failed");
        }
        result
    }

    /// One poller tick. An empty account list runs the logout sequence.
    pub async fn poll(&self) -> PollOutcome {
        let outcome = self.poller.check(self.provider.as_ref()).await;
        if outcome == PollOutcome::Disconnected {
            info!("wallet no longer connected, logging out");
            self.logout().await;
        }
        outcome
    }

    pub async fn logout(&self) {
        if self.logout_in_flight.replace(true) {
            debug!("logout already in progress");
            return;
        }

        if let Some(provider) = &self.provider {
            if let Err(e) = revoke_permissions(provider).await {
                warn!(error = %e, "failed to revoke wallet permissions");
            }
        }
        if let Err(e) = self.session.clear() {
            warn!(error = %e, "failed to clear wallet session");
        }
        self.unmount();
        self.navigator.to_login();

        info!("logged out");
        self.logout_in_flight.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::mock::{MockProvider, RecordingNavigator};
    use crate::provider::ProviderEvent;
    use crate::session::MemoryStorage;
    use futures::executor::{block_on, LocalPool};
    use futures::task::LocalSpawnExt;

    type Controller = SessionController<MockProvider, MemoryStorage, RecordingNavigator>;

    fn controller(provider: Option<MockProvider>) -> (Rc<Controller>, RecordingNavigator) {
        let nav = RecordingNavigator::default();
        let session = Session::new(MemoryStorage::default(), "walletAddress");
        let ctrl = SessionController::new(provider, session, nav.clone(), Duration::from_secs(30));
        (ctrl, nav)
    }

    fn noop() -> Rc<dyn Fn()> {
        Rc::new(|| {})
    }

    #[test]
    fn test_connect_persists_first_account() {
        let provider = MockProvider::with_accounts(&["0xaaa", "0xbbb"]);
        let (ctrl, nav) = controller(Some(provider));
        let address = block_on(ctrl.connect()).unwrap();
        assert_eq!(address, "0xaaa");
        assert_eq!(ctrl.session().address().as_deref(), Some("0xaaa"));
        assert_eq!(nav.count("dashboard"), 1);
    }

    #[test]
    fn test_connect_without_provider() {
        let (ctrl, nav) = controller(None);
        let err = block_on(ctrl.connect()).unwrap_err();
        assert_eq!(err, AuthError::Provider(ProviderError::NotInstalled));
        assert_eq!(nav.total(), 0);
        assert!(!ctrl.session().is_authenticated());
    }

    #[test]
    fn test_connect_rejected_by_user() {
        let provider = MockProvider::with_accounts(&["0xaaa"]);
        provider.reject_requests();
        let (ctrl, _nav) = controller(Some(provider));
        let err = block_on(ctrl.connect()).unwrap_err();
        assert_eq!(err, AuthError::Provider(ProviderError::UserRejected));
        assert_eq!(err.user_message(), ProviderError::UserRejected.user_message());
    }

    #[test]
    fn test_connect_with_no_accounts() {
        let provider = MockProvider::with_accounts(&[]);
        let (ctrl, _nav) = controller(Some(provider));
        assert_eq!(block_on(ctrl.connect()).unwrap_err(), AuthError::NoAccounts);
    }

    #[test]
    fn test_switch_account() {
        let provider = MockProvider::with_accounts(&["0xaaa"]);
        let (ctrl, _nav) = controller(Some(provider.clone()));
        ctrl.session().set_address("0xaaa").unwrap();
        provider.set_accounts(&["0xccc"]);
        assert_eq!(block_on(ctrl.switch_account()).unwrap(), "0xccc");
        assert_eq!(ctrl.session().address().as_deref(), Some("0xccc"));
        assert_eq!(provider.call_count(RpcMethod::RequestPermissions), 1);
    }

    #[test]
    fn test_mount_without_session_redirects() {
        let provider = MockProvider::with_accounts(&["0xaaa"]);
        let (ctrl, nav) = controller(Some(provider.clone()));
        assert_eq!(ctrl.mount(noop()), GateOutcome::Redirected);
        assert_eq!(nav.count("login"), 1);
        assert_eq!(provider.listener_count(), 0);
    }

    #[test]
    fn test_mount_with_session_attaches_listeners() {
        let provider = MockProvider::with_accounts(&["0xaaa"]);
        let (ctrl, nav) = controller(Some(provider.clone()));
        ctrl.session().set_address("0xaaa").unwrap();
        assert_eq!(
            ctrl.mount(noop()),
            GateOutcome::Authenticated("0xaaa".to_string())
        );
        // a second mount does not register twice
        ctrl.mount(noop());
        assert_eq!(provider.listener_count(), 3);
        assert_eq!(nav.total(), 0);

        ctrl.unmount();
        assert_eq!(provider.listener_count(), 0);
        assert!(!ctrl.has_listeners());
    }

    #[test]
    fn test_mount_without_provider_still_authenticates() {
        let (ctrl, _nav) = controller(None);
        ctrl.session().set_address("0xaaa").unwrap();
        assert!(matches!(ctrl.mount(noop()), GateOutcome::Authenticated(_)));
        assert!(!ctrl.has_listeners());
        assert_eq!(block_on(ctrl.poll()), PollOutcome::Skipped);
    }

    #[test]
    fn test_poller_empty_accounts_logs_out_once() {
        let provider = MockProvider::with_accounts(&["0xaaa"]);
        let (ctrl, nav) = controller(Some(provider.clone()));
        ctrl.session().set_address("0xaaa").unwrap();
        ctrl.mount(noop());

        provider.set_accounts(&[]);
        assert_eq!(block_on(ctrl.poll()), PollOutcome::Disconnected);

        assert!(!ctrl.session().is_authenticated());
        assert_eq!(nav.count("login"), 1);
        assert_eq!(provider.listener_count(), 0);
    }

    #[test]
    fn test_poller_connected_keeps_session() {
        let provider = MockProvider::with_accounts(&["0xaaa"]);
        let (ctrl, nav) = controller(Some(provider));
        ctrl.session().set_address("0xaaa").unwrap();
        assert_eq!(block_on(ctrl.poll()), PollOutcome::Connected(1));
        assert!(ctrl.session().is_authenticated());
        assert_eq!(nav.total(), 0);
    }

    #[test]
    fn test_logout_when_revoke_fails() {
        let provider = MockProvider::with_accounts(&["0xaaa"]);
        provider.fail_revoke();
        let (ctrl, nav) = controller(Some(provider.clone()));
        ctrl.session().set_address("0xaaa").unwrap();
        ctrl.mount(noop());

        block_on(ctrl.logout());

        assert_eq!(provider.call_count(RpcMethod::RevokePermissions), 1);
        assert!(!ctrl.session().is_authenticated());
        assert_eq!(provider.listener_count(), 0);
        assert_eq!(nav.count("login"), 1);
    }

    #[test]
    fn test_logout_step_order() {
        let provider = MockProvider::with_accounts(&["0xaaa"]);
        let (ctrl, nav) = controller(Some(provider.clone()));
        ctrl.session().set_address("0xaaa").unwrap();
        block_on(ctrl.logout());
        assert_eq!(provider.calls(), vec![RpcMethod::RevokePermissions]);
        assert_eq!(nav.count("login"), 1);
    }

    #[test]
    fn test_logout_twice_is_safe() {
        let provider = MockProvider::with_accounts(&["0xaaa"]);
        let (ctrl, nav) = controller(Some(provider));
        ctrl.session().set_address("0xaaa").unwrap();
        block_on(ctrl.logout());
        block_on(ctrl.logout());
        assert!(!ctrl.session().is_authenticated());
        assert_eq!(nav.count("login"), 2);
    }

    #[test]
    fn test_concurrent_logouts_coalesce() {
        let provider = MockProvider::with_accounts(&["0xaaa"]);
        let release = provider.hold_revoke();
        let (ctrl, nav) = controller(Some(provider.clone()));
        ctrl.session().set_address("0xaaa").unwrap();

        let mut pool = LocalPool::new();
        let first = ctrl.clone();
        pool.spawner()
            .spawn_local(async move { first.logout().await })
            .unwrap();
        pool.run_until_stalled();

        // revoke is still pending; a second trigger returns immediately
        block_on(ctrl.logout());
        assert_eq!(provider.call_count(RpcMethod::RevokePermissions), 1);
        assert_eq!(nav.total(), 0);

        release.send(()).unwrap();
        pool.run_until_stalled();
        assert!(!ctrl.session().is_authenticated());
        assert_eq!(nav.count("login"), 1);
    }

    #[test]
    fn test_disconnect_event_triggers_callback() {
        let provider = MockProvider::with_accounts(&["0xaaa"]);
        let (ctrl, _nav) = controller(Some(provider.clone()));
        ctrl.session().set_address("0xaaa").unwrap();
        let fired = Rc::new(Cell::new(0));
        let f = fired.clone();
        ctrl.mount(Rc::new(move || f.set(f.get() + 1)));

        provider.emit(ProviderEvent::Disconnect);
        provider.emit(ProviderEvent::AccountsChanged(vec![]));
        assert_eq!(fired.get(), 2);
    }

    #[test]
    fn test_chain_change_reloads() {
        let provider = MockProvider::with_accounts(&["0xaaa"]);
        let (ctrl, nav) = controller(Some(provider.clone()));
        ctrl.session().set_address("0xaaa").unwrap();
        ctrl.mount(noop());
        provider.emit(ProviderEvent::ChainChanged("0x89".to_string()));
        assert_eq!(nav.count("reload"), 1);
    }
}
