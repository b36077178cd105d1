//! Provider event bridge.
//!
//! Subscribes to `accountsChanged`, `chainChanged` and `disconnect` and maps
//! each event to a [`BridgeAction`]:
//!   accountsChanged([])      → Disconnect
//!   accountsChanged([a, ..]) → Persist(a)
//!   chainChanged(_)          → Reload (state does not survive a chain switch)
//!   disconnect               → Disconnect
//!
//! The subscriptions returned by the provider are kept and handed back on
//! teardown.

use crate::provider::{EventCallback, EventKind, ProviderEvent, WalletProvider};
use crate::session::{KeyValueStore, Session};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum BridgeAction {
    /// Store this address as the session (last-connected account wins).
    Persist(String),
    Disconnect,
    Reload,
}

/// Decide what a provider event means for the session.
pub fn react(event: &ProviderEvent) -> BridgeAction {
    match event {
        // Only the first account is kept; extra accounts are ignored.
        ProviderEvent::AccountsChanged(accounts) => match accounts.first() {
            Some(first) => BridgeAction::Persist(first.clone()),
            None => BridgeAction::Disconnect,
        },
        ProviderEvent::ChainChanged(_) => BridgeAction::Reload,
        ProviderEvent::Disconnect => BridgeAction::Disconnect,
    }
}

/// Callbacks invoked by the bridge for actions it cannot perform itself.
#[derive(Clone)]
pub struct BridgeHooks {
    pub on_disconnect: Rc<dyn Fn()>,
    pub on_reload: Rc<dyn Fn()>,
}

/// Live registration of the three provider listeners.
pub struct EventBridge<P: WalletProvider> {
    provider: P,
    subscriptions: RefCell<Vec<P::Subscription>>,
}

impl<P: WalletProvider> EventBridge<P> {
    pub fn attach<S>(provider: P, session: Session<S>, hooks: BridgeHooks) -> Self
    where
        S: KeyValueStore + 'static,
    {
        let session = Rc::new(session);
        let subscriptions = EventKind::ALL
            .iter()
            .map(|kind| {
                let session = session.clone();
                let hooks = hooks.clone();
                let callback: EventCallback = Rc::new(move |event: ProviderEvent| {
                    dispatch(&event, &session, &hooks);
                });
                provider.subscribe(*kind, callback)
            })
            .collect();

        Self {
            provider,
            subscriptions: RefCell::new(subscriptions),
        }
    }

    /// Remove every listener this bridge registered. Safe to call repeatedly.
    pub fn detach(&self) {
        let subscriptions: Vec<P::Subscription> =
            self.subscriptions.borrow_mut().drain(..).collect();
        if subscriptions.is_empty() {
            return;
        }
        for subscription in subscriptions {
            self.provider.unsubscribe(subscription);
        }
        info!("provider listeners removed");
    }

    pub fn is_attached(&self) -> bool {
        !self.subscriptions.borrow().is_empty()
    }
}

impl<P: WalletProvider> Drop for EventBridge<P> {
    fn drop(&mut self) {
        self.detach();
    }
}

fn dispatch<S: KeyValueStore>(event: &ProviderEvent, session: &Session<S>, hooks: &BridgeHooks) {
    match react(event) {
        BridgeAction::Persist(address) => {
            info!(address = %address, "accounts changed");
            if let Err(e) = session.set_address(&address) {
                warn!(error = %e, "failed to persist changed account");
            }
        }
        BridgeAction::Disconnect => {
            info!(event = %event.kind(), "wallet disconnected");
            (hooks.on_disconnect)();
        }
        BridgeAction::Reload => {
            info!("chain changed, reloading");
            (hooks.on_reload)();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::mock::MockProvider;
    use crate::session::MemoryStorage;
    use std::cell::Cell;

    struct Counters {
        disconnects: Rc<Cell<usize>>,
        reloads: Rc<Cell<usize>>,
    }

    fn hooks() -> (BridgeHooks, Counters) {
        let disconnects = Rc::new(Cell::new(0));
        let reloads = Rc::new(Cell::new(0));
        let d = disconnects.clone();
        let r = reloads.clone();
        let hooks = BridgeHooks {
            on_disconnect: Rc::new(move || d.set(d.get() + 1)),
            on_reload: Rc::new(move || r.set(r.get() + 1)),
        };
        (hooks, Counters { disconnects, reloads })
    }

    fn session() -> Session<MemoryStorage> {
        Session::new(MemoryStorage::default(), "walletAddress")
    }

    #[test]
    fn test_react() {
        assert_eq!(
            react(&ProviderEvent::AccountsChanged(vec![])),
            BridgeAction::Disconnect
        );
        assert_eq!(
            react(&ProviderEvent::AccountsChanged(vec!["0xabc".into()])),
            BridgeAction::Persist("0xabc".into())
        );
        assert_eq!(
            react(&ProviderEvent::ChainChanged("0x89".into())),
            BridgeAction::Reload
        );
        assert_eq!(react(&ProviderEvent::Disconnect), BridgeAction::Disconnect);
    }

    #[test]
    fn test_accounts_changed_keeps_first_account() {
        let provider = MockProvider::with_accounts(&["0xold"]);
        let session = session();
        session.set_address("0xold").unwrap();
        let (hooks, counters) = hooks();
        let _bridge = EventBridge::attach(provider.clone(), session.clone(), hooks);

        provider.emit(ProviderEvent::AccountsChanged(vec![
            "0xABC123".to_string(),
            "0xDEF456".to_string(),
        ]));

        assert_eq!(session.address().as_deref(), Some("0xABC123"));
        assert_eq!(counters.disconnects.get(), 0);
    }

    #[test]
    fn test_empty_accounts_and_disconnect_fire_callback() {
        let provider = MockProvider::with_accounts(&["0xabc"]);
        let (hooks, counters) = hooks();
        let _bridge = EventBridge::attach(provider.clone(), session(), hooks);

        provider.emit(ProviderEvent::AccountsChanged(vec![]));
        provider.emit(ProviderEvent::Disconnect);

        assert_eq!(counters.disconnects.get(), 2);
        assert_eq!(counters.reloads.get(), 0);
    }

    #[test]
    fn test_chain_changed_reloads() {
        let provider = MockProvider::with_accounts(&["0xabc"]);
        let (hooks, counters) = hooks();
        let _bridge = EventBridge::attach(provider.clone(), session(), hooks);

        provider.emit(ProviderEvent::ChainChanged("0x89".to_string()));

        assert_eq!(counters.reloads.get(), 1);
    }

    #[test]
    fn test_detach_removes_registered_handlers() {
        let provider = MockProvider::with_accounts(&["0xabc"]);
        let (hooks, counters) = hooks();
        let bridge = EventBridge::attach(provider.clone(), session(), hooks);
        assert_eq!(provider.listener_count(), 3);
        for kind in EventKind::ALL {
            assert_eq!(provider.listener_count_for(kind), 1);
        }

        bridge.detach();
        assert_eq!(provider.listener_count(), 0);
        assert!(!bridge.is_attached());

        provider.emit(ProviderEvent::Disconnect);
        assert_eq!(counters.disconnects.get(), 0);

        // second detach is a no-op
        bridge.detach();
        assert_eq!(provider.listener_count(), 0);
    }

    #[test]
    fn test_drop_detaches() {
        let provider = MockProvider::with_accounts(&["0xabc"]);
        let (hooks, _counters) = hooks();
        {
            let _bridge = EventBridge::attach(provider.clone(), session(), hooks);
            assert_eq!(provider.listener_count(), 3);
        }
        assert_eq!(provider.listener_count(), 0);
    }

    #[test]
    fn test_detach_leaves_foreign_listeners() {
        let provider = MockProvider::with_accounts(&["0xabc"]);
        let foreign = provider.subscribe(EventKind::Disconnect, Rc::new(|_: ProviderEvent| {}));
        let (hooks, _counters) = hooks();
        let bridge = EventBridge::attach(provider.clone(), session(), hooks);
        bridge.detach();
        assert_eq!(provider.listener_count(), 1);
        provider.unsubscribe(foreign);
        assert_eq!(provider.listener_count(), 0);
    }
}
