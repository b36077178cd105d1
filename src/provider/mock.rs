//! Scriptable in-memory provider for tests.

use super::{EventCallback, EventKind, ProviderError, ProviderEvent, RpcMethod, WalletProvider};
use futures::channel::oneshot;
use serde_json::{json, Value};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Default)]
struct MockState {
    accounts: RefCell<Vec<String>>,
    chain_id: Cell<u64>,
    fail_revoke: Cell<bool>,
    fail_accounts: Cell<bool>,
    reject_requests: Cell<bool>,
    revoke_gate: RefCell<Option<oneshot::Receiver<()>>>,
    calls: RefCell<Vec<RpcMethod>>,
    listeners: RefCell<Vec<(u64, EventKind, EventCallback)>>,
    next_id: Cell<u64>,
}

#[derive(Clone, Default)]
pub struct MockProvider {
    state: Rc<MockState>,
}

impl MockProvider {
    pub fn with_accounts(accounts: &[&str]) -> Self {
        let mock = Self::default();
        mock.set_accounts(accounts);
        mock.state.chain_id.set(1);
        mock
    }

    pub fn set_accounts(&self, accounts: &[&str]) {
        *self.state.accounts.borrow_mut() = accounts.iter().map(|a| a.to_string()).collect();
    }

    pub fn set_chain_id(&self, chain_id: u64) {
        self.state.chain_id.set(chain_id);
    }

    pub fn fail_revoke(&self) {
        self.state.fail_revoke.set(true);
    }

    pub fn fail_accounts(&self) {
        self.state.fail_accounts.set(true);
    }

    /// Every interactive request answers with code 4001.
    pub fn reject_requests(&self) {
        self.state.reject_requests.set(true);
    }

    /// Park the next revoke request until the returned sender fires.
    pub fn hold_revoke(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.state.revoke_gate.borrow_mut() = Some(rx);
        tx
    }

    pub fn calls(&self) -> Vec<RpcMethod> {
        self.state.calls.borrow().clone()
    }

    pub fn call_count(&self, method: RpcMethod) -> usize {
        self.state
            .calls
            .borrow()
            .iter()
            .filter(|m| **m == method)
            .count()
    }

    pub fn listener_count(&self) -> usize {
        self.state.listeners.borrow().len()
    }

    pub fn listener_count_for(&self, kind: EventKind) -> usize {
        self.state
            .listeners
            .borrow()
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .count()
    }

    /// Deliver an event to every listener registered for its kind.
    pub fn emit(&self, event: ProviderEvent) {
        let kind = event.kind();
        let targets: Vec<EventCallback> = self
            .state
            .listeners
            .borrow()
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .map(|(_, _, cb)| cb.clone())
            .collect();
        for cb in targets {
            cb(event.clone());
        }
    }
}

impl WalletProvider for MockProvider {
    type Subscription = u64;

    async fn request(&self, method: RpcMethod, params: Value) -> Result<Value, ProviderError> {
        self.state.calls.borrow_mut().push(method);
        let rejected = || -> Result<Value, ProviderError> {
            Err(ProviderError::from_rpc(Some(4001), "User rejected the request."))
        };
        match method {
            RpcMethod::Accounts => {
                if self.state.fail_accounts.get() {
                    return Err(ProviderError::from_rpc(Some(-32603), "internal error"));
                }
                Ok(json!(*self.state.accounts.borrow()))
            }
            RpcMethod::RequestAccounts | RpcMethod::RequestPermissions => {
                if self.state.reject_requests.get() {
                    return rejected();
                }
                match method {
                    RpcMethod::RequestAccounts => Ok(json!(*self.state.accounts.borrow())),
                    _ => Ok(json!([{ "parentCapability": "eth_accounts" }])),
                }
            }
            RpcMethod::RevokePermissions => {
                let gate = self.state.revoke_gate.borrow_mut().take();
                if let Some(gate) = gate {
                    let _ = gate.await;
                }
                if self.state.fail_revoke.get() {
                    return Err(ProviderError::from_rpc(Some(-32601), "method not supported"));
                }
                self.state.accounts.borrow_mut().clear();
                Ok(Value::Null)
            }
            RpcMethod::ChainId => Ok(json!(format!("0x{:x}", self.state.chain_id.get()))),
            RpcMethod::AddEthereumChain => {
                if self.state.reject_requests.get() {
                    return rejected();
                }
                Ok(Value::Null)
            }
            RpcMethod::SwitchEthereumChain => {
                if self.state.reject_requests.get() {
                    return rejected();
                }
                let target = params[0]["chainId"]
                    .as_str()
                    .and_then(|hex| u64::from_str_radix(hex.trim_start_matches("0x"), 16).ok())
                    .ok_or_else(|| ProviderError::from_rpc(Some(-32602), "invalid chainId"))?;
                self.state.chain_id.set(target);
                Ok(Value::Null)
            }
        }
    }

    fn subscribe(&self, kind: EventKind, callback: EventCallback) -> u64 {
        let id = self.state.next_id.get();
        self.state.next_id.set(id + 1);
        self.state.listeners.borrow_mut().push((id, kind, callback));
        id
    }

    fn unsubscribe(&self, subscription: u64) {
        self.state
            .listeners
            .borrow_mut()
            .retain(|(id, _, _)| *id != subscription);
    }
}

/// Records navigation requests instead of performing them.
#[derive(Clone, Default)]
pub struct RecordingNavigator {
    log: Rc<RefCell<Vec<&'static str>>>,
}

impl RecordingNavigator {
    pub fn count(&self, target: &str) -> usize {
        self.log.borrow().iter().filter(|t| **t == target).count()
    }

    pub fn total(&self) -> usize {
        self.log.borrow().len()
    }
}

impl crate::auth::Navigate for RecordingNavigator {
    fn to_login(&self) {
        self.log.borrow_mut().push("login");
    }

    fn to_dashboard(&self) {
        self.log.borrow_mut().push("dashboard");
    }

    fn reload(&self) {
        self.log.borrow_mut().push("reload");
    }
}
