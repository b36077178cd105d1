//! Browser wallet provider contract (EIP-1193).
//!
//! The provider exposes JSON-RPC style `request` calls and an event emitter.
//! `subscribe` hands back an owned subscription; `unsubscribe` consumes that
//! same subscription, so removal always targets the handler that was added.

pub mod injected;
#[cfg(test)]
pub mod mock;

pub use injected::InjectedProvider;

use serde_json::{json, Value};
use std::rc::Rc;
use thiserror::Error;

/// EIP-1193 "User Rejected Request".
pub const USER_REJECTED_CODE: i64 = 4001;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("no wallet extension detected")]
    NotInstalled,
    #[error("request rejected by user")]
    UserRejected,
    #[error("provider error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("unexpected provider response: {0}")]
    Decode(String),
}

impl ProviderError {
    /// Classify a JSON-RPC error by its code.
    pub fn from_rpc(code: Option<i64>, message: impl Into<String>) -> Self {
        match code {
            Some(USER_REJECTED_CODE) => ProviderError::UserRejected,
            code => ProviderError::Rpc {
                code: code.unwrap_or(-1),
                message: message.into(),
            },
        }
    }

    /// Text shown to the user next to the action that failed.
    pub fn user_message(&self) -> String {
        match self {
            ProviderError::NotInstalled => {
                "No wallet extension found. Please install MetaMask to continue.".to_string()
            }
            ProviderError::UserRejected => {
                "You rejected the request. Connect again when you're ready.".to_string()
            }
            ProviderError::Rpc { message, .. } => format!("Wallet request failed: {}", message),
            ProviderError::Decode(msg) => format!("Unexpected wallet response: {}", msg),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RpcMethod {
    RequestAccounts,
    Accounts,
    ChainId,
    RequestPermissions,
    RevokePermissions,
    AddEthereumChain,
    SwitchEthereumChain,
}

impl RpcMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RpcMethod::RequestAccounts => "eth_requestAccounts",
            RpcMethod::Accounts => "eth_accounts",
            RpcMethod::ChainId => "eth_chainId",
            RpcMethod::RequestPermissions => "wallet_requestPermissions",
            RpcMethod::RevokePermissions => "wallet_revokePermissions",
            RpcMethod::AddEthereumChain => "wallet_addEthereumChain",
            RpcMethod::SwitchEthereumChain => "wallet_switchEthereumChain",
        }
    }
}

impl std::fmt::Display for RpcMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    AccountsChanged,
    ChainChanged,
    Disconnect,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [
        EventKind::AccountsChanged,
        EventKind::ChainChanged,
        EventKind::Disconnect,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::AccountsChanged => "accountsChanged",
            EventKind::ChainChanged => "chainChanged",
            EventKind::Disconnect => "disconnect",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded provider event.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderEvent {
    AccountsChanged(Vec<String>),
    /// Hex chain id, e.g. "0x89".
    ChainChanged(String),
    Disconnect,
}

impl ProviderEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            ProviderEvent::AccountsChanged(_) => EventKind::AccountsChanged,
            ProviderEvent::ChainChanged(_) => EventKind::ChainChanged,
            ProviderEvent::Disconnect => EventKind::Disconnect,
        }
    }
}

pub type EventCallback = Rc<dyn Fn(ProviderEvent)>;

#[allow(async_fn_in_trait)]
pub trait WalletProvider {
    /// Owned registration token. Passing it back to `unsubscribe` removes
    /// exactly the handler it was created for.
    type Subscription;

    async fn request(&self, method: RpcMethod, params: Value) -> Result<Value, ProviderError>;

    fn subscribe(&self, kind: EventKind, callback: EventCallback) -> Self::Subscription;

    fn unsubscribe(&self, subscription: Self::Subscription);
}

/// Params for `wallet_requestPermissions` / `wallet_revokePermissions`.
pub fn eth_accounts_permission() -> Value {
    json!([{ "eth_accounts": {} }])
}

/// Decode an account list. `null` is treated as an empty list.
pub fn decode_accounts(value: Value) -> Result<Vec<String>, ProviderError> {
    match value {
        Value::Null => Ok(Vec::new()),
        other => serde_json::from_value(other).map_err(|e| ProviderError::Decode(e.to_string())),
    }
}

/// Parse a hex (`0x89`) or decimal chain id.
pub fn parse_chain_id(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => raw.parse().ok(),
    }
}

pub async fn accounts<P: WalletProvider>(provider: &P) -> Result<Vec<String>, ProviderError> {
    decode_accounts(provider.request(RpcMethod::Accounts, Value::Null).await?)
}

pub async fn request_accounts<P: WalletProvider>(
    provider: &P,
) -> Result<Vec<String>, ProviderError> {
    decode_accounts(
        provider
            .request(RpcMethod::RequestAccounts, Value::Null)
            .await?,
    )
}

pub async fn chain_id<P: WalletProvider>(provider: &P) -> Result<u64, ProviderError> {
    let value = provider.request(RpcMethod::ChainId, Value::Null).await?;
    match &value {
        Value::String(s) => parse_chain_id(s),
        Value::Number(n) => n.as_u64(),
        _ => None,
    }
    .ok_or_else(|| ProviderError::Decode(format!("bad chain id: {}", value)))
}
