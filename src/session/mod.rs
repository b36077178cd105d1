//! Client-local session: which wallet address is currently logged in.
//!
//! The session is a single key in persistent key-value storage. Last write
//! wins; clearing an empty session is a no-op.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("persistent storage is unavailable")]
    Unavailable,
    #[error("storage write failed: {0}")]
    Write(String),
}

/// Minimal string key-value storage backend.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), SessionError>;
    fn remove(&self, key: &str) -> Result<(), SessionError>;
}

/// `window.localStorage`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Result<web_sys::Storage, SessionError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or(SessionError::Unavailable)
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage().ok()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| SessionError::Write(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| SessionError::Write(format!("{:?}", e)))
    }
}

/// In-process storage. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// The wallet session stored under a single key.
#[derive(Debug, Clone)]
pub struct Session<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn set_address(&self, address: &str) -> Result<(), SessionError> {
        debug!(address = address, "session address stored");
        self.store.set(&self.key, address)
    }

    pub fn address(&self) -> Option<String> {
        self.store.get(&self.key).filter(|a| !a.is_empty())
    }

    pub fn clear(&self) -> Result<(), SessionError> {
        self.store.remove(&self.key)
    }

    pub fn is_authenticated(&self) -> bool {
        self.address().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session<MemoryStorage> {
        Session::new(MemoryStorage::default(), "walletAddress")
    }

    #[test]
    fn test_set_then_get() {
        let s = session();
        s.set_address("0xabc").unwrap();
        assert_eq!(s.address().as_deref(), Some("0xabc"));
        assert!(s.is_authenticated());
    }

    #[test]
    fn test_clear_then_get() {
        let s = session();
        s.set_address("0xabc").unwrap();
        s.clear().unwrap();
        assert_eq!(s.address(), None);
        assert!(!s.is_authenticated());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let s = session();
        s.clear().unwrap();
        s.clear().unwrap();
        assert!(!s.is_authenticated());
    }

    #[test]
    fn test_last_write_wins() {
        let s = session();
        s.set_address("0xabc").unwrap();
        s.set_address("0xdef").unwrap();
        assert_eq!(s.address().as_deref(), Some("0xdef"));
    }

    #[test]
    fn test_clones_share_storage() {
        let store = MemoryStorage::default();
        let a = Session::new(store.clone(), "walletAddress");
        let b = Session::new(store, "walletAddress");
        a.set_address("0xabc").unwrap();
        assert_eq!(b.address().as_deref(), Some("0xabc"));
    }

    #[test]
    fn test_keys_are_independent() {
        let store = MemoryStorage::default();
        let a = Session::new(store.clone(), "walletAddress");
        let b = Session::new(store, "other");
        a.set_address("0xabc").unwrap();
        assert!(!b.is_authenticated());
    }
}
