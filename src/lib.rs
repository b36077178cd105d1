//! DeMai web client: wallet-gated NFT ticket marketplace.
//!
//! Pure logic (session, provider contract, bridge, poller, market engine,
//! network registry) is host-testable; `views` holds the Dioxus components.

pub mod auth;
pub mod bridge;
pub mod catalog;
pub mod config;
pub mod market;
pub mod networks;
pub mod poller;
pub mod provider;
pub mod session;
pub mod views;
