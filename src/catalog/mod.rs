//! Marketplace data source.
//!
//! Views read events, activities and account data through [`Catalog`], so
//! the built-in fixtures and a network-backed API are interchangeable.

pub mod fixtures;
pub mod http;
pub mod types;

pub use http::HttpCatalog;
pub use types::*;

use crate::config::Config;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("catalog API error {status} for {url}")]
    Status { status: u16, url: String },
}

#[allow(async_fn_in_trait)]
pub trait Catalog {
    async fn list_events(&self) -> Result<Vec<EventRecord>, CatalogError>;
    async fn list_activities(&self) -> Result<Vec<Activity>, CatalogError>;
    async fn account(&self, address: &str) -> Result<AccountSnapshot, CatalogError>;
}

/// Serves the compiled-in fixtures.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FixtureCatalog;

impl Catalog for FixtureCatalog {
    async fn list_events(&self) -> Result<Vec<EventRecord>, CatalogError> {
        Ok(fixtures::events())
    }

    async fn list_activities(&self) -> Result<Vec<Activity>, CatalogError> {
        Ok(fixtures::activities())
    }

    async fn account(&self, _address: &str) -> Result<AccountSnapshot, CatalogError> {
        Ok(fixtures::account())
    }
}

/// The catalog selected by config.
#[derive(Debug, Clone)]
pub enum CatalogSource {
    Fixture(FixtureCatalog),
    Http(HttpCatalog),
}

impl CatalogSource {
    pub fn from_config(config: &Config) -> Self {
        if config.has_remote_catalog() {
            info!(url = %config.catalog.api_url, "using remote catalog");
            CatalogSource::Http(HttpCatalog::new(config.catalog.api_url.trim()))
        } else {
            info!("using built-in catalog fixtures");
            CatalogSource::Fixture(FixtureCatalog)
        }
    }
}

impl Catalog for CatalogSource {
    async fn list_events(&self) -> Result<Vec<EventRecord>, CatalogError> {
        match self {
            CatalogSource::Fixture(c) => c.list_events().await,
            CatalogSource::Http(c) => c.list_events().await,
        }
    }

    async fn list_activities(&self) -> Result<Vec<Activity>, CatalogError> {
        match self {
            CatalogSource::Fixture(c) => c.list_activities().await,
            CatalogSource::Http(c) => c.list_activities().await,
        }
    }

    async fn account(&self, address: &str) -> Result<AccountSnapshot, CatalogError> {
        match self {
            CatalogSource::Fixture(c) => c.account(address).await,
            CatalogSource::Http(c) => c.account(address).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn test_source_from_config() {
        let config = Config::default();
        assert!(matches!(
            CatalogSource::from_config(&config),
            CatalogSource::Fixture(_)
        ));

        let mut remote = Config::default();
        remote.catalog.api_url = "https://api.demai.example/".to_string();
        match CatalogSource::from_config(&remote) {
            CatalogSource::Http(c) => assert_eq!(c.url("events"), "https://api.demai.example/events"),
            other => panic!("expected http catalog, got {:?}", other),
        }
    }

    #[test]
    fn test_fixture_catalog() {
        let source = CatalogSource::Fixture(FixtureCatalog);
        assert_eq!(block_on(source.list_events()).unwrap().len(), 12);
        assert_eq!(block_on(source.list_activities()).unwrap().len(), 4);
        let account = block_on(source.account("0xabc")).unwrap();
        assert_eq!(account.owned_tickets.len(), 2);
        assert_eq!(account.balance, 1250.0);
    }
}
