//! JSON catalog API client.
//!
//!   GET {base}/events               → [EventRecord]
//!   GET {base}/activities           → [Activity]
//!   GET {base}/accounts/{address}   → AccountSnapshot

use super::{AccountSnapshot, Activity, Catalog, CatalogError, EventRecord};
use serde::de::DeserializeOwned;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalog {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, CatalogError> {
        let url = self.url(path);
        debug!(url = %url, "catalog request");
        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                url,
            });
        }
        Ok(resp.json::<T>().await?)
    }
}

impl Catalog for HttpCatalog {
    async fn list_events(&self) -> Result<Vec<EventRecord>, CatalogError> {
        self.get_json("events").await
    }

    async fn list_activities(&self) -> Result<Vec<Activity>, CatalogError> {
        self.get_json("activities").await
    }

    async fn account(&self, address: &str) -> Result<AccountSnapshot, CatalogError> {
        self.get_json(&format!("accounts/{}", address)).await
    }
}
