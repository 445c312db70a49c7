//! HTTP client for the public catalogue API.

use std::time::Duration;

use dexview_core::ItemDetail;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::FetchError;
use crate::source::{ItemSource, ListEntry};
use crate::wire::{ItemResponse, ListResponse};

/// Default API root.
pub const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for [`PokeApiClient`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API root without a trailing slash.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    format!("dexview/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl ClientConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API root.
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Catalogue source backed by the remote REST API.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    http: Client,
    config: ClientConfig,
}

impl PokeApiClient {
    /// Build a client.
    pub fn new(config: ClientConfig) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| FetchError::network(&config.api_base, e))?;

        Ok(Self { http, config })
    }

    /// Connection settings in use.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// URL of a listing page.
    pub fn page_url(&self, offset: usize, limit: usize) -> String {
        format!(
            "{}/pokemon?limit={limit}&offset={offset}",
            self.config.api_base
        )
    }

    /// URL of a single item by name.
    pub fn item_url(&self, name: &str) -> String {
        format!("{}/pokemon/{}", self.config.api_base, name.trim().to_lowercase())
    }

    /// Fetch the raw listing page, including the server-side total.
    pub async fn fetch_page(&self, offset: usize, limit: usize) -> Result<ListResponse, FetchError> {
        self.get_json(&self.page_url(offset, limit)).await
    }

    /// Fetch a detail record directly by name.
    pub async fn detail_by_name(&self, name: &str) -> Result<ItemDetail, FetchError> {
        self.detail_at(&self.item_url(name)).await
    }

    async fn detail_at(&self, url: &str) -> Result<ItemDetail, FetchError> {
        let wire: ItemResponse = self.get_json(url).await?;
        ItemDetail::try_from(wire).map_err(|e| FetchError::malformed(url, e))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        debug!(url, "GET");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::network(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::network(url, e))?;

        serde_json::from_slice(&body).map_err(|e| FetchError::malformed(url, e))
    }
}

impl ItemSource for PokeApiClient {
    async fn list_page(&self, offset: usize, limit: usize) -> Result<Vec<ListEntry>, FetchError> {
        Ok(self.fetch_page(offset, limit).await?.results)
    }

    async fn item_detail(&self, entry: &ListEntry) -> Result<ItemDetail, FetchError> {
        self.detail_at(&entry.url).await
    }
}
