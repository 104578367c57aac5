//! GET-and-decode access to the tile server.
//!
//! One attempt per call: no retry, no backoff, no timeout. A hung request
//! simply never resolves.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument};

use terracotta_common::{ClientError, ClientResult};

use crate::metrics::{RequestMetrics, RequestSnapshot};

/// Source of JSON documents addressed by absolute URL.
#[async_trait]
pub trait JsonFetcher: Send + Sync {
    /// GET `url` and parse the body as JSON.
    ///
    /// Non-2xx statuses, transport failures and unparsable bodies are errors.
    async fn get_json(&self, url: &str) -> ClientResult<Value>;
}

/// reqwest-backed fetcher.
pub struct HttpFetcher {
    client: Client,
    metrics: RequestMetrics,
}

impl HttpFetcher {
    pub fn new() -> ClientResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_client(client))
    }

    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            metrics: RequestMetrics::new(),
        }
    }

    pub fn metrics(&self) -> RequestSnapshot {
        self.metrics.snapshot()
    }

    async fn fetch(&self, url: &str) -> ClientResult<Value> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ClientError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response.json::<Value>().await.map_err(|e| ClientError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl JsonFetcher for HttpFetcher {
    #[instrument(skip(self), fields(url = %url))]
    async fn get_json(&self, url: &str) -> ClientResult<Value> {
        self.metrics.record_request();
        debug!("GET");

        let result = self.fetch(url).await;
        if result.is_err() {
            self.metrics.record_failure();
        }
        result
    }
}

#[async_trait]
impl<T: JsonFetcher + ?Sized> JsonFetcher for std::sync::Arc<T> {
    async fn get_json(&self, url: &str) -> ClientResult<Value> {
        (**self).get_json(url).await
    }
}
