//! In-memory fetcher answering from a URL table.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

use terracotta_api::JsonFetcher;
use terracotta_common::{ClientError, ClientResult};

/// Responds with canned JSON per exact URL; unknown URLs get a 404.
#[derive(Default)]
pub struct CannedFetcher {
    responses: Mutex<HashMap<String, Result<Value, u16>>>,
    requests: Mutex<Vec<String>>,
}

impl CannedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `url` with `body`.
    pub fn with_json(self, url: impl Into<String>, body: Value) -> Self {
        self.set_json(url, body);
        self
    }

    /// Answer `url` with an HTTP error status.
    pub fn with_status(self, url: impl Into<String>, status: u16) -> Self {
        self.set_status(url, status);
        self
    }

    pub fn set_json(&self, url: impl Into<String>, body: Value) {
        self.responses
            .lock()
            .expect("response table poisoned")
            .insert(url.into(), Ok(body));
    }

    pub fn set_status(&self, url: impl Into<String>, status: u16) {
        self.responses
            .lock()
            .expect("response table poisoned")
            .insert(url.into(), Err(status));
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("request log poisoned").clone()
    }

    /// Number of times `url` was requested.
    pub fn request_count(&self, url: &str) -> usize {
        self.requests().iter().filter(|u| *u == url).count()
    }
}

#[async_trait]
impl JsonFetcher for CannedFetcher {
    async fn get_json(&self, url: &str) -> ClientResult<Value> {
        self.requests
            .lock()
            .expect("request log poisoned")
            .push(url.to_string());

        let response = self
            .responses
            .lock()
            .expect("response table poisoned")
            .get(url)
            .cloned();

        match response {
            Some(Ok(body)) => Ok(body),
            Some(Err(status)) => Err(ClientError::Http {
                status,
                url: url.to_string(),
            }),
            None => Err(ClientError::Http {
                status: 404,
                url: url.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_unknown_url_is_404() {
        let fetcher = CannedFetcher::new().with_json("http://a/keys", json!({"keys": []}));

        assert!(fetcher.get_json("http://a/keys").await.is_ok());
        let err = fetcher.get_json("http://a/other").await.unwrap_err();
        assert_eq!(err.status_text(), "404");
        assert_eq!(fetcher.requests(), vec!["http://a/keys", "http://a/other"]);
    }

    #[test]
    fn test_status_overrides_body() {
        let fetcher = CannedFetcher::new()
            .with_json("http://a/keys", json!({"keys": []}))
            .with_status("http://a/keys", 503);

        let err = tokio_test::block_on(fetcher.get_json("http://a/keys")).unwrap_err();
        assert_eq!(err.status_text(), "503");
        assert_eq!(fetcher.request_count("http://a/keys"), 1);
    }
}
