//! Local HTTP stub of the tile server for exercising the reqwest path.

use axum::{
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::Value;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A canned reply for one path-and-query.
#[derive(Debug, Clone)]
pub enum StubResponse {
    Json(u16, Value),
    Text(u16, String),
}

/// Axum server bound to an ephemeral localhost port.
///
/// Requests are matched on their exact path and query; anything else gets 404.
/// The server task is aborted on drop.
pub struct StubServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl StubServer {
    pub async fn spawn(routes: Vec<(&str, StubResponse)>) -> std::io::Result<Self> {
        let table: Arc<HashMap<String, StubResponse>> = Arc::new(
            routes
                .into_iter()
                .map(|(path, response)| (path.to_string(), response))
                .collect(),
        );

        let app = Router::new().fallback(move |uri: Uri| {
            let table = table.clone();
            async move { respond(&table, &uri) }
        });

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self { addr, handle })
    }

    /// Base URL, e.g. `http://127.0.0.1:41234`.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn respond(table: &HashMap<String, StubResponse>, uri: &Uri) -> Response {
    let key = uri
        .path_and_query()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    let status = |code: u16| StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    match table.get(&key) {
        Some(StubResponse::Json(code, body)) => (status(*code), Json(body.clone())).into_response(),
        Some(StubResponse::Text(code, body)) => (status(*code), body.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
