//! Mock server implementation.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;

use frontgen_api::ApiDescriptor;

/// Configuration for the mock server.
#[derive(Debug, Clone)]
pub struct MockServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,
}

impl Default for MockServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5174,
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid listen address {0}")]
    InvalidAddress(String),

    #[error("Failed to bind to {0}: {1}")]
    BindError(SocketAddr, String),

    #[error("Server on {0} stopped: {1}")]
    ServeError(SocketAddr, String),
}

/// Canned answer for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct MockResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl IntoResponse for MockResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Request matching over a descriptor set.
#[derive(Debug, Clone, Default)]
pub struct MockApi {
    apis: Vec<ApiDescriptor>,
}

impl MockApi {
    /// Create a matcher. Earlier descriptors win when several match.
    pub fn new(apis: Vec<ApiDescriptor>) -> Self {
        Self { apis }
    }

    /// Number of served endpoints.
    pub fn len(&self) -> usize {
        self.apis.len()
    }

    /// Whether no endpoints are served.
    pub fn is_empty(&self) -> bool {
        self.apis.is_empty()
    }

    /// First descriptor whose URL covers `target` (path plus optional query).
    pub fn find(&self, target: &str) -> Option<&ApiDescriptor> {
        self.apis.iter().find(|api| covers(&api.url, target))
    }

    /// Answer a request.
    pub fn resolve(&self, method: &str, target: &str) -> MockResponse {
        let Some(api) = self.find(target) else {
            return MockResponse {
                status: StatusCode::NOT_FOUND,
                body: json!({ "message": "Not Found" }),
            };
        };

        if !api.allows(method) {
            let body = if api.fail.is_null() {
                json!({ "message": "Method Not Allowed" })
            } else {
                api.fail.clone()
            };
            return MockResponse {
                status: StatusCode::METHOD_NOT_ALLOWED,
                body,
            };
        }

        let body = if api.response.is_null() {
            json!({})
        } else {
            api.response.clone()
        };

        MockResponse {
            status: StatusCode::OK,
            body,
        }
    }
}

/// `url` covers itself, `url?query` and anything below `url/`.
fn covers(url: &str, target: &str) -> bool {
    match target.strip_prefix(url) {
        Some(rest) => rest.is_empty() || rest.starts_with('?') || rest.starts_with('/'),
        None => false,
    }
}

/// Mock API server.
pub struct MockServer {
    config: MockServerConfig,
    api: MockApi,
}

impl MockServer {
    /// Create a new mock server.
    pub fn new(config: MockServerConfig, api: MockApi) -> Self {
        Self { config, api }
    }

    /// Build the router without binding a socket.
    pub fn router(api: MockApi) -> Router {
        Router::new()
            .fallback(mock_handler)
            .layer(CorsLayer::permissive())
            .with_state(Arc::new(api))
    }

    /// Bind and serve until the process is stopped.
    pub async fn start(self) -> Result<(), ServerError> {
        let raw = format!("{}:{}", self.config.host, self.config.port);
        let addr: SocketAddr = raw
            .parse()
            .map_err(|_| ServerError::InvalidAddress(raw.clone()))?;

        tracing::info!(
            "Serving {} mock endpoints at http://{}",
            self.api.len(),
            addr
        );

        let app = Self::router(self.api);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::ServeError(addr, e.to_string()))?;

        Ok(())
    }
}

/// Fallback handler answering every request from the descriptor set.
async fn mock_handler(State(api): State<Arc<MockApi>>, method: Method, uri: Uri) -> Response {
    let target = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());

    let response = api.resolve(method.as_str(), target);
    tracing::debug!("{} {} -> {}", method, target, response.status);

    response.into_response()
}
