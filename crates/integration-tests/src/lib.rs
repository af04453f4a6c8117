//! Integration tests for the PagSeguro client.
//!
//! # Running Tests
//!
//! ```bash
//! # Offline tests (local mock gateway)
//! cargo test -p pagseguro-integration-tests
//!
//! # Live sandbox tests
//! PAGSEGURO_EMAIL=... PAGSEGURO_TOKEN=... PAGSEGURO_SANDBOX=true \
//!     cargo test -p pagseguro-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `checkout_params` - Parameter building, no network
//! - `gateway_client` - Client calls against [`MockGateway`]
//! - `sandbox` - Live calls to the PagSeguro sandbox

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::VecDeque;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use pagseguro::{Config, ConfigError, Credentials, PagSeguroClient, PagSeguroError};
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// A response the mock gateway sends back.
#[derive(Debug, Clone)]
pub struct CannedResponse {
    pub status: u16,
    pub body: String,
}

impl CannedResponse {
    /// `200 OK` with an XML body.
    #[must_use]
    pub fn ok(body: &str) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
        }
    }

    #[must_use]
    pub fn status(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

/// A request the mock gateway received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    /// Path and query string.
    pub target: String,
    pub body: String,
}

impl RecordedRequest {
    /// Path without the query string.
    #[must_use]
    pub fn path(&self) -> &str {
        self.target
            .split_once('?')
            .map_or(self.target.as_str(), |(path, _)| path)
    }

    /// Whether the query string or form body carries `key=value`
    /// (both already URL-encoded).
    #[must_use]
    pub fn has_param(&self, key: &str, value: &str) -> bool {
        let pair = format!("{key}={value}");
        let query = self.target.split_once('?').map_or("", |(_, q)| q);
        query.split('&').chain(self.body.split('&')).any(|p| p == pair)
    }
}

/// A local HTTP server answering with canned responses, in order.
///
/// Every request, whatever its method or path, takes the next response.
/// Once they run out the gateway answers `503 Service Unavailable`.
pub struct MockGateway {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: JoinHandle<()>,
}

impl MockGateway {
    /// Bind to an ephemeral port and start serving.
    ///
    /// # Errors
    ///
    /// Returns error if the listener cannot bind.
    pub async fn start(responses: Vec<CannedResponse>) -> io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let state = GatewayState {
            responses: Arc::new(Mutex::new(VecDeque::from(responses))),
            requests: Arc::new(Mutex::new(Vec::new())),
        };
        let requests = Arc::clone(&state.requests);

        let app = Router::new().fallback(answer).with_state(state);
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            addr,
            requests,
            handle,
        })
    }

    /// Base URL to point a [`Config`] at.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Production defaults with every host pointed at this server.
    ///
    /// # Errors
    ///
    /// Returns error if the address does not form a valid URL.
    pub fn config(&self) -> Result<Config, ConfigError> {
        let mut config = Config::production().with_base_url(&self.base_url())?;
        config.payment_host = self.base_url();
        Ok(config)
    }

    /// Client for `seller@example.com` pointed at this server.
    ///
    /// Bypasses any proxy from the environment.
    ///
    /// # Errors
    ///
    /// Returns error if the client fails to build.
    pub fn client(&self) -> Result<PagSeguroClient, PagSeguroError> {
        let config = self.config()?;
        let http = reqwest::Client::builder()
            .no_proxy()
            .timeout(config.timeout)
            .build()?;
        Ok(PagSeguroClient::with_http_client(
            http,
            test_credentials(),
            config,
        ))
    }

    /// Requests received so far.
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().await.clone()
    }
}

impl Drop for MockGateway {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Credentials every offline test uses.
#[must_use]
pub fn test_credentials() -> Credentials {
    Credentials::new("seller@example.com", "4F2B9C1E0A")
}

#[derive(Clone)]
struct GatewayState {
    responses: Arc<Mutex<VecDeque<CannedResponse>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Record the request, then reply with the next canned response.
async fn answer(
    State(state): State<GatewayState>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    state.requests.lock().await.push(RecordedRequest {
        method: method.as_str().to_string(),
        target: uri
            .path_and_query()
            .map_or_else(|| uri.path().to_string(), ToString::to_string),
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    let Some(canned) = state.responses.lock().await.pop_front() else {
        return (StatusCode::SERVICE_UNAVAILABLE, "No canned response left").into_response();
    };

    let status = StatusCode::from_u16(canned.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        [(header::CONTENT_TYPE, "application/xml; charset=UTF-8")],
        canned.body,
    )
        .into_response()
}
