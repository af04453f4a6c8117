//! HTTP client for the PagSeguro gateway.
//!
//! # Endpoints
//!
//! - `POST {base}/v2/checkout` - open a checkout
//! - `GET {base}/v3/transactions/notifications/{code}` - resolve a notification
//! - `GET {base}/v3/transactions/{code}` - look up a transaction
//! - `GET {base}/v2/transactions` - search transactions by date
//!
//! Every call authenticates with the seller `email` and `token`, sent as
//! form fields on `POST` and as query parameters on `GET`.

use std::sync::Arc;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use tracing::{debug, instrument, warn};

use crate::checkout::CheckoutRequest;
use crate::config::{Config, Credentials};
use crate::error::PagSeguroError;
use crate::query::TransactionQuery;
use crate::response::{
    CheckoutResponse, FromXml, Transaction, TransactionDetails, TransactionSearchResult,
    gateway_errors,
};

/// PagSeguro API client.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct PagSeguroClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    client: reqwest::Client,
    credentials: Credentials,
    config: Config,
}

impl std::fmt::Debug for PagSeguroClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagSeguroClient")
            .field("credentials", &self.inner.credentials)
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl PagSeguroClient {
    /// Create a client for one seller account.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(credentials: Credentials, config: Config) -> Result<Self, PagSeguroError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/xml;charset=ISO-8859-1"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self::with_http_client(client, credentials, config))
    }

    /// Create a client on top of a preconfigured `reqwest::Client`.
    ///
    /// `config.timeout` is not applied; the given client's settings win.
    #[must_use]
    pub fn with_http_client(
        client: reqwest::Client,
        credentials: Credentials,
        config: Config,
    ) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                client,
                credentials,
                config,
            }),
        }
    }

    /// Create a client from `PAGSEGURO_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns error if credentials are missing, any variable is invalid, or
    /// the HTTP client fails to build.
    pub fn from_env() -> Result<Self, PagSeguroError> {
        let credentials = Credentials::from_env()?;
        let config = Config::from_env()?;
        Self::new(credentials, config)
    }

    /// Configuration the client was built with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Seller credentials used by default.
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.inner.credentials
    }

    /// Start a checkout with this client's credentials and configuration.
    #[must_use]
    pub fn checkout_request(&self) -> CheckoutRequest {
        CheckoutRequest::new(self.inner.credentials.clone(), self.inner.config.clone())
    }

    /// Open a checkout.
    ///
    /// The request's own credentials are sent, so a request can act on
    /// behalf of another seller.
    ///
    /// # Errors
    ///
    /// Returns [`PagSeguroError::Validation`] before sending anything if a
    /// sender field is invalid, otherwise any transport or gateway error.
    #[instrument(
        skip(self, request),
        fields(reference = %request.reference(), items = request.items.len())
    )]
    pub async fn checkout(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutResponse, PagSeguroError> {
        let params = request.build_checkout_params()?;
        debug!(fields = params.len(), "Checkout params built");

        let response: CheckoutResponse = self
            .send(
                self.inner
                    .client
                    .post(self.inner.config.checkout_url())
                    .form(&params),
            )
            .await?;

        debug!(code = %response.code, "Checkout created");
        Ok(response)
    }

    /// Resolve a notification code posted by the gateway.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the gateway rejects the code.
    #[instrument(skip(self))]
    pub async fn check_notification(
        &self,
        code: &str,
    ) -> Result<TransactionDetails, PagSeguroError> {
        let url = self.inner.config.notification_url(code)?;
        self.get(url.as_str(), &self.auth_params()).await
    }

    /// Look up a transaction by its code.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the gateway rejects the code.
    #[instrument(skip(self))]
    pub async fn check_transaction(
        &self,
        code: &str,
    ) -> Result<TransactionDetails, PagSeguroError> {
        let url = self.inner.config.transaction_url(code)?;
        self.get(url.as_str(), &self.auth_params()).await
    }

    /// Fetch one page of a transaction search.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the gateway rejects the query.
    #[instrument(skip(self, query), fields(page = ?query.page))]
    pub async fn search_transactions(
        &self,
        query: &TransactionQuery,
    ) -> Result<TransactionSearchResult, PagSeguroError> {
        let url = self.inner.config.search_url();
        let result: TransactionSearchResult =
            self.get(&url, &query.to_params(&self.inner.credentials)).await?;

        debug!(
            current_page = ?result.current_page(),
            total_pages = ?result.total_pages(),
            results = result.transactions().len(),
            "Search page received"
        );
        Ok(result)
    }

    /// Fetch every page of a search, starting at `query.page`.
    ///
    /// Stops when the current page reaches the total, when the gateway
    /// leaves either out, or when a page does not move past the previous one.
    ///
    /// # Errors
    ///
    /// Returns the first error any page fails with.
    #[instrument(skip(self, query))]
    pub async fn query_transactions(
        &self,
        query: &TransactionQuery,
    ) -> Result<Vec<Transaction>, PagSeguroError> {
        let mut query = *query;
        let mut transactions = Vec::new();
        let mut previous: Option<u32> = None;

        loop {
            let result = self.search_transactions(&query).await?;
            let (current, total) = (result.current_page(), result.total_pages());

            if let (Some(previous), Some(current)) = (previous, current)
                && current <= previous
            {
                warn!(previous, current, "Gateway repeated a search page, stopping");
                break;
            }
            transactions.extend(result.into_transactions());

            match (current, total) {
                (Some(current), Some(total)) if current < total => {
                    previous = Some(current);
                    query.page = Some(current + 1);
                }
                _ => break,
            }
        }

        debug!(count = transactions.len(), "Search complete");
        Ok(transactions)
    }

    fn auth_params(&self) -> [(&'static str, &str); 2] {
        [
            ("email", self.inner.credentials.email.as_str()),
            ("token", self.inner.credentials.expose_token()),
        ]
    }

    async fn get<T, Q>(&self, url: &str, query: &Q) -> Result<T, PagSeguroError>
    where
        T: FromXml,
        Q: serde::Serialize + ?Sized,
    {
        self.send(self.inner.client.get(url).query(query)).await
    }

    /// Send a request and parse the body as `T`.
    async fn send<T: FromXml>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, PagSeguroError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!(status = status.as_u16(), bytes = body.len(), "Gateway response");

        if !status.is_success() {
            if let Some(errors) = gateway_errors(&body)? {
                warn!(status = status.as_u16(), ?errors, "Gateway returned errors");
                return Err(PagSeguroError::Gateway(errors));
            }

            warn!(status = status.as_u16(), "Gateway request failed");
            return Err(PagSeguroError::Http {
                status: status.as_u16(),
                body,
            });
        }

        T::from_xml(&body, &self.inner.config).inspect_err(|e| {
            if matches!(e, PagSeguroError::Gateway(_)) {
                warn!(error = %e, "Gateway returned errors");
            }
        })
    }
}
