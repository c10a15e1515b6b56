//! Pingdom API client

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, Url};
use serde::de::DeserializeOwned;

use crate::check::Check;
use crate::config::{ClientConfig, DEFAULT_BASE_URL};
use crate::envelope::{CheckEnvelope, CheckListEnvelope, ErrorEnvelope, MessageResponse};
use crate::io::{HttpClient, HttpRequest, HttpResponse, ReqwestHttpClient};
use crate::{PingdomError, Result};

/// Versioned path prefix of every resource
pub const API_PREFIX: &str = "/api/2.0";

/// Header carrying the application key on every request
pub const APP_KEY_HEADER: &str = "App-Key";

/// Client for the Pingdom checks API.
///
/// Holds credentials and the base endpoint; every call is an independent
/// request/response exchange, so a client can be cloned and shared freely.
#[derive(Clone)]
pub struct PingdomClient {
    username: String,
    password: String,
    app_key: String,
    base_url: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for PingdomClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PingdomClient")
            .field("username", &self.username)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl PingdomClient {
    /// Client bound to the public API endpoint using reqwest
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        app_key: impl Into<String>,
    ) -> Self {
        Self::with_http_client(
            username,
            password,
            app_key,
            Arc::new(ReqwestHttpClient::new()),
        )
    }

    pub fn with_http_client(
        username: impl Into<String>,
        password: impl Into<String>,
        app_key: impl Into<String>,
        http: Arc<dyn HttpClient>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            app_key: app_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            http,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let http: Arc<dyn HttpClient> = match config.timeout_seconds {
            Some(seconds) => Arc::new(ReqwestHttpClient::with_timeout(Duration::from_secs(
                seconds,
            ))?),
            None => Arc::new(ReqwestHttpClient::new()),
        };
        tracing::debug!("Created PingdomClient at {}", config.base_url);
        Ok(Self::with_http_client(
            config.username.clone(),
            config.password.clone(),
            config.app_key.clone(),
            http,
        )
        .with_base_url(config.base_url.clone()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build an authenticated request for `resource` below the base URL.
    ///
    /// Parameters are encoded into the query string sorted by key, so the
    /// resulting URL does not depend on the order they were supplied in.
    pub fn build_request(
        &self,
        method: Method,
        resource: &str,
        params: &[(&str, &str)],
    ) -> Result<HttpRequest> {
        let raw = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            resource.trim_start_matches('/')
        );
        let mut url =
            Url::parse(&raw).map_err(|e| PingdomError::InvalidUrl(format!("{}: {}", raw, e)))?;

        if !params.is_empty() {
            let mut sorted = params.to_vec();
            sorted.sort_by(|a, b| a.0.cmp(b.0));
            url.query_pairs_mut().extend_pairs(sorted);
        }

        Ok(HttpRequest {
            method,
            url,
            basic_auth: Some((self.username.clone(), self.password.clone())),
            headers: vec![(APP_KEY_HEADER.to_string(), self.app_key.clone())],
        })
    }

    /// All checks, in the order the server reports them
    pub async fn list_checks(&self) -> Result<Vec<Check>> {
        let request = self.build_request(Method::GET, &checks_path(), &[])?;
        let envelope: CheckListEnvelope = self.send(request).await?;
        tracing::debug!("Listed {} checks", envelope.checks.len());
        Ok(envelope.checks)
    }

    /// Create an HTTP check; returns the server's copy including its new id
    pub async fn create_check(&self, check: &Check) -> Result<Check> {
        let params = check.create_params();
        let request = self.build_request(Method::POST, &checks_path(), &params.pairs())?;
        let envelope: CheckEnvelope = self.send(request).await?;
        tracing::debug!("Created check {} '{}'", envelope.check.id, check.name);
        Ok(envelope.check)
    }

    pub async fn read_check(&self, id: u64) -> Result<Check> {
        let request = self.build_request(Method::GET, &check_path(id), &[])?;
        let envelope: CheckEnvelope = self.send(request).await?;
        Ok(envelope.check)
    }

    /// Update name and host of a check. The check type cannot be changed.
    pub async fn update_check(&self, id: u64, check: &Check) -> Result<MessageResponse> {
        let params = check.update_params();
        let request = self.build_request(Method::PUT, &check_path(id), &params.pairs())?;
        self.send(request).await
    }

    pub async fn delete_check(&self, id: u64) -> Result<MessageResponse> {
        let request = self.build_request(Method::DELETE, &check_path(id), &[])?;
        self.send(request).await
    }

    async fn send<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T> {
        let target = format!("{} {}", request.method, request.url.path());
        let response = self.http.execute(request).await?;

        if let Err(e) = validate_response(&response) {
            tracing::debug!("{} rejected: {}", target, e);
            return Err(e);
        }

        serde_json::from_str(&response.body).map_err(|e| {
            tracing::debug!("{} returned an undecodable body: {}", target, e);
            PingdomError::Json(e)
        })
    }
}

/// Turn a non-2xx response into the server's structured error
pub fn validate_response(response: &HttpResponse) -> Result<()> {
    if (200..=299).contains(&response.status) {
        return Ok(());
    }

    let envelope: ErrorEnvelope = serde_json::from_str(&response.body).map_err(|source| {
        PingdomError::MalformedErrorResponse {
            status: response.status,
            source,
        }
    })?;
    Err(PingdomError::Api(envelope.error))
}

fn checks_path() -> String {
    format!("{}/checks", API_PREFIX)
}

fn check_path(id: u64) -> String {
    format!("{}/checks/{}", API_PREFIX, id)
}
