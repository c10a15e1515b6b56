//! HTTP client abstraction for testability

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, Url};

/// A fully built request, ready to be dispatched
#[derive(Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    /// Username and password for HTTP Basic Auth
    pub basic_auth: Option<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl std::fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let header_names: Vec<&str> = self.headers.iter().map(|(k, _)| k.as_str()).collect();
        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("url", &self.url.as_str())
            .field("basic_auth", &self.basic_auth.is_some())
            .field("headers", &header_names)
            .finish()
    }
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// HTTP response from a request
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Abstraction over HTTP client for dependency injection
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait HttpClient: Send + Sync {
    /// Send the request and read the whole response body
    async fn execute(&self, request: HttpRequest) -> crate::Result<HttpResponse>;
}

/// Production HTTP client using reqwest
#[derive(Debug, Default)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Client whose requests fail once `timeout` has elapsed
    pub fn with_timeout(timeout: Duration) -> crate::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| crate::PingdomError::Http(format!("Building HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn execute(&self, request: HttpRequest) -> crate::Result<HttpResponse> {
        let HttpRequest {
            method,
            url,
            basic_auth,
            headers,
        } = request;
        let target = format!("{} {}", method, url);
        tracing::debug!("{}", target);

        let mut builder = self.client.request(method, url);
        if let Some((username, password)) = basic_auth {
            builder = builder.basic_auth(username, Some(password));
        }
        for (name, value) in headers {
            builder = builder.header(name, value);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| crate::PingdomError::Http(format!("{} failed: {}", target, e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| crate::PingdomError::Http(format!("{} failed: {}", target, e)))?;

        tracing::debug!("{} -> {} ({} bytes)", target, status, body.len());
        Ok(HttpResponse { status, body })
    }
}
