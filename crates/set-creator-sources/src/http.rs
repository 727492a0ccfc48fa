use crate::error::SourceError;
use reqwest::{Client, RequestBuilder, Response};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_TIMEOUT_SECS: u64 = 600;
const REDACTED: &str = "(redacted)";

/// Settings shared by every provider client for one run
#[derive(Clone)]
pub struct HttpSettings {
    pub timeout: Duration,
    /// Log every request at info level instead of debug
    pub log_requests: bool,
    secrets: Vec<String>,
}

impl HttpSettings {
    pub fn new(timeout: Duration, log_requests: bool) -> Self {
        Self {
            timeout,
            log_requests,
            secrets: Vec::new(),
        }
    }

    /// Register a value that must never appear in request logs
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        let secret = secret.into();
        if !secret.is_empty() {
            self.secrets.push(secret);
        }
        self
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TIMEOUT_SECS), false)
    }
}

impl std::fmt::Debug for HttpSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSettings")
            .field("timeout", &self.timeout)
            .field("log_requests", &self.log_requests)
            .field("secrets", &self.secrets.len())
            .finish()
    }
}

/// `reqwest::Client` with the run's timeout and request logging
#[derive(Clone)]
pub struct HttpClient {
    client: Arc<Client>,
    log_requests: bool,
    secrets: Arc<Vec<String>>,
}

impl HttpClient {
    pub fn new(settings: &HttpSettings) -> Result<Self, SourceError> {
        let client = Client::builder().timeout(settings.timeout).build()?;
        Ok(Self {
            client: Arc::new(client),
            log_requests: settings.log_requests,
            secrets: Arc::new(settings.secrets.clone()),
        })
    }

    pub fn get(&self, url: &str) -> RequestBuilder {
        self.client.get(url)
    }

    pub async fn send(&self, request: RequestBuilder) -> Result<Response, SourceError> {
        let request = request.build()?;
        let method = request.method().clone();
        let url = self.redact(request.url().as_str());

        if self.log_requests {
            info!(%method, url = %url, "Request");
        } else {
            debug!(%method, url = %url, "Request");
        }

        let response = match self.client.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                let e = e.without_url();
                let error = self.redact(&e.to_string());
                warn!(%method, url = %url, error = %error, "Request failed");
                return Err(SourceError::Request(e));
            }
        };

        if self.log_requests {
            info!(%method, url = %url, status = response.status().as_u16(), "Response");
        } else {
            debug!(%method, url = %url, status = response.status().as_u16(), "Response");
        }

        Ok(response)
    }

    pub fn redact(&self, text: &str) -> String {
        self.secrets
            .iter()
            .fold(text.to_string(), |acc, secret| acc.replace(secret.as_str(), REDACTED))
    }
}

/// Turn a non-success status into [`SourceError::Http`]
pub fn check_status(response: Response) -> Result<Response, SourceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    Err(SourceError::Http {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
    })
}
