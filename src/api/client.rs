use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::models::Envelope;

/// Shared HTTP plumbing for every endpoint: base URL, access token, timeout
/// and the `{"response", "meta"}` envelope.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    config: ClientConfig,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("groupme-client/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(ApiClient { http, config })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.api_url, path.trim_start_matches('/'))
    }

    /// GET `path`. `Ok(None)` means the API had nothing to return
    /// (HTTP 304 or an empty body).
    pub fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Option<T>> {
        debug!(path, ?query, "GET");
        let request = self
            .http
            .get(self.url(path))
            .query(&[("token", self.config.token.as_str())])
            .query(query);
        self.send(request)
    }

    /// POST `body` as JSON to `path`.
    pub fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<Option<T>> {
        debug!(path, "POST");
        let request = self
            .http
            .post(self.url(path))
            .query(&[("token", self.config.token.as_str())])
            .json(body);
        self.send(request)
    }

    fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<Option<T>> {
        let resp = request.send()?;
        let status = resp.status();
        if status == StatusCode::NOT_MODIFIED {
            return Ok(None);
        }

        let body = resp.text()?;
        if !status.is_success() {
            let errors = api_errors(&body);
            warn!(status = status.as_u16(), ?errors, "request rejected");
            return Err(Error::Api {
                status: status.as_u16(),
                errors,
            });
        }

        if body.trim().is_empty() {
            return Ok(None);
        }
        let envelope: Envelope<T> = serde_json::from_str(&body)?;
        Ok(envelope.response)
    }
}

/// Pull `meta.errors` out of an error body, falling back to the raw text.
fn api_errors(body: &str) -> Vec<String> {
    match serde_json::from_str::<Envelope<serde_json::Value>>(body) {
        Ok(envelope) if !envelope.meta.errors.is_empty() => envelope.meta.errors,
        _ if body.trim().is_empty() => Vec::new(),
        _ => vec![body.trim().to_string()],
    }
}
