//! Single-shot HTTP calls against the HubSpot REST API.
//!
//! [`HubSpotClient::call_raw`] and [`HubSpotClient::call_json`] send exactly
//! one request per invocation. Nothing here retries; an expired token is
//! reported to the caller, who decides whether to refresh.

pub mod classify;

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::Result;

/// Default HubSpot API host.
pub const DEFAULT_API_BASE_URL: &str = "https://api.hubapi.com";

const JSON: &str = "application/json";
const FORM: &str = "application/x-www-form-urlencoded";

/// Logical verbs understood by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    /// Token refresh: a POST with an OAuth form body instead of JSON.
    Refresh,
}

impl Method {
    pub fn content_type(self) -> &'static str {
        match self {
            Method::Refresh => FORM,
            Method::Get | Method::Post | Method::Put | Method::Delete => JSON,
        }
    }

    fn http_method(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post | Method::Refresh => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }

    fn sends_body(self) -> bool {
        matches!(self, Method::Post | Method::Put | Method::Refresh)
    }
}

/// A resource path relative to the API base URL, plus query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    path: String,
    query: Vec<(String, String)>,
}

impl Endpoint {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Adds the parameter only when a value is present.
    pub fn query_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    /// Authenticates the call with HubSpot's `access_token` query parameter.
    pub fn access_token(self, token: &str) -> Self {
        self.query("access_token", token)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }
}

/// HTTP client for the HubSpot REST API.
pub struct HubSpotClient {
    http_client: Client,
    base_url: String,
}

impl HubSpotClient {
    /// Create a client using the default HubSpot API base URL.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_API_BASE_URL.to_string())
    }

    /// Create a client with a custom base URL (for testing with a mock server).
    pub fn with_base_url(base_url: String) -> Self {
        let http_client = Client::builder()
            .user_agent("hubspot-connector/1.0")
            .build()
            .expect("Failed to build HTTP client");
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one request and return the body unchanged (`None` on 204).
    ///
    /// `user_id` only tags a token-expired error.
    pub async fn call_raw(
        &self,
        method: Method,
        endpoint: &Endpoint,
        user_id: &str,
        body: Option<String>,
    ) -> Result<Option<String>> {
        let url = format!("{}{}", self.base_url, endpoint.path());
        tracing::debug!(method = ?method, path = %endpoint.path(), "Calling HubSpot");

        let mut request = self
            .http_client
            .request(method.http_method(), &url)
            .query(endpoint.query_pairs())
            .header(CONTENT_TYPE, method.content_type());
        if method.sends_body() {
            if let Some(body) = body {
                request = request.body(body);
            }
        }

        let response = request.send().await?;
        classify::read_body(response, user_id).await
    }

    /// Send one request and decode the JSON body into `T` (`None` on 204).
    pub async fn call_json<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &Endpoint,
        user_id: &str,
        body: Option<String>,
    ) -> Result<Option<T>> {
        match self.call_raw(method, endpoint, user_id, body).await? {
            Some(body) => classify::decode(&body).map(Some),
            None => Ok(None),
        }
    }
}

impl Default for HubSpotClient {
    fn default() -> Self {
        Self::new()
    }
}
