//! Reqwest-backed REST client shared by every API port.
//!
//! This adapter owns transport details only: URL assembly, bearer and trace
//! headers, timeouts, HTTP error mapping and JSON decoding.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, StatusCode, Url, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use zeroize::Zeroizing;

use crate::domain::TraceId;
use crate::domain::ports::ApiError;

/// REST client bound to one API base URL and, optionally, one bearer token.
#[derive(Clone)]
pub struct HttpApiClient {
    client: Client,
    base_url: String,
    token: Option<Zeroizing<String>>,
}

impl std::fmt::Debug for HttpApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpApiClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.token.is_some())
            .finish_non_exhaustive()
    }
}

impl HttpApiClient {
    /// Build a client with an explicit request timeout.
    /// ```rust,ignore
    /// let client = HttpApiClient::new(base_url, Duration::from_secs(30), false)?;
    /// ```
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        timeout: Duration,
        accept_invalid_certs: bool,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.as_str().trim_end_matches('/').to_owned(),
            token: None,
        })
    }

    /// Attach the bearer token sent with every request. Blank tokens are
    /// ignored.
    #[must_use]
    pub fn with_token(mut self, token: Option<&str>) -> Self {
        self.token = token
            .filter(|value| !value.trim().is_empty())
            .map(|value| Zeroizing::new(value.to_owned()));
        self
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(super) fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }

    pub(super) fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let mut builder = self
            .client
            .request(method, self.url(endpoint))
            .header(header::ACCEPT, "application/json");
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token.as_str());
        }
        if let Some(trace_id) = TraceId::current() {
            builder = builder.header(TraceId::HEADER_NAME, trace_id.to_string());
        }
        builder
    }

    pub(super) fn json_request<B>(&self, method: Method, endpoint: &str, body: &B) -> RequestBuilder
    where
        B: Serialize + ?Sized,
    {
        self.request(method, endpoint).json(body)
    }

    /// Send `request` and return the body, or `None` for 204 and empty bodies.
    pub(super) async fn execute(&self, request: RequestBuilder) -> Result<Option<Vec<u8>>, ApiError> {
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "API response");
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        if status == StatusCode::NO_CONTENT || body.is_empty() {
            return Ok(None);
        }
        Ok(Some(body.to_vec()))
    }

    /// Send `request`, discarding any body.
    pub(super) async fn execute_unit(&self, request: RequestBuilder) -> Result<(), ApiError> {
        self.execute(request).await.map(|_| ())
    }

    /// Send `request` and decode its JSON body into `T`.
    pub(super) async fn execute_json<T>(&self, request: RequestBuilder) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let body = self.execute(request).await?;
        decode_body(body)
    }
}

pub(super) fn decode_body<T>(body: Option<Vec<u8>>) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    let body = body.ok_or_else(|| ApiError::decode("expected a JSON body, got none"))?;
    serde_json::from_slice(&body)
        .map_err(|error| ApiError::decode(format!("invalid JSON payload: {error}")))
}

fn map_transport_error(error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        return ApiError::transport("request timed out");
    }
    ApiError::transport(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ApiError {
    let parsed = serde_json::from_slice::<Value>(body)
        .ok()
        .filter(Value::is_object)
        .unwrap_or_else(|| Value::Object(serde_json::Map::new()));
    ApiError::status(
        status.as_u16(),
        status.canonical_reason().unwrap_or_default(),
        parsed,
    )
}
