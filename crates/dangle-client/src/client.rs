//! Main provider API client implementation.

use crate::api::RecordSetsApi;
use crate::config::{RateLimit, TransportConfig};
use async_trait::async_trait;
use dangle_core::{DangleError, ListRecordSetsRequest, RecordSetPage, RecordSetSource, Result};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::Client as HttpClient;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// API version prefix on every path
const API_PREFIX: &str = "/2013-04-01";

/// Client for listing a hosted zone's record sets
#[derive(Clone)]
pub struct ZoneClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    token: Option<String>,
    endpoint: Url,
    limiter: Option<DefaultDirectRateLimiter>,
}

impl ZoneClient {
    /// Create a client for `endpoint` using default settings
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        ZoneClientBuilder::new().endpoint(endpoint).token(token).build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder() -> ZoneClientBuilder {
        ZoneClientBuilder::new()
    }

    /// Access record-set endpoints
    #[must_use]
    pub fn record_sets(&self) -> RecordSetsApi<'_> {
        RecordSetsApi::new(self)
    }

    /// Base endpoint this client talks to
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    /// Perform a GET request with query parameters.
    ///
    /// `resource` names what is being fetched, for not-found errors.
    pub(crate) async fn get_with_query(
        &self,
        path: &str,
        params: &[(&str, &str)],
        resource: &str,
    ) -> Result<Value> {
        let url = self.build_url(path, params)?;

        if let Some(limiter) = &self.inner.limiter {
            limiter.until_ready().await;
        }

        debug!(url = %url, "GET request");

        let mut request = self.inner.http.get(url);
        if let Some(token) = &self.inner.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(map_transport_error)?;

        self.handle_response(response, resource).await
    }

    /// Build a URL under the API prefix with query parameters
    fn build_url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url> {
        let base = self.inner.endpoint.as_str().trim_end_matches('/');
        let mut url = Url::parse(&format!("{base}{API_PREFIX}{path}"))
            .map_err(|e| DangleError::InvalidUrl(e.to_string()))?;

        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }

        Ok(url)
    }

    /// Handle a response that returns JSON
    async fn handle_response(&self, response: reqwest::Response, resource: &str) -> Result<Value> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await.map_err(map_transport_error)?;
            serde_json::from_str(&body).map_err(|e| DangleError::Decode(e.to_string()))
        } else {
            Err(Self::handle_error(status.as_u16(), response, resource).await)
        }
    }

    /// Convert an error response to a [`DangleError`]
    async fn handle_error(status: u16, response: reqwest::Response, resource: &str) -> DangleError {
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());
        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body);

        match status {
            401 | 403 => DangleError::Unauthorized,
            404 => DangleError::ZoneNotFound {
                zone_id: resource.to_string(),
            },
            429 => {
                warn!("rate limited by provider");
                DangleError::RateLimited { retry_after }
            }
            400 if message.contains("Throttling") || message.contains("Rate exceeded") => {
                warn!("throttled by provider");
                DangleError::RateLimited { retry_after }
            }
            _ => DangleError::Api {
                code: status,
                message,
            },
        }
    }
}

#[async_trait]
impl RecordSetSource for ZoneClient {
    async fn list_record_sets(&self, request: &ListRecordSetsRequest) -> Result<RecordSetPage> {
        self.record_sets().fetch(request).await
    }
}

/// Map a reqwest failure onto the error taxonomy
fn map_transport_error(err: reqwest::Error) -> DangleError {
    if err.is_timeout() {
        DangleError::Timeout(err.to_string())
    } else if err.is_connect() {
        DangleError::Connection(err.to_string())
    } else if err.is_decode() {
        DangleError::Decode(err.to_string())
    } else {
        DangleError::Http(err.to_string())
    }
}

/// Pull a human-readable message out of an error body.
///
/// Understands `{"Error": {"Code", "Message"}}` and `{"message": ...}`;
/// anything else is returned as is.
fn error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return body.to_string();
    };

    if let Some(err) = value.get("Error") {
        let code = err.get("Code").and_then(Value::as_str);
        let message = err.get("Message").and_then(Value::as_str);
        match (code, message) {
            (Some(code), Some(message)) => return format!("{code}: {message}"),
            (None, Some(message)) => return message.to_string(),
            (Some(code), None) => return code.to_string(),
            (None, None) => {}
        }
    }

    value
        .get("message")
        .and_then(Value::as_str)
        .map_or_else(|| body.to_string(), String::from)
}

/// Builder for configuring a [`ZoneClient`].
///
/// There is no default endpoint. The client speaks bearer-authenticated JSON,
/// so it must be pointed at a gateway that exposes the record-set listing in
/// that form.
pub struct ZoneClientBuilder {
    endpoint: Option<String>,
    token: Option<String>,
    user_agent: String,
    transport: TransportConfig,
    rate_limit: Option<RateLimit>,
}

impl Default for ZoneClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ZoneClientBuilder {
    /// Create a builder with default settings
    #[must_use]
    pub fn new() -> Self {
        Self {
            endpoint: None,
            token: None,
            user_agent: format!("dangle/{}", env!("CARGO_PKG_VERSION")),
            transport: TransportConfig::default(),
            rate_limit: Some(RateLimit::default()),
        }
    }

    /// Set the endpoint (a JSON gateway, or a mock server in tests)
    #[must_use]
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = Some(url.into());
        self
    }

    /// Set the bearer credential
    #[must_use]
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Set transport timeouts and pool settings
    #[must_use]
    pub fn transport(mut self, config: TransportConfig) -> Self {
        self.transport = config;
        self
    }

    /// Set the client-side rate limit; `None` disables it
    #[must_use]
    pub const fn rate_limit(mut self, limit: Option<RateLimit>) -> Self {
        self.rate_limit = limit;
        self
    }

    /// Build the client; fails when no endpoint was set
    pub fn build(self) -> Result<ZoneClient> {
        let raw = self
            .endpoint
            .as_deref()
            .ok_or_else(|| DangleError::Config("endpoint is required".into()))?;
        let endpoint =
            Url::parse(raw).map_err(|e| DangleError::InvalidUrl(format!("{raw}: {e}")))?;

        let transport = &self.transport;
        let http = HttpClient::builder()
            .connect_timeout(transport.connect_budget())
            .read_timeout(transport.response_header)
            .timeout(transport.request)
            .pool_idle_timeout(transport.idle_connection)
            .pool_max_idle_per_host(transport.max_idle_per_host)
            .tcp_keepalive(transport.keep_alive)
            .user_agent(&self.user_agent)
            .gzip(true)
            .build()
            .map_err(|e| DangleError::Config(format!("failed to build HTTP client: {e}")))?;

        let limiter = self
            .rate_limit
            .map(|limit| RateLimiter::direct(Quota::per_second(limit.per_second)));

        Ok(ZoneClient {
            inner: Arc::new(ClientInner {
                http,
                token: self.token,
                endpoint,
                limiter,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_versioned_urls() {
        let client = ZoneClient::builder()
            .endpoint("http://localhost:8080/")
            .build()
            .unwrap();
        let url = client
            .build_url("/hostedzone/Z1/rrset", &[("name", "www.example.com."), ("type", "A")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/2013-04-01/hostedzone/Z1/rrset?name=www.example.com.&type=A"
        );
    }

    #[test]
    fn rejects_bad_endpoint() {
        let err = ZoneClient::builder().endpoint("not a url").build().err().unwrap();
        assert!(matches!(err, DangleError::InvalidUrl(_)));
    }

    #[test]
    fn endpoint_is_required() {
        let err = ZoneClient::builder().token("t").build().err().unwrap();
        assert!(matches!(err, DangleError::Config(ref msg) if msg.contains("endpoint")));
    }

    #[test]
    fn error_message_shapes() {
        assert_eq!(
            error_message(r#"{"Error":{"Code":"NoSuchHostedZone","Message":"No hosted zone found"}}"#),
            "NoSuchHostedZone: No hosted zone found"
        );
        assert_eq!(error_message(r#"{"message":"Forbidden"}"#), "Forbidden");
        assert_eq!(error_message("plain text"), "plain text");
    }
}
