//! Backend gateway built on reqwest.
//!
//! Every call to the SubManager backend goes through [`BackendClient::send`]:
//! it attaches the stored bearer credential, classifies the response with
//! [`intercept`] and, on a rejected credential, clears the token store and
//! raises the invalidation signal. The port implementations in `crate::api`
//! are thin wrappers over the helpers here.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use submanager_application::gateway::{
    ApiError, Interception, InvalidationSignal, UnauthorizedPolicy, intercept,
};
use submanager_application::ports::TokenStore;
use tracing::{debug, warn};
use url::Url;

/// HTTP gateway to the SubManager backend.
pub struct BackendClient {
    client: Client,
    base_url: Url,
    tokens: Arc<dyn TokenStore>,
    signal: InvalidationSignal,
    timeout: Duration,
}

impl BackendClient {
    /// Creates a gateway for `base_url`.
    ///
    /// # Errors
    /// Returns an error if the URL cannot be parsed or the client cannot be built.
    pub fn new(
        base_url: &str,
        timeout: Duration,
        tokens: Arc<dyn TokenStore>,
        signal: InvalidationSignal,
    ) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::InvalidRequest(format!("{e}: {base_url}")))?;
        let client = Client::builder()
            .user_agent(concat!("submanager/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            tokens,
            signal,
            timeout,
        })
    }

    /// The signal raised when the backend rejects the credential.
    #[must_use]
    pub const fn signal(&self) -> &InvalidationSignal {
        &self.signal
    }

    /// Resolves `path` against the base URL, keeping any base path prefix.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let raw = format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path);
        Url::parse(&raw).map_err(|e| ApiError::InvalidRequest(format!("{e}: {raw}")))
    }

    /// Like [`Self::endpoint`], with query parameters.
    pub(crate) fn endpoint_with_query(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Url, ApiError> {
        let mut url = self.endpoint(path)?;
        url.query_pairs_mut()
            .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        Ok(url)
    }

    /// `collection/{id}/tail...` with `id` percent-encoded as one segment.
    pub(crate) fn resource(
        &self,
        collection: &str,
        id: &str,
        tail: &[&str],
    ) -> Result<Url, ApiError> {
        let mut url = self.endpoint(collection)?;
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidRequest(format!("cannot append to {collection}")))?
            .pop_if_empty()
            .push(id)
            .extend(tail);
        Ok(url)
    }

    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client.request(method, url)
    }

    /// Sends a request through the interception rules.
    ///
    /// # Errors
    /// - [`ApiError::Unauthorized`] after a 401 under [`UnauthorizedPolicy::Invalidate`]
    /// - [`ApiError::Status`] for any other non-2xx status
    /// - [`ApiError::Transport`] if no response arrived
    pub(crate) async fn send(
        &self,
        builder: RequestBuilder,
        policy: UnauthorizedPolicy,
    ) -> Result<Response, ApiError> {
        let builder = match self.tokens.read().await {
            Ok(Some(credential)) => builder.bearer_auth(credential.expose()),
            Ok(None) => builder,
            Err(error) => {
                warn!(%error, "could not read stored credential, sending without it");
                builder
            }
        };

        let response = builder.send().await.map_err(|e| self.map_error(&e))?;
        let status = response.status();
        debug!(url = %response.url(), status = status.as_u16(), "backend response");

        match intercept(status.as_u16(), policy) {
            Interception::Accept => Ok(response),
            Interception::Invalidate => {
                if let Err(error) = self.tokens.clear().await {
                    warn!(%error, "could not clear rejected credential");
                }
                self.signal.session_invalidated();
                Err(ApiError::Unauthorized)
            }
            Interception::Reject => {
                let body = response.text().await.unwrap_or_default();
                Err(ApiError::Status {
                    status: status.as_u16(),
                    detail: error_detail(status, &body),
                })
            }
        }
    }

    /// Sends and decodes a JSON response.
    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        policy: UnauthorizedPolicy,
    ) -> Result<T, ApiError> {
        let response = self.send(builder, policy).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.map_error(&e))?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// `GET path` decoded as `T`.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        self.fetch(self.request(Method::GET, url), UnauthorizedPolicy::Invalidate)
            .await
    }

    /// Sends `body` as JSON and decodes the response as `T`.
    pub(crate) async fn send_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: &B,
    ) -> Result<T, ApiError> {
        self.fetch(
            self.request(method, url).json(body),
            UnauthorizedPolicy::Invalidate,
        )
        .await
    }

    /// Sends a request whose response body is not needed.
    pub(crate) async fn send_discarding(&self, builder: RequestBuilder) -> Result<(), ApiError> {
        self.send_discarding_with(builder, UnauthorizedPolicy::Invalidate)
            .await
    }

    /// Like [`Self::send_discarding`], with an explicit 401 policy.
    pub(crate) async fn send_discarding_with(
        &self,
        builder: RequestBuilder,
        policy: UnauthorizedPolicy,
    ) -> Result<(), ApiError> {
        self.send(builder, policy).await?;
        Ok(())
    }

    fn map_error(&self, error: &reqwest::Error) -> ApiError {
        if error.is_builder() {
            return ApiError::InvalidRequest(error.to_string());
        }
        if error.is_decode() {
            return ApiError::Decode(error.to_string());
        }
        if error.is_timeout() {
            return ApiError::Transport(format!(
                "request timed out after {}s",
                self.timeout.as_secs()
            ));
        }
        if error.is_connect() {
            let host = error
                .url()
                .and_then(Url::host_str)
                .unwrap_or("unknown")
                .to_string();
            return ApiError::Transport(format!("could not connect to {host}: {error}"));
        }
        ApiError::Transport(error.to_string())
    }
}

impl std::fmt::Debug for BackendClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendClient")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Extracts a message from an error body.
///
/// The backend answers errors with `{"detail": "..."}`, or with a list of
/// `{"msg": "..."}` objects for validation errors. Anything else falls back
/// to the status reason.
fn error_detail(status: StatusCode, body: &str) -> String {
    let fallback = || {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    };

    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        let body = body.trim();
        return if body.is_empty() || body.len() > 200 {
            fallback()
        } else {
            body.to_string()
        };
    };

    match value.get("detail") {
        Some(serde_json::Value::String(detail)) => detail.clone(),
        Some(serde_json::Value::Array(items)) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(serde_json::Value::as_str))
                .collect();
            if messages.is_empty() {
                fallback()
            } else {
                messages.join("; ")
            }
        }
        _ => fallback(),
    }
}
