//! HTTP gateway for all outbound API calls.
//!
//! Every request passes through [`Gateway::send`], which attaches the
//! persisted access token as a bearer credential and recovers from an
//! expired token with a single silent refresh: on a 401 the gateway posts
//! the refresh token to `auth/token/refresh/`, persists the new access
//! token, and re-issues the original request exactly once. A failed
//! refresh clears both tokens and forces navigation back to the login
//! route.
//!
//! The transport behind the gateway is a trait so the refresh-once policy
//! can be exercised without a network layer. The real transport uses
//! `gloo-net` and is gated behind `#[cfg(feature = "hydrate")]`.

#[cfg(test)]
#[path = "gateway_test.rs"]
mod gateway_test;

use std::rc::Rc;

use futures::future::LocalBoxFuture;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::storage::{ACCESS_TOKEN_KEY, KeyValueStorage, REFRESH_TOKEN_KEY};

/// Base URL of the backend REST API.
pub const API_BASE_URL: &str = "http://127.0.0.1:8000/";

/// HTTP method for an [`ApiRequest`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// An outbound request, relative to [`API_BASE_URL`].
///
/// `retried` marks a request that has already been through the
/// refresh-on-401 path, bounding recovery to one retry per original call.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    pub bearer: Option<String>,
    pub retried: bool,
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            bearer: None,
            retried: false,
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// A successful (2xx) response with its decoded JSON body.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    /// Deserialize the body into a typed value.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        serde_json::from_value(self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Error taxonomy for API calls.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// Non-2xx response with whatever JSON body the server returned.
    #[error("HTTP {status}")]
    Status { status: u16, body: Value },
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),
    /// The response body could not be decoded.
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

/// Human-readable message for an API error.
///
/// Structured backend errors carry the message under `detail`, `message`,
/// or `error` depending on the endpoint; fall through them in that order
/// before giving up on the generic rendering.
#[must_use]
pub fn error_message(err: &ApiError) -> String {
    if let ApiError::Status { body, .. } = err {
        for key in ["detail", "message", "error"] {
            if let Some(msg) = body.get(key).and_then(Value::as_str) {
                return msg.to_owned();
            }
        }
    }
    err.to_string()
}

/// Raw request transport. Implemented by [`GlooTransport`] in the browser
/// and by in-memory fakes in tests.
pub trait Transport {
    fn send(&self, request: ApiRequest) -> LocalBoxFuture<'_, Result<ApiResponse, ApiError>>;
}

/// Request pipeline with credential attachment and refresh-once recovery.
pub struct Gateway {
    transport: Rc<dyn Transport>,
    storage: Rc<dyn KeyValueStorage>,
    on_session_expired: Rc<dyn Fn()>,
}

impl Gateway {
    pub fn new(
        transport: Rc<dyn Transport>,
        storage: Rc<dyn KeyValueStorage>,
        on_session_expired: Rc<dyn Fn()>,
    ) -> Self {
        Self {
            transport,
            storage,
            on_session_expired,
        }
    }

    /// Dispatch a request through the full pipeline.
    ///
    /// Boxed so the refresh path can re-enter the pipeline for its single
    /// retry.
    pub fn send(&self, request: ApiRequest) -> LocalBoxFuture<'_, Result<ApiResponse, ApiError>> {
        Box::pin(self.dispatch(request))
    }

    async fn dispatch(&self, mut request: ApiRequest) -> Result<ApiResponse, ApiError> {
        if let Some(token) = self.storage.get(ACCESS_TOKEN_KEY) {
            request.bearer = Some(token);
        }
        let already_retried = request.retried;

        match self.transport.send(request.clone()).await {
            Err(err) if err.is_unauthorized() && !already_retried => {
                let Some(refresh) = self.storage.get(REFRESH_TOKEN_KEY) else {
                    return Err(err);
                };
                match self.refresh_access_token(&refresh).await {
                    Ok(access) => {
                        self.storage.set(ACCESS_TOKEN_KEY, &access);
                        request.bearer = Some(access);
                        request.retried = true;
                        self.send(request).await
                    }
                    Err(refresh_err) => {
                        log::warn!("token refresh failed, forcing re-login");
                        self.storage.remove(ACCESS_TOKEN_KEY);
                        self.storage.remove(REFRESH_TOKEN_KEY);
                        (self.on_session_expired)();
                        Err(refresh_err)
                    }
                }
            }
            other => other,
        }
    }

    /// Mint a new access token from the refresh token.
    ///
    /// Goes through the raw transport, not [`Gateway::send`], so a 401 from
    /// the refresh endpoint itself cannot re-enter the retry path.
    async fn refresh_access_token(&self, refresh: &str) -> Result<String, ApiError> {
        let request = ApiRequest::new(Method::Post, "auth/token/refresh/")
            .with_body(serde_json::json!({ "refresh": refresh }));
        let response = self.transport.send(request).await?;
        response
            .body
            .get("access")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| ApiError::Decode("refresh response missing access token".to_owned()))
    }

    /// GET `path` and decode the JSON body.
    ///
    /// # Errors
    ///
    /// Propagates transport, status, and decode errors.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(ApiRequest::new(Method::Get, path)).await?.json()
    }

    /// GET `path` and return the raw JSON body.
    ///
    /// # Errors
    ///
    /// Propagates transport and status errors.
    pub async fn get_raw(&self, path: &str) -> Result<Value, ApiError> {
        Ok(self.send(ApiRequest::new(Method::Get, path)).await?.body)
    }

    /// POST `body` to `path` and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Propagates transport, status, and decode errors.
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.send(ApiRequest::new(Method::Post, path).with_body(body))
            .await?
            .json()
    }

    /// PUT `body` to `path` and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Propagates transport, status, and decode errors.
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.send(ApiRequest::new(Method::Put, path).with_body(body))
            .await?
            .json()
    }

    /// DELETE `path`, discarding the response body.
    ///
    /// # Errors
    ///
    /// Propagates transport and status errors.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(ApiRequest::new(Method::Delete, path)).await?;
        Ok(())
    }
}

/// Full-page navigation to the login route, dropping all in-memory state.
/// Requires a browser environment; a no-op elsewhere.
pub fn redirect_to_login() {
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href("/login");
        }
    }
}

/// Browser transport over `gloo-net`.
#[cfg(feature = "hydrate")]
pub struct GlooTransport {
    base_url: String,
}

#[cfg(feature = "hydrate")]
impl GlooTransport {
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: API_BASE_URL.to_owned(),
        }
    }

    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

#[cfg(feature = "hydrate")]
impl Default for GlooTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "hydrate")]
impl Transport for GlooTransport {
    fn send(&self, request: ApiRequest) -> LocalBoxFuture<'_, Result<ApiResponse, ApiError>> {
        let url = format!("{}{}", self.base_url, request.path);
        Box::pin(async move {
            let mut builder = match request.method {
                Method::Get => gloo_net::http::Request::get(&url),
                Method::Post => gloo_net::http::Request::post(&url),
                Method::Put => gloo_net::http::Request::put(&url),
                Method::Delete => gloo_net::http::Request::delete(&url),
            };
            if let Some(token) = &request.bearer {
                builder = builder.header("Authorization", &format!("Bearer {token}"));
            }
            let req = match &request.body {
                Some(body) => builder
                    .json(body)
                    .map_err(|e| ApiError::Network(e.to_string()))?,
                None => builder
                    .build()
                    .map_err(|e| ApiError::Network(e.to_string()))?,
            };

            let response = req
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            let body = if text.is_empty() {
                Value::Null
            } else {
                serde_json::from_str(&text).unwrap_or(Value::Null)
            };

            if (200..300).contains(&status) {
                Ok(ApiResponse { status, body })
            } else {
                Err(ApiError::Status { status, body })
            }
        })
    }
}
