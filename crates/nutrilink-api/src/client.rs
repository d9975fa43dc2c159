//! Thin JSON client for the Nutrilink REST backend.
//!
//! Success bodies use the envelope `{ "message"?: string, "data": T }` and
//! only `data` is handed back. Error bodies are kept, leniently parsed, for
//! the classifier.

use crate::error::{ApiError, Result};
use nutrilink_core::ApiConfig;
use nutrilink_feedback::ResponseBody;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: serde_json::Value,
}

/// HTTP client bound to one backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Build a client from API settings.
    ///
    /// # Errors
    /// Returns error if the base URL is invalid or the HTTP client cannot be
    /// created.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| ApiError::InvalidUrl {
            url: base_url.clone(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;

        tracing::debug!(base_url = %base_url, "API client created");

        Ok(Self {
            client,
            base_url,
            token: None,
        })
    }

    /// Attach a bearer token to every request.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Replace or clear the bearer token (sign-in / sign-out).
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// Base URL without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET {base}/{path}`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.request(Method::GET, path)?;
        self.send(request).await
    }

    /// `POST {base}/{path}` with a JSON body.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path)?.json(body);
        self.send(request).await
    }

    /// `PATCH {base}/{path}` with a JSON body.
    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::PATCH, path)?.json(body);
        self.send(request).await
    }

    /// `DELETE {base}/{path}`.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.request(Method::DELETE, path)?;
        self.send(request).await
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let url = Url::parse(&url).map_err(|e| ApiError::InvalidUrl {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        let request = self.client.request(method, url);
        Ok(match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        })
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();

        // A received status is an HTTP failure even when the body is unreadable.
        if !status.is_success() {
            let body = match response.bytes().await {
                Ok(bytes) if !bytes.is_empty() => Some(ResponseBody::from_bytes(&bytes)),
                Ok(_) => None,
                Err(e) => {
                    tracing::debug!(error = %e, "failed to read error body");
                    None
                }
            };
            tracing::debug!(status = status.as_u16(), "request failed");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let data = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice::<Envelope>(&bytes)?.data
        };
        Ok(serde_json::from_value(data)?)
    }
}
