use anyhow::Context;
use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client, Method, Url};
use serde_json::{json, Value};

use crate::error::{ApiError, Result};
use crate::payload::{content_type, Payload};
use crate::{ApiUrl, JournalBackend};

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: ApiUrl,
}

impl ApiClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let base_url = ApiUrl::new(base_url);
        Url::parse(base_url.as_ref())
            .with_context(|| format!("Invalid API URL: {}", base_url))?;

        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &ApiUrl {
        &self.base_url
    }

    /// Issue a single call against the backend.
    ///
    /// Any non-success status becomes an [`ApiError`] carrying the status and
    /// the best message the body offers.
    pub async fn request(
        &self,
        path: &str,
        method: Method,
        body: Option<&Value>,
    ) -> Result<Payload> {
        let url = self.base_url.append_path(path);
        tracing::debug!(%method, path, "sending request");

        let mut request = self
            .client
            .request(method.clone(), url.as_ref())
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::debug!(%method, path, error = %e, "request failed");
            ApiError::transport(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let content_type = content_type(&response);
            // An unreadable error body still yields the templated message.
            let body = response.text().await.unwrap_or_default();
            let error = ApiError::from_parts(status, &content_type, &body);
            tracing::debug!(%method, path, %status, "backend returned error");
            return Err(error);
        }

        Payload::from_response(response).await
    }
}

#[async_trait]
impl JournalBackend for ApiClient {
    async fn get_streak(&self) -> Result<Payload> {
        self.request("/streak", Method::GET, None).await
    }

    async fn get_today_entry(&self) -> Result<Payload> {
        self.request("/entries/today", Method::GET, None).await
    }

    async fn submit_entry(&self, content: &str) -> Result<Payload> {
        let body = json!({ "content": content });
        self.request("/entries", Method::POST, Some(&body)).await
    }

    async fn list_entries(&self) -> Result<Payload> {
        self.request("/entries", Method::GET, None).await
    }

    async fn get_entry_by_id(&self, id: &str) -> Result<Payload> {
        let path = format!("/entries/{}", urlencoding::encode(id));
        self.request(&path, Method::GET, None).await
    }
}
