//! REST client for the hosted pledge store.
//!
//! Talks the PostgREST dialect exposed under `/rest/v1/{table}`: inserts are
//! `POST` with `Prefer: return=representation`, selects are `GET` with the
//! query built by [`SelectQuery`].

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;

use crate::errors::{ApiErrorResponse, Result, StoreError};
use crate::query::SelectQuery;

/// Default timeout for API requests.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Request/response boundary of the remote store.
///
/// Rows travel as JSON objects; repositories decode them into their own types.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Inserts one row and returns it with the store-assigned columns filled in.
    async fn insert(&self, table: &str, record: Value) -> Result<Value>;

    async fn select(&self, table: &str, query: &SelectQuery) -> Result<Vec<Value>>;
}

/// Client for a PostgREST endpoint authenticated with a public API key.
#[derive(Debug, Clone)]
pub struct RestClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RestClient {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Project URL (e.g., "https://xyzcompany.supabase.co")
    /// * `api_key` - Anonymous public key, sent as both `apikey` and bearer token
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        Self::with_timeout(base_url, api_key, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        if base_url.trim().is_empty() {
            return Err(StoreError::config("Store URL is empty"));
        }
        if api_key.trim().is_empty() {
            return Err(StoreError::config("Store API key is empty"));
        }

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    /// Create headers for an API request.
    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let key_value = HeaderValue::from_str(&self.api_key)
            .map_err(|_| StoreError::config("Invalid API key format"))?;
        headers.insert("apikey", key_value);

        let auth_value = HeaderValue::from_str(&format!("Bearer {}", self.api_key))
            .map_err(|_| StoreError::config("Invalid API key format"))?;
        headers.insert(AUTHORIZATION, auth_value);

        Ok(headers)
    }

    /// Parse a JSON response body.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;
        debug!("Store response ({}): {} bytes", status, body.len());

        if !status.is_success() {
            if let Ok(error) = serde_json::from_str::<ApiErrorResponse>(&body) {
                return Err(StoreError::api(status.as_u16(), error.describe()));
            }
            return Err(StoreError::api(
                status.as_u16(),
                format!("Request failed: {}", body),
            ));
        }

        serde_json::from_str(&body).map_err(|e| {
            error!("Failed to deserialize store response: {}", e);
            StoreError::Json(e)
        })
    }
}

#[async_trait]
impl RemoteStore for RestClient {
    /// POST /rest/v1/{table}
    async fn insert(&self, table: &str, record: Value) -> Result<Value> {
        let url = self.table_url(table);
        debug!("Inserting into {}", table);

        let response = self
            .client
            .post(&url)
            .headers(self.headers()?)
            .header("Prefer", "return=representation")
            .json(&record)
            .send()
            .await?;

        let mut rows: Vec<Value> = Self::parse_response(response).await?;
        if rows.is_empty() {
            return Err(StoreError::UnexpectedResponse(format!(
                "insert into {} returned no rows",
                table
            )));
        }
        Ok(rows.swap_remove(0))
    }

    /// GET /rest/v1/{table}?select=...
    async fn select(&self, table: &str, query: &SelectQuery) -> Result<Vec<Value>> {
        let url = self.table_url(table);
        let pairs = query.to_query_pairs();
        debug!("Selecting from {}: {:?}", table, pairs);

        let response = self
            .client
            .get(&url)
            .headers(self.headers()?)
            .query(&pairs)
            .send()
            .await?;

        Self::parse_response(response).await
    }
}
