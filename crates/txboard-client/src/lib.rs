//! HTTP client for the remote transactions API
//!
//! Endpoints:
//! - `GET  {base}/api/transactions?page=P&limit=L`
//! - `POST {base}/api/transactions/search?page=P&limit=L` with `{"query": ...}`
//!
//! Both answer with a `PaginatedResponse`.

pub mod error;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use txboard_config::ApiConfig;
use txboard_core::{CoreResult, PaginatedResponse, SearchQuery, TransactionSource};

pub use error::{ClientError, ClientResult};

#[derive(Debug, Serialize)]
struct SearchBody<'a> {
    query: &'a str,
}

/// Client for the transactions API
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client with the given request timeout and user agent
    pub fn new(base_url: &str, timeout: Duration, user_agent: &str) -> ClientResult<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::InvalidBaseUrl { url: base_url });
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &ApiConfig) -> ClientResult<Self> {
        Self::new(
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
            &config.user_agent,
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetch one page of all transactions
    pub async fn fetch_page(&self, page: u32, limit: u32) -> ClientResult<PaginatedResponse> {
        let url = self.endpoint("/api/transactions");
        log::debug!(target: "txboard::fetch", "GET {} page={} limit={}", url, page, limit);

        let response = self
            .client
            .get(&url)
            .query(&[("page", page), ("limit", limit)])
            .send()
            .await?;

        Self::decode(response, &url).await
    }

    /// Fetch one page of transactions matching `query`
    pub async fn search_page(&self, query: &str, page: u32, limit: u32) -> ClientResult<PaginatedResponse> {
        let url = self.endpoint("/api/transactions/search");
        log::debug!(target: "txboard::fetch", "POST {} page={} limit={} query={:?}", url, page, limit, query);

        let response = self
            .client
            .post(&url)
            .query(&[("page", page), ("limit", limit)])
            .json(&SearchBody { query })
            .send()
            .await?;

        Self::decode(response, &url).await
    }

    async fn decode(response: reqwest::Response, url: &str) -> ClientResult<PaginatedResponse> {
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ClientError::Decode {
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl TransactionSource for ApiClient {
    async fn list(&self, page: u32, limit: u32) -> CoreResult<PaginatedResponse> {
        Ok(self.fetch_page(page, limit).await?)
    }

    async fn search(&self, query: &SearchQuery, page: u32, limit: u32) -> CoreResult<PaginatedResponse> {
        Ok(self.search_page(query.as_str(), page, limit).await?)
    }
}

// ==================== Tests ====================
