//! Open Library search API client.

use std::time::Duration;

use serde::Deserialize;

use crate::domain::catalog::{BookCatalog, CatalogEntry};

/// 既定の検索エンドポイント
pub const DEFAULT_ENDPOINT: &str = "https://openlibrary.org/search.json";

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status: {0}")]
    Status(reqwest::StatusCode),
}

/// 書誌はドキュメント単位でデコードする（1件の不正で全体を失わない）
#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    docs: Vec<serde_json::Value>,
}

impl SearchResponse {
    fn into_entries(self) -> Vec<CatalogEntry> {
        self.docs
            .into_iter()
            .filter_map(|doc| match serde_json::from_value::<CatalogEntry>(doc) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::debug!(error = %e, "skipping undecodable document");
                    None
                }
            })
            .collect()
    }
}

/// `GET <endpoint>?q=<keyword>` で書誌を検索するクライアント。
#[derive(Debug, Clone)]
pub struct OpenLibraryCatalog {
    client: reqwest::Client,
    endpoint: String,
}

impl OpenLibraryCatalog {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl BookCatalog for OpenLibraryCatalog {
    type Error = CatalogError;

    async fn lookup(&self, keyword: &str) -> Result<Vec<CatalogEntry>, Self::Error> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", keyword)])
            .send()
            .await?;

        // 200 以外はすべて失敗扱い
        if response.status() != reqwest::StatusCode::OK {
            return Err(CatalogError::Status(response.status()));
        }

        let body: SearchResponse = response.json().await?;
        Ok(body.into_entries())
    }
}
