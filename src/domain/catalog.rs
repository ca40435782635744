//! Remote bibliographic lookup seam.

use serde::{Deserialize, Deserializer};

/// リモートサービスが返す書誌1件（正規化前）。
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CatalogEntry {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "author_name", deserialize_with = "null_as_empty")]
    pub authors: Vec<String>,
    #[serde(default)]
    pub first_publish_year: Option<i64>,
}

/// `null` は空リストとして扱う
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// キーワード検索を行うリモートカタログ。Infra層が実装する。
#[allow(async_fn_in_trait)]
pub trait BookCatalog {
    type Error: std::error::Error + Send + Sync + 'static;

    /// 1回だけ問い合わせる。リトライはしない。
    async fn lookup(&self, keyword: &str) -> Result<Vec<CatalogEntry>, Self::Error>;
}
