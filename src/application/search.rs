//! Local search, remote normalization and result aggregation.

use crate::domain::catalog::{BookCatalog, CatalogEntry};
use crate::domain::model::record::{contains_folded, BookRecord, MISSING_YEAR};

/// リモート結果の上限件数。
pub const REMOTE_RESULT_CAP: usize = 3;

/// リモート検索の結果。失敗は呼び出し側へ伝播せず `Unavailable` に畳む。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteOutcome {
    /// 問い合わせ成功（0件もありうる）
    Completed(Vec<BookRecord>),
    /// タイムアウト・接続失敗・非200・不正なボディ
    Unavailable,
}

impl RemoteOutcome {
    pub fn records(&self) -> &[BookRecord] {
        match self {
            Self::Completed(records) => records,
            Self::Unavailable => &[],
        }
    }

    pub fn into_records(self) -> Vec<BookRecord> {
        match self {
            Self::Completed(records) => records,
            Self::Unavailable => Vec::new(),
        }
    }
}

/// 検索結果。`NoResults` のときはレポートを書かない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(Vec<BookRecord>),
    NoResults,
}

impl SearchOutcome {
    pub fn records(&self) -> &[BookRecord] {
        match self {
            Self::Found(records) => records,
            Self::NoResults => &[],
        }
    }
}

/// title/author の部分一致（大文字小文字無視）。挿入順を保つ。
pub fn search_local(records: &[BookRecord], keyword: &str) -> Vec<BookRecord> {
    let key = keyword.to_lowercase();
    records
        .iter()
        .filter(|r| r.matches_folded(&key))
        .cloned()
        .collect()
}

/// リモートの書誌を BookRecord に正規化する。
///
/// サービス側の関連度判定は信用せず、キーワードで再フィルタする。
/// 先頭から走査し、`REMOTE_RESULT_CAP` 件集まった時点で打ち切る。
pub fn normalize_entries(entries: Vec<CatalogEntry>, keyword: &str) -> Vec<BookRecord> {
    let key = keyword.to_lowercase();
    entries
        .into_iter()
        .filter_map(|entry| normalize_entry(entry, &key))
        .take(REMOTE_RESULT_CAP)
        .collect()
}

fn normalize_entry(entry: CatalogEntry, key: &str) -> Option<BookRecord> {
    let title = entry.title.filter(|t| !t.is_empty())?;
    let first_author = entry.authors.first()?;

    let relevant =
        contains_folded(&title, key) || entry.authors.iter().any(|a| contains_folded(a, key));
    if !relevant {
        return None;
    }

    let year = entry
        .first_publish_year
        .map(|y| y.to_string())
        .unwrap_or_else(|| MISSING_YEAR.to_string());

    Some(BookRecord {
        title,
        author: first_author.clone(),
        year,
    })
}

/// リモートカタログに1回だけ問い合わせる。失敗は warn ログのみで握りつぶす。
pub async fn search_remote<C: BookCatalog>(catalog: &C, keyword: &str) -> RemoteOutcome {
    match catalog.lookup(keyword).await {
        Ok(entries) => {
            let scanned = entries.len();
            let records = normalize_entries(entries, keyword);
            tracing::debug!(keyword, scanned, matched = records.len(), "remote lookup completed");
            RemoteOutcome::Completed(records)
        }
        Err(e) => {
            tracing::warn!(keyword, error = %e, "remote lookup unavailable");
            RemoteOutcome::Unavailable
        }
    }
}

/// ローカル → リモートの順で連結する。重複排除はしない。
pub fn aggregate(local: Vec<BookRecord>, remote: RemoteOutcome) -> SearchOutcome {
    let mut results = local;
    results.extend(remote.into_records());
    if results.is_empty() {
        SearchOutcome::NoResults
    } else {
        SearchOutcome::Found(results)
    }
}
