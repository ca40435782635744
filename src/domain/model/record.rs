use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// 出版年が不明なリモート結果に入れるマーカー。
pub const MISSING_YEAR: &str = "N/A";

/// 蔵書1件。IDは持たず、重複も許容する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    pub title: String,
    pub author: String,
    pub year: String,
}

impl BookRecord {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        year: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year: year.into(),
        }
    }

    /// 入力境界での検証付きコンストラクタ。前後の空白は除去し、空欄は拒否する。
    pub fn from_input(title: &str, author: &str, year: &str) -> Result<Self, DomainError> {
        let title = required("title", title)?;
        let author = required("author", author)?;
        let year = required("year", year)?;
        Ok(Self::new(title, author, year))
    }

    /// title または author にキーワードを含むか（大文字小文字を区別しない）。
    /// `key` は小文字化済みであること。
    pub fn matches_folded(&self, key: &str) -> bool {
        contains_folded(&self.title, key) || contains_folded(&self.author, key)
    }
}

/// `key` は小文字化済みであること。
pub(crate) fn contains_folded(haystack: &str, key: &str) -> bool {
    haystack.to_lowercase().contains(key)
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::EmptyField(field));
    }
    Ok(trimmed)
}
