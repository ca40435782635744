use std::path::{Path, PathBuf};

use crate::domain::model::record::BookRecord;
use crate::domain::repository::RecordRepository;

#[derive(Debug, thiserror::Error)]
pub enum JsonStoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// JSONファイルによるRecordRepository実装。
/// 蔵書全体 = 1つのJSON配列。
pub struct JsonRecordRepository {
    path: PathBuf,
}

impl JsonRecordRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordRepository for JsonRecordRepository {
    type Error = JsonStoreError;

    fn load(&self) -> Result<Vec<BookRecord>, Self::Error> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no data file, starting empty");
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        let records: Vec<BookRecord> = serde_json::from_str(&content)?;
        Ok(records)
    }

    fn save(&self, records: &[BookRecord]) -> Result<(), Self::Error> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(records)?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, &content)?;
        std::fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), count = records.len(), "data file written");
        Ok(())
    }
}
