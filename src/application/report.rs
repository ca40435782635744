use std::path::{Path, PathBuf};

use crate::domain::model::record::BookRecord;

use super::error::AppError;

/// レポートのヘッダ行
pub const REPORT_HEADERS: [&str; 3] = ["title", "author", "year"];

/// 実行ファイルと同じディレクトリに置くレポートのファイル名
pub const REPORT_FILENAME: &str = "books_report.csv";

/// 検索結果 → CSVレポートへの変換
pub struct ReportExporter;

impl ReportExporter {
    /// 検索結果をCSV文字列に変換する。
    pub fn render_csv(records: &[BookRecord]) -> Result<String, AppError> {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer.write_record(REPORT_HEADERS)?;
        for record in records {
            writer.write_record([&record.title, &record.author, &record.year])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| AppError::ReportIo(e.into_error()))?;
        String::from_utf8(bytes).map_err(|e| {
            AppError::ReportIo(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })
    }

    /// CSVを書き出す。既存ファイルは無条件に上書きする。
    pub fn export(records: &[BookRecord], path: &Path) -> Result<PathBuf, AppError> {
        let content = Self::render_csv(records)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(AppError::ReportIo)?;
        }
        std::fs::write(path, content).map_err(AppError::ReportIo)?;
        tracing::info!(path = %path.display(), rows = records.len(), "report written");
        Ok(path.to_path_buf())
    }
}
