//! Runtime configuration: file locations and remote lookup settings.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::application::report::REPORT_FILENAME;
use crate::infra::open_library::DEFAULT_ENDPOINT;

/// リモート検索の既定タイムアウト
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct LibraryConfig {
    /// 蔵書JSONの保存先
    pub data_path: PathBuf,
    /// CSVレポートの出力先（固定）
    pub report_path: PathBuf,
    pub endpoint: String,
    pub timeout: Duration,
}

impl LibraryConfig {
    /// `program_dir` を基準にした既定値。
    /// data: `<dir>/data/books.json`, report: `<dir>/books_report.csv`
    pub fn for_program_dir(program_dir: &Path) -> Self {
        Self {
            data_path: program_dir.join("data").join("books.json"),
            report_path: program_dir.join(REPORT_FILENAME),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// 実行ファイルの置き場所を基準にした既定値。
    pub fn resolve() -> std::io::Result<Self> {
        Ok(Self::for_program_dir(&program_dir()?))
    }
}

/// 実行ファイルのあるディレクトリ
pub fn program_dir() -> std::io::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    Ok(exe
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(".")))
}
