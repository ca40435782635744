use crate::domain::catalog::BookCatalog;
use crate::domain::model::record::BookRecord;
use crate::domain::repository::RecordRepository;

use super::error::AppError;
use super::search::{self, SearchOutcome};

/// ローカル蔵書に対するユースケース。
/// 起動時に1回 load し、以降は in-memory を正とする（追加時は全体を書き戻す）。
pub struct LibraryService<R: RecordRepository> {
    repo: R,
    books: Vec<BookRecord>,
}

impl<R: RecordRepository> LibraryService<R> {
    /// 保存先から蔵書を読み込んで開く。壊れたファイルはエラーとして返す。
    pub fn open(repo: R) -> Result<Self, AppError> {
        let books = repo.load().map_err(|e| AppError::Storage(Box::new(e)))?;
        tracing::info!(count = books.len(), "library loaded");
        Ok(Self { repo, books })
    }

    pub fn books(&self) -> &[BookRecord] {
        &self.books
    }

    /// 末尾に追加して即座に永続化する。入力検証は呼び出し側の責務。
    pub fn add_book(
        &mut self,
        title: &str,
        author: &str,
        year: &str,
    ) -> Result<&BookRecord, AppError> {
        self.add_record(BookRecord::new(title, author, year))
    }

    /// 構築済みの BookRecord を追加する。
    pub fn add_record(&mut self, record: BookRecord) -> Result<&BookRecord, AppError> {
        self.books.push(record);
        if let Err(e) = self.persist() {
            // ディスクと不整合にならないよう巻き戻す
            self.books.pop();
            return Err(e);
        }
        tracing::info!(count = self.books.len(), "book added");
        Ok(&self.books[self.books.len() - 1])
    }

    pub fn search_local(&self, keyword: &str) -> Vec<BookRecord> {
        search::search_local(&self.books, keyword)
    }

    /// ローカル結果 + リモート結果（最大3件）を連結して返す。
    pub async fn search<C: BookCatalog>(&self, catalog: &C, keyword: &str) -> SearchOutcome {
        let local = self.search_local(keyword);
        let remote = search::search_remote(catalog, keyword).await;
        search::aggregate(local, remote)
    }

    // --- private ---

    fn persist(&self) -> Result<(), AppError> {
        self.repo
            .save(&self.books)
            .map_err(|e| AppError::Storage(Box::new(e)))
    }
}
