//! Shared test harness for integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use mini_library::application::service::LibraryService;
use mini_library::domain::catalog::{BookCatalog, CatalogEntry};
use mini_library::domain::model::record::BookRecord;
use mini_library::domain::repository::RecordRepository;

// =============================================================================
// InMemoryRepo — テスト用リポジトリ
// =============================================================================

#[derive(Debug, thiserror::Error)]
#[error("in-memory store error")]
pub struct InMemoryError;

/// ファイルI/O不要のインメモリリポジトリ。保存はJSON文字列で保持する。
pub struct InMemoryRepo {
    store: RefCell<Option<String>>,
    fail_saves: Cell<bool>,
}

impl InMemoryRepo {
    pub fn new() -> Self {
        Self {
            store: RefCell::new(None),
            fail_saves: Cell::new(false),
        }
    }

    pub fn with_records(records: &[BookRecord]) -> Self {
        let repo = Self::new();
        repo.save(records).unwrap();
        repo
    }

    /// 以降の save を失敗させる。
    pub fn fail_saves(self) -> Self {
        self.fail_saves.set(true);
        self
    }
}

impl RecordRepository for InMemoryRepo {
    type Error = InMemoryError;

    fn load(&self) -> Result<Vec<BookRecord>, Self::Error> {
        match self.store.borrow().as_deref() {
            Some(json) => Ok(serde_json::from_str(json).unwrap()),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, records: &[BookRecord]) -> Result<(), Self::Error> {
        if self.fail_saves.get() {
            return Err(InMemoryError);
        }
        let json = serde_json::to_string(records).unwrap();
        *self.store.borrow_mut() = Some(json);
        Ok(())
    }
}

// =============================================================================
// FakeCatalog — 固定応答のリモートカタログ
// =============================================================================

#[derive(Debug, thiserror::Error)]
#[error("catalog unreachable")]
pub struct Unreachable;

/// 固定のエントリを返す（None なら失敗）。問い合わせ回数を記録する。
pub struct FakeCatalog {
    entries: Option<Vec<CatalogEntry>>,
    calls: Cell<usize>,
}

impl FakeCatalog {
    pub fn returning(entries: Vec<CatalogEntry>) -> Self {
        Self {
            entries: Some(entries),
            calls: Cell::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            entries: None,
            calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl BookCatalog for FakeCatalog {
    type Error = Unreachable;

    async fn lookup(&self, _keyword: &str) -> Result<Vec<CatalogEntry>, Self::Error> {
        self.calls.set(self.calls.get() + 1);
        self.entries.clone().ok_or(Unreachable)
    }
}

pub fn entry(title: &str, authors: &[&str], year: Option<i64>) -> CatalogEntry {
    CatalogEntry {
        title: Some(title.to_string()),
        authors: authors.iter().map(|a| a.to_string()).collect(),
        first_publish_year: year,
    }
}

// =============================================================================
// Library fixtures
// =============================================================================

pub fn dune() -> BookRecord {
    BookRecord::new("Dune", "Frank Herbert", "1965")
}

/// 標準的なテスト用蔵書:
/// ```text
/// Dune | Frank Herbert | 1965
/// Emma | Jane Austen | 1815
/// Children of Dune | Frank Herbert | 1976
/// ```
pub fn standard_books() -> Vec<BookRecord> {
    vec![
        dune(),
        BookRecord::new("Emma", "Jane Austen", "1815"),
        BookRecord::new("Children of Dune", "Frank Herbert", "1976"),
    ]
}

pub fn service_with(records: &[BookRecord]) -> LibraryService<InMemoryRepo> {
    LibraryService::open(InMemoryRepo::with_records(records)).unwrap()
}

// =============================================================================
// One-shot HTTP server
// =============================================================================

/// 1接続だけ受け付けて `response` をそのまま返すローカルサーバ。
/// 戻り値: (エンドポイントURL, 受信したリクエスト先頭行)
pub async fn serve_once(response: String) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 8192];
        let n = socket.read(&mut buf).await.unwrap_or(0);
        let head = String::from_utf8_lossy(&buf[..n]);
        let request_line = head.lines().next().unwrap_or_default().to_string();
        let _ = tx.send(request_line);
        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;
    });

    (format!("http://{addr}/search.json"), rx)
}

/// 接続は受け付けるが応答しないサーバ（タイムアウト検証用）。
pub async fn serve_silence() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(std::time::Duration::from_secs(30)).await;
        drop(socket);
    });

    format!("http://{addr}/search.json")
}

pub fn http_response(status: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
}

// =============================================================================
// Assertion helpers
// =============================================================================

/// 結果がErrで、メッセージに指定文字列を含むことをassert。
pub fn assert_error_contains<T: std::fmt::Debug>(
    result: Result<T, impl std::fmt::Display>,
    expected: &str,
) {
    match result {
        Err(e) => {
            let msg = e.to_string();
            assert!(
                msg.contains(expected),
                "Expected error containing '{expected}', got: '{msg}'"
            );
        }
        Ok(v) => panic!("Expected error containing '{expected}', got Ok({v:?})"),
    }
}
