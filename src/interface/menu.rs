//! Interactive text menu
//!
//! stdin/stdout <-> application::LibraryService / ReportExporter
//!
//! 3 choices: Add Book, Search & List Books, Exit

use std::ops::ControlFlow;
use std::path::PathBuf;

use anyhow::Context;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Lines};

use crate::application::report::ReportExporter;
use crate::application::search::SearchOutcome;
use crate::application::service::LibraryService;
use crate::config::LibraryConfig;
use crate::domain::catalog::BookCatalog;
use crate::domain::model::record::BookRecord;
use crate::domain::repository::RecordRepository;
use crate::infra::json_store::JsonRecordRepository;
use crate::infra::open_library::OpenLibraryCatalog;

const MENU: &str = "\n--- Mini Library Manager ---\n1. Add Book\n2. Search & List Books\n3. Exit\n";

// =============================================================================
// Public entry point
// =============================================================================

/// 蔵書を読み込んでメニューを起動する。データファイルが壊れていれば起動失敗。
pub async fn run(config: LibraryConfig) -> anyhow::Result<()> {
    let repo = JsonRecordRepository::new(&config.data_path);
    let data_path = repo.path().to_path_buf();
    let service = LibraryService::open(repo)
        .with_context(|| format!("failed to load library from {}", data_path.display()))?;
    let catalog = OpenLibraryCatalog::new(config.endpoint.clone(), config.timeout)
        .context("failed to build HTTP client")?;
    tracing::info!(
        data = %data_path.display(),
        endpoint = catalog.endpoint(),
        report = %config.report_path.display(),
        "library ready"
    );

    let mut menu = Menu::new(service, catalog, config.report_path);
    let input = BufReader::new(tokio::io::stdin());
    let mut output = tokio::io::stdout();
    menu.run(input, &mut output).await
}

// =============================================================================
// Menu
// =============================================================================

pub struct Menu<R: RecordRepository, C: BookCatalog> {
    service: LibraryService<R>,
    catalog: C,
    report_path: PathBuf,
}

impl<R: RecordRepository, C: BookCatalog> Menu<R, C> {
    pub fn new(service: LibraryService<R>, catalog: C, report_path: PathBuf) -> Self {
        Self {
            service,
            catalog,
            report_path,
        }
    }

    pub fn service(&self) -> &LibraryService<R> {
        &self.service
    }

    /// 入力が尽きるか Exit が選ばれるまでループする。
    pub async fn run<I, O>(&mut self, input: I, output: &mut O) -> anyhow::Result<()>
    where
        I: AsyncBufRead + Unpin,
        O: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        loop {
            say(output, MENU).await?;
            let Some(choice) = prompt(&mut lines, output, "Enter choice: ").await? else {
                break;
            };

            let flow = match choice.as_str() {
                "1" => self.add_book(&mut lines, output).await?,
                "2" => self.search_and_list(&mut lines, output).await?,
                "3" => {
                    say(output, "Thank You!\n").await?;
                    ControlFlow::Break(())
                }
                _ => {
                    say(output, "Invalid choice.\n").await?;
                    ControlFlow::Continue(())
                }
            };
            if flow.is_break() {
                break;
            }
        }
        Ok(())
    }

    async fn add_book<I, O>(
        &mut self,
        lines: &mut Lines<I>,
        output: &mut O,
    ) -> anyhow::Result<ControlFlow<()>>
    where
        I: AsyncBufRead + Unpin,
        O: AsyncWrite + Unpin,
    {
        let Some(title) = prompt(lines, output, "Enter book title: ").await? else {
            return Ok(ControlFlow::Break(()));
        };
        let Some(author) = prompt(lines, output, "Enter author name: ").await? else {
            return Ok(ControlFlow::Break(()));
        };
        let Some(year) = prompt(lines, output, "Enter published year: ").await? else {
            return Ok(ControlFlow::Break(()));
        };

        let record = match BookRecord::from_input(&title, &author, &year) {
            Ok(record) => record,
            Err(e) => {
                tracing::debug!(error = %e, "rejected add input");
                say(output, "Invalid input.\n").await?;
                return Ok(ControlFlow::Continue(()));
            }
        };

        match self.service.add_record(record) {
            Ok(_) => say(output, "Book added successfully!\n").await?,
            Err(e) => {
                tracing::error!(error = %e, "failed to persist book");
                say(output, &format!("Failed to save book: {e}\n")).await?;
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    async fn search_and_list<I, O>(
        &mut self,
        lines: &mut Lines<I>,
        output: &mut O,
    ) -> anyhow::Result<ControlFlow<()>>
    where
        I: AsyncBufRead + Unpin,
        O: AsyncWrite + Unpin,
    {
        let Some(keyword) = prompt(lines, output, "Enter book title or author: ").await? else {
            return Ok(ControlFlow::Break(()));
        };

        let records = match self.service.search(&self.catalog, &keyword).await {
            SearchOutcome::NoResults => {
                say(output, "\nNo books found.\n").await?;
                return Ok(ControlFlow::Continue(()));
            }
            SearchOutcome::Found(records) => records,
        };

        say(output, &format_listing(&records)).await?;

        match ReportExporter::export(&records, &self.report_path) {
            Ok(path) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                say(output, &format!("\nCSV report generated: {name}\n")).await?;
            }
            Err(e) => {
                tracing::error!(error = %e, path = %self.report_path.display(), "report export failed");
                say(output, &format!("\nFailed to write CSV report: {e}\n")).await?;
            }
        }
        Ok(ControlFlow::Continue(()))
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// 番号付き一覧: `N. title | author | year`
fn format_listing(records: &[BookRecord]) -> String {
    let mut buf = String::from("\n--- Books ---\n");
    for (i, r) in records.iter().enumerate() {
        buf.push_str(&format!("{}. {} | {} | {}\n", i + 1, r.title, r.author, r.year));
    }
    buf
}

async fn say<O: AsyncWrite + Unpin>(output: &mut O, text: &str) -> std::io::Result<()> {
    output.write_all(text.as_bytes()).await?;
    output.flush().await
}

/// プロンプトを出して1行読む（trim済み）。入力終端なら None。
async fn prompt<I, O>(
    lines: &mut Lines<I>,
    output: &mut O,
    label: &str,
) -> std::io::Result<Option<String>>
where
    I: AsyncBufRead + Unpin,
    O: AsyncWrite + Unpin,
{
    say(output, label).await?;
    Ok(lines.next_line().await?.map(|l| l.trim().to_string()))
}
