use crate::domain::error::DomainError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("report I/O error: {0}")]
    ReportIo(#[source] std::io::Error),

    #[error("report encoding error: {0}")]
    ReportCsv(#[from] csv::Error),
}
