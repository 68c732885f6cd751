use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("regulation database not found: {}", .0.display())]
    SourceMissing(std::path::PathBuf),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
