use thiserror::Error;

/// Dataset ingestion failed as a whole. Row-level problems never surface here; they are
/// dropped by the normalizer.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read dataset {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to fetch dataset {url}: {message}")]
    Fetch { url: String, message: String },
    #[error("dataset {0} has no header row")]
    MissingHeader(String),
}
