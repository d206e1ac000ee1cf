use repositories::RepositoryError;
use services::SchemaFault;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {what}: {source}")]
    Json {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("input must be a JSON object, got {0}")]
    NotAnObject(&'static str),
    #[error("--instance is only supported for the blog schema")]
    InstanceUnsupported,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Fault(#[from] SchemaFault),
}
