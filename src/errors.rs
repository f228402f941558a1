use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {}: {source}", path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("expected a JSON object at the root of {}", .0.display())]
    NotAnObject(PathBuf),
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}
