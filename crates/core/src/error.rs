use jarslim_api::{ApiError, ResolutionError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlimError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Project artifact not found: {}", .0.display())]
    MissingArtifact(PathBuf),
    #[error("Dependency graph error: {0}")]
    Graph(String),
    #[error("Dependency resolution failed: {0}")]
    Resolution(#[from] ResolutionError),
    #[error("Could not delete original artifact {}: {source}", .path.display())]
    DeleteOriginal {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(
        "Could not rename processed artifact {} to {}: {source}. The original archive was already \
         deleted; the slimmed archive remains at the temporary path",
        .temp.display(),
        .path.display()
    )]
    RenameProcessed {
        temp: PathBuf,
        path: PathBuf,
        source: std::io::Error,
    },
}

impl From<ApiError> for SlimError {
    fn from(err: ApiError) -> Self {
        SlimError::Configuration(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SlimError>;
