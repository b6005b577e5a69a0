use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClipsightError {
    #[error("Upload failed for {path}: {reason}")]
    UploadFailed { path: PathBuf, reason: String },

    #[error("Upload failed for url {url}: {reason}")]
    UrlUploadFailed { url: String, reason: String },

    #[error("Analysis failed for {filename}: {reason}")]
    AnalyzeFailed { filename: String, reason: String },

    #[error("Download failed for {filename}: {reason}")]
    FetchFailed { filename: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, ClipsightError>;
