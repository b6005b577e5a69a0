//! Clipsight Core Library
//!
//! Client-side functionality for the video analysis server: uploading videos
//! (by file or URL), listing them, triggering remote analysis, and turning
//! the freeform analysis response into time-stamped description lines.

pub mod client;
pub mod error;
pub mod extract;
pub mod format;
pub mod types;

// Re-export commonly used items at crate root
pub use client::{ApiClient, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use error::{ClipsightError, Result};
pub use extract::extract_analysis;
pub use format::{display_lines, format_segment_line, ABSENT_FIELD, PARSE_FAILURE_LINE};
pub use types::{
    AnalysisOutcome, AnalysisResponse, AnalysisResult, AnalysisSegment, FilesResponse,
    UploadReceipt,
};
