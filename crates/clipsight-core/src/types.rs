use serde::{Deserialize, Serialize};

/// One time-bounded action detected by the analysis server.
///
/// Field presence is not guaranteed upstream; an absent field is rendered as
/// the literal token `undefined` when formatted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AnalysisSegment {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub description: Option<String>,
}

/// What the extractor made of an analysis description string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnalysisOutcome {
    /// The candidate text parsed as a JSON array of segment records.
    Segments(Vec<AnalysisSegment>),
    /// Valid JSON, but not an array; kept verbatim.
    OtherJson(String),
    /// Not valid JSON at all; kept verbatim.
    Unparsed(String),
}

/// Payload of `POST /video/analyze/{filename}`.
///
/// The server reports its own failures as `{"error": ...}` bodies with a 200
/// status, so every field defaults instead of failing deserialization.
#[derive(Debug, Default, Deserialize)]
pub struct AnalysisResponse {
    #[serde(default)]
    pub results: Vec<AnalysisResult>,
    #[serde(default)]
    pub error: Option<String>,
}

impl AnalysisResponse {
    /// Only `results[0].description` is consumed.
    pub fn primary_description(&self) -> Option<&str> {
        self.results.first().map(|r| r.description.as_str())
    }
}

#[derive(Debug, Deserialize)]
pub struct AnalysisResult {
    pub description: String,
}

/// Payload of `GET /video/files`.
#[derive(Debug, Default, Deserialize)]
pub struct FilesResponse {
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Payload of the two upload endpoints. Consumed opaquely (logged only).
#[derive(Debug, Default, Deserialize)]
pub struct UploadReceipt {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub video_path: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
