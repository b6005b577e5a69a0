use std::path::Path;

use reqwest::multipart;
use tokio::fs;

use crate::{
    error::{ClipsightError, Result},
    types::{AnalysisResponse, FilesResponse, UploadReceipt},
};

/// The analysis server's default origin.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Environment variable overriding the server origin.
pub const BASE_URL_ENV: &str = "CLIPSIGHT_API_URL";

/// Thin client for the video upload and analysis server.
///
/// Every method is a single request/response exchange; there are no retries
/// and a failure is terminal for that one call.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Build a client from `CLIPSIGHT_API_URL`, falling back to the default
    /// local origin.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Upload a local video file as multipart form field `video`.
    pub async fn upload_file(&self, path: &Path) -> Result<UploadReceipt> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| ClipsightError::UploadFailed {
                path: path.to_path_buf(),
                reason: "path has no file name".to_string(),
            })?;

        let bytes = fs::read(path).await?;
        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(video_mime(path))?;
        let form = multipart::Form::new().part("video", part);

        let response = self
            .http
            .post(self.endpoint("/video/upload"))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClipsightError::UploadFailed {
                path: path.to_path_buf(),
                reason: format!("{}: {}", status, body_or_unknown(response).await),
            });
        }

        Ok(response.json::<UploadReceipt>().await?)
    }

    /// Ask the server to fetch and store a video from a remote URL.
    pub async fn upload_url(&self, video_url: &str) -> Result<UploadReceipt> {
        let response = self
            .http
            .post(self.endpoint("/video/upload-url"))
            .json(&serde_json::json!({ "url": video_url }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClipsightError::UrlUploadFailed {
                url: video_url.to_string(),
                reason: format!("{}: {}", status, body_or_unknown(response).await),
            });
        }

        Ok(response.json::<UploadReceipt>().await?)
    }

    /// List the videos stored on the server.
    ///
    /// A server-reported failure payload degrades to an empty list; the error
    /// text is only logged.
    pub async fn list_files(&self) -> Result<Vec<String>> {
        let listing: FilesResponse = self
            .http
            .get(self.endpoint("/video/files"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(err) = &listing.error {
            log::warn!("server failed to list videos: {err}");
        }

        Ok(listing.files)
    }

    /// Run the remote analysis for an uploaded video.
    ///
    /// The raw response is returned as-is; the server reports "video not
    /// found" style failures inside the payload, and presentation decides how
    /// to surface them.
    pub async fn analyze(&self, filename: &str) -> Result<AnalysisResponse> {
        let response = self
            .http
            .post(self.endpoint(&format!("/video/analyze/{filename}")))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClipsightError::AnalyzeFailed {
                filename: filename.to_string(),
                reason: format!("{}: {}", status, body_or_unknown(response).await),
            });
        }

        Ok(response.json::<AnalysisResponse>().await?)
    }

    /// Static URL the server serves the uploaded video from.
    pub fn playback_url(&self, filename: &str) -> String {
        self.endpoint(&format!("/uploads/{filename}"))
    }

    /// Download an uploaded video for local playback.
    pub async fn download(&self, filename: &str, dest: &Path) -> Result<()> {
        let response = self.http.get(self.playback_url(filename)).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClipsightError::FetchFailed {
                filename: filename.to_string(),
                reason: format!("{}: {}", status, body_or_unknown(response).await),
            });
        }

        let bytes = response.bytes().await?;
        fs::write(dest, &bytes).await?;
        Ok(())
    }
}

async fn body_or_unknown(response: reqwest::Response) -> String {
    response
        .text()
        .await
        .unwrap_or_else(|_| "unknown error".to_string())
}

fn video_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mkv" => "video/x-matroska",
        "mov" => "video/quicktime",
        "avi" => "video/x-msvideo",
        _ => "application/octet-stream",
    }
}
