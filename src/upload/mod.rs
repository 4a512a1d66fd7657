pub mod imgbb;
pub mod parser;

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::future::join_all;
use serde::Serialize;

pub use imgbb::ImgbbClient;

/// A file received from the operator, not yet hosted anywhere.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

#[derive(Debug)]
pub enum UploadError {
    NotConfigured,
    Request(String),
    Status(u16),
    InvalidResponse(String),
}

impl std::fmt::Display for UploadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadError::NotConfigured => write!(f, "Image uploads are not configured"),
            UploadError::Request(msg) => write!(f, "Upload request failed: {msg}"),
            UploadError::Status(code) => write!(f, "Image host responded with status {code}"),
            UploadError::InvalidResponse(msg) => write!(f, "Unexpected image host response: {msg}"),
        }
    }
}

impl std::error::Error for UploadError {}

/// Remote image hosting: turns a file into a public URL.
#[async_trait]
pub trait ImageHost: Send + Sync {
    async fn upload(&self, file: UploadFile) -> Result<String, UploadError>;
}

/// Result of one file in a batch.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UploadOutcome {
    pub file_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UploadOutcome {
    pub fn is_success(&self) -> bool {
        self.url.is_some()
    }
}

/// Upload every file concurrently. Each file succeeds or fails on its own;
/// outcomes come back in the order the files were given.
pub async fn upload_all(host: &dyn ImageHost, files: Vec<UploadFile>) -> Vec<UploadOutcome> {
    let uploads = files.into_iter().map(|file| async move {
        let file_name = file.file_name.clone();
        match host.upload(file).await {
            Ok(url) => {
                tracing::info!(file = %file_name, %url, "Image uploaded");
                UploadOutcome {
                    file_name,
                    url: Some(url),
                    error: None,
                }
            }
            Err(e) => {
                tracing::warn!(file = %file_name, "Image upload failed: {e}");
                UploadOutcome {
                    file_name,
                    url: None,
                    error: Some(e.to_string()),
                }
            }
        }
    });
    join_all(uploads).await
}
