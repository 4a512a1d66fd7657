use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::Value;

use super::{ImageHost, UploadError, UploadFile};

/// Client for the imgbb.com upload API.
pub struct ImgbbClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl ImgbbClient {
    pub fn new(endpoint: String, api_key: Option<String>) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {e}"))?;
        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }
}

#[async_trait]
impl ImageHost for ImgbbClient {
    async fn upload(&self, file: UploadFile) -> Result<String, UploadError> {
        let api_key = self.api_key.as_deref().ok_or(UploadError::NotConfigured)?;

        let mut part = Part::bytes(file.data.to_vec()).file_name(file.file_name);
        if let Some(content_type) = file.content_type.as_deref() {
            part = part
                .mime_str(content_type)
                .map_err(|e| UploadError::Request(format!("Invalid content type: {e}")))?;
        }
        let form = Form::new().part("image", part);

        let url = reqwest::Url::parse_with_params(&self.endpoint, &[("key", api_key)])
            .map_err(|e| UploadError::Request(format!("Invalid upload endpoint: {e}")))?;

        let resp = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| UploadError::Request(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(UploadError::Status(status.as_u16()));
        }

        let body: Value = resp
            .json()
            .await
            .map_err(|e| UploadError::InvalidResponse(e.to_string()))?;
        hosted_url(&body)
    }
}

/// imgbb answers `{"data": {"url": ..., "image": {"url": ...}}, "success": true}`.
fn hosted_url(body: &Value) -> Result<String, UploadError> {
    let data = &body["data"];
    data["url"]
        .as_str()
        .or_else(|| data["image"]["url"].as_str())
        .filter(|url| !url.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| UploadError::InvalidResponse("missing data.url".to_string()))
}
