use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use bytes::Bytes;
use serde::Serialize;

use crate::auth::extractor::AdminSession;
use crate::error::AppError;
use crate::middleware::audit;
use crate::state::SharedState;
use crate::upload::{self, parser, UploadOutcome};

#[derive(Serialize)]
pub struct UploadResponse {
    pub files: Vec<UploadOutcome>,
}

/// Host every file of a multipart body. Files are independent: the response
/// lists a URL or an error per file, and is only a failure status when no
/// file made it.
pub async fn upload(
    _session: AdminSession,
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<UploadResponse>), AppError> {
    let files = parser::parse_files(&headers, body)
        .await
        .map_err(AppError::BadRequest)?;
    if files.is_empty() {
        return Err(AppError::BadRequest("No files provided".to_string()));
    }

    let outcomes = upload::upload_all(state.images.as_ref(), files).await;
    let uploaded = outcomes.iter().filter(|o| o.is_success()).count();

    audit::log_event(
        "images.uploaded",
        None,
        Some(serde_json::json!({ "uploaded": uploaded, "failed": outcomes.len() - uploaded })),
    );

    let status = if uploaded == 0 {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::OK
    };
    Ok((status, Json(UploadResponse { files: outcomes })))
}
