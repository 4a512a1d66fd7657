use axum::http::HeaderMap;

use super::UploadFile;

/// Collect the file parts of a multipart body. Parts without a file name
/// (plain form fields) are skipped, as are empty files.
pub async fn parse_files(headers: &HeaderMap, body: bytes::Bytes) -> Result<Vec<UploadFile>, String> {
    let boundary = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .and_then(|ct| multer::parse_boundary(ct).ok())
        .ok_or_else(|| "Missing multipart boundary".to_string())?;

    let stream = futures_util::stream::once(async { Ok::<_, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut files = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Multipart error: {e}"))?
    {
        let Some(file_name) = field.file_name().map(str::to_owned) else {
            continue;
        };
        let content_type = field.content_type().map(|m| m.to_string());
        let data = field
            .bytes()
            .await
            .map_err(|e| format!("Field read error: {e}"))?;
        if data.is_empty() {
            continue;
        }
        files.push(UploadFile {
            file_name,
            content_type,
            data,
        });
    }

    Ok(files)
}
