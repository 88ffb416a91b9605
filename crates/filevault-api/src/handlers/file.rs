//! File upload, listing, version history, and download handlers.

use axum::Json;
use axum::body::Body;
use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::Response;

use filevault_core::error::AppError;
use filevault_core::types::FileId;
use filevault_service::file::UploadFile;

use crate::dto::response::{ApiResponse, FileEnvelope, FilesEnvelope};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Name of the multipart field carrying the payload.
const FILE_FIELD: &str = "file";

/// POST /files/upload
pub async fn upload_file(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<FileEnvelope>>, ApiError> {
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::validation("File field has no file name"))?;
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::validation(format!("Failed to read upload: {e}")))?;

        upload = Some(UploadFile {
            name,
            content_type,
            data,
        });
        break;
    }

    let upload = upload.ok_or_else(|| AppError::validation("Missing 'file' field"))?;
    let file = state.upload_service.upload(&auth, upload).await?;

    Ok(Json(ApiResponse::ok(FileEnvelope { file })))
}

/// GET /files
pub async fn list_files(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Json<ApiResponse<FilesEnvelope>> {
    let files = state.file_service.list_my_files(&auth).await;
    Json(ApiResponse::ok(FilesEnvelope { files }))
}

/// GET /files/versions/{name}
pub async fn list_versions(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(name): Path<String>,
) -> Json<ApiResponse<FilesEnvelope>> {
    let files = state.file_service.list_versions(&auth, &name).await;
    Json(ApiResponse::ok(FilesEnvelope { files }))
}

/// GET /files/{id}/download
pub async fn download_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    // Unparseable ids cannot name a stored record.
    let id: FileId = id
        .parse()
        .map_err(|_| AppError::not_found("File not found"))?;

    let result = state.download_service.download(&auth, id).await?;

    let content_type = result
        .file
        .content_type
        .as_deref()
        .and_then(|ct| HeaderValue::from_str(ct).ok())
        .unwrap_or_else(|| HeaderValue::from_static("application/octet-stream"));

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition(&result.file.name),
        );
    if let Ok(len) = u64::try_from(result.file.size_bytes) {
        builder = builder.header(header::CONTENT_LENGTH, len);
    }

    let response = builder
        .body(Body::from_stream(result.stream))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))?;

    Ok(response)
}

/// `attachment` disposition with an ASCII fallback and an RFC 5987 encoded
/// name for clients that understand it.
fn content_disposition(name: &str) -> String {
    let fallback: String = name
        .chars()
        .map(|c| {
            if (c.is_ascii_graphic() && c != '"' && c != '\\') || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let mut encoded = String::with_capacity(name.len());
    for byte in name.bytes() {
        if byte.is_ascii_alphanumeric() || b"!#$&+-.^_`|~".contains(&byte) {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }

    format!("attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_name_is_kept() {
        assert_eq!(
            content_disposition("report.txt"),
            "attachment; filename=\"report.txt\"; filename*=UTF-8''report.txt"
        );
    }

    #[test]
    fn test_quotes_and_non_ascii_are_escaped() {
        let value = content_disposition("a\"b é.txt");
        assert!(value.starts_with("attachment; filename=\"a_b _.txt\""));
        assert!(value.ends_with("filename*=UTF-8''a%22b%20%C3%A9.txt"));
        assert!(HeaderValue::from_str(&value).is_ok());
    }
}
