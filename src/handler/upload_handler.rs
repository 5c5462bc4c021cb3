use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::{debug, error};

use crate::util::error::{HandlerError, HandlerErrorKind};
use crate::util::storage::{is_safe_file_name, FileStorage};

/// Serve a stored upload by name.
pub async fn get_upload_handler(
    State(storage): State<Arc<dyn FileStorage>>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    if !is_safe_file_name(&name) {
        debug!("[get_upload_handler] Rejecting file name {:?}", name);
        return Err(HandlerError::bad_request("Invalid file name", "File name must not contain path components"));
    }

    let file = storage
        .load(&name)
        .await
        .map_err(|e| {
            error!("[get_upload_handler] Failed to read upload {}: {}", name, e);
            HandlerError::new(HandlerErrorKind::Internal, "Error fetching file", e.to_string())
        })?
        .ok_or_else(|| HandlerError::not_found("File not found", format!("No file named {}", name)))?;

    Ok(([(header::CONTENT_TYPE, file.content_type)], file.content))
}
