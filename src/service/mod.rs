pub mod blog_service;
pub mod category_service;
pub mod group_service;
pub mod user_service;

use tracing::{info, warn};

use crate::util::error::ServiceError;
use crate::util::storage::{FileStorage, UploadedFile};

/// Standard 404 for a record addressed by path id.
pub(crate) fn record_not_found(entity: &str) -> ServiceError {
    let mut title = entity.to_string();
    if let Some(first) = title.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    ServiceError::not_found(format!("{} not found", title), format!("No {} with given ID", entity))
}

/// The image reference to persist, and the name of the file stored for this
/// request (if any) so it can be discarded when the write fails.
pub(crate) struct ResolvedImage {
    pub image: Option<String>,
    pub stored: Option<String>,
}

/// An uploaded file wins over a textual `image` field.
pub(crate) async fn resolve_image(
    storage: &dyn FileStorage,
    upload: Option<UploadedFile>,
    image_field: Option<String>,
) -> Result<ResolvedImage, ServiceError> {
    match upload {
        Some(file) => {
            let name = storage.store(&file).await?;
            info!("Stored uploaded image {} as {}", file.filename, name);
            Ok(ResolvedImage { image: Some(name.clone()), stored: Some(name) })
        }
        None => Ok(ResolvedImage { image: image_field, stored: None }),
    }
}

pub(crate) async fn discard_upload(storage: &dyn FileStorage, resolved: &ResolvedImage) {
    if let Some(ref name) = resolved.stored {
        if let Err(e) = storage.remove(name).await {
            warn!("Failed to remove orphaned upload {}: {}", name, e);
        }
    }
}
