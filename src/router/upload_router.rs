use axum::{Router, routing::get};
use crate::handler::upload_handler::get_upload_handler;
use crate::handler::fallback_handler::method_not_allowed_handler;
use std::sync::Arc;
use crate::util::storage::FileStorage;

/// Static access to stored uploads, mounted at `/uploads`.
pub fn upload_router(storage: Arc<dyn FileStorage>) -> Router {
    Router::new()
        .route("/{name}", get(get_upload_handler))
        .method_not_allowed_fallback(method_not_allowed_handler)
        .with_state(storage)
}
