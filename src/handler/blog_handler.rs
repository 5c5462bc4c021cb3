use axum::{extract::{Path, State}, response::IntoResponse};
use std::sync::Arc;
use tracing::info;

use crate::dto::blog_dto::{CreateBlogRequest, UpdateBlogRequest};
use crate::handler::request::RequestContext;
use crate::service::blog_service::{BlogService, BlogServiceImpl};
use crate::util::envelope::ApiResponse;
use crate::util::error::HandlerError;

pub async fn create_blog_handler(
    State(service): State<Arc<BlogServiceImpl>>,
    context: RequestContext,
) -> Result<impl IntoResponse, HandlerError> {
    info!("[create_blog_handler] Handler called");
    let (request, upload) = context.into_parts::<CreateBlogRequest>()?;
    let blog = service
        .create_blog(request, upload)
        .await
        .map_err(|e| HandlerError::from_service(e, "Error creating blog"))?;
    Ok(ApiResponse::created("Blog created successfully", blog))
}

pub async fn list_blogs_handler(
    State(service): State<Arc<BlogServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let blogs = service
        .list_blogs()
        .await
        .map_err(|e| HandlerError::from_service(e, "Error fetching blogs"))?;
    Ok(ApiResponse::ok("Blogs fetched successfully", blogs))
}

pub async fn get_blog_handler(
    State(service): State<Arc<BlogServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let blog = service
        .get_blog(&id)
        .await
        .map_err(|e| HandlerError::from_service(e, "Error fetching blog"))?;
    Ok(ApiResponse::ok("Blog fetched successfully", blog))
}

pub async fn update_blog_handler(
    State(service): State<Arc<BlogServiceImpl>>,
    Path(id): Path<String>,
    context: RequestContext,
) -> Result<impl IntoResponse, HandlerError> {
    info!("[update_blog_handler] Updating blog {}", id);
    let (request, upload) = context.into_parts::<UpdateBlogRequest>()?;
    let blog = service
        .update_blog(&id, request, upload)
        .await
        .map_err(|e| HandlerError::from_service(e, "Error updating blog"))?;
    Ok(ApiResponse::ok("Blog updated successfully", blog))
}

pub async fn delete_blog_handler(
    State(service): State<Arc<BlogServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    info!("[delete_blog_handler] Deleting blog {}", id);
    let blog = service
        .delete_blog(&id)
        .await
        .map_err(|e| HandlerError::from_service(e, "Error deleting blog"))?;
    Ok(ApiResponse::ok("Blog deleted successfully", blog))
}
