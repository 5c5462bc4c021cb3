use axum::{extract::{Path, State}, response::IntoResponse};
use std::sync::Arc;
use tracing::info;

use crate::dto::category_dto::{CreateCategoryRequest, UpdateCategoryRequest};
use crate::handler::request::RequestContext;
use crate::service::category_service::{CategoryService, CategoryServiceImpl};
use crate::util::envelope::ApiResponse;
use crate::util::error::HandlerError;

pub async fn create_category_handler(
    State(service): State<Arc<CategoryServiceImpl>>,
    context: RequestContext,
) -> Result<impl IntoResponse, HandlerError> {
    info!("[create_category_handler] Handler called");
    let request = context.parse::<CreateCategoryRequest>()?;
    let category = service
        .create_category(request)
        .await
        .map_err(|e| HandlerError::from_service(e, "Error creating category"))?;
    Ok(ApiResponse::created("Category created successfully", category))
}

pub async fn list_categories_handler(
    State(service): State<Arc<CategoryServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let categories = service
        .list_categories()
        .await
        .map_err(|e| HandlerError::from_service(e, "Error fetching categories"))?;
    Ok(ApiResponse::ok("Categories fetched successfully", categories))
}

pub async fn get_category_handler(
    State(service): State<Arc<CategoryServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let category = service
        .get_category(&id)
        .await
        .map_err(|e| HandlerError::from_service(e, "Error fetching category"))?;
    Ok(ApiResponse::ok("Category fetched successfully", category))
}

pub async fn update_category_handler(
    State(service): State<Arc<CategoryServiceImpl>>,
    Path(id): Path<String>,
    context: RequestContext,
) -> Result<impl IntoResponse, HandlerError> {
    info!("[update_category_handler] Updating category {}", id);
    let request = context.parse::<UpdateCategoryRequest>()?;
    let category = service
        .update_category(&id, request)
        .await
        .map_err(|e| HandlerError::from_service(e, "Error updating category"))?;
    Ok(ApiResponse::ok("Category updated successfully", category))
}

pub async fn delete_category_handler(
    State(service): State<Arc<CategoryServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    info!("[delete_category_handler] Deleting category {}", id);
    let category = service
        .delete_category(&id)
        .await
        .map_err(|e| HandlerError::from_service(e, "Error deleting category"))?;
    Ok(ApiResponse::ok("Category deleted successfully", category))
}
