use axum::{extract::{Path, State}, response::IntoResponse};
use std::sync::Arc;
use tracing::info;

use crate::dto::group_dto::{CreateGroupRequest, UpdateGroupRequest};
use crate::handler::request::RequestContext;
use crate::service::group_service::{GroupService, GroupServiceImpl};
use crate::util::envelope::ApiResponse;
use crate::util::error::HandlerError;

pub async fn create_group_handler(
    State(service): State<Arc<GroupServiceImpl>>,
    context: RequestContext,
) -> Result<impl IntoResponse, HandlerError> {
    info!("[create_group_handler] Handler called");
    let (request, upload) = context.into_parts::<CreateGroupRequest>()?;
    let group = service
        .create_group(request, upload)
        .await
        .map_err(|e| HandlerError::from_service(e, "Error creating group"))?;
    Ok(ApiResponse::created("Group created successfully", group))
}

pub async fn list_groups_handler(
    State(service): State<Arc<GroupServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let groups = service
        .list_groups()
        .await
        .map_err(|e| HandlerError::from_service(e, "Error fetching groups"))?;
    Ok(ApiResponse::ok("Groups fetched successfully", groups))
}

pub async fn get_group_handler(
    State(service): State<Arc<GroupServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let group = service
        .get_group(&id)
        .await
        .map_err(|e| HandlerError::from_service(e, "Error fetching group"))?;
    Ok(ApiResponse::ok("Group fetched successfully", group))
}

pub async fn update_group_handler(
    State(service): State<Arc<GroupServiceImpl>>,
    Path(id): Path<String>,
    context: RequestContext,
) -> Result<impl IntoResponse, HandlerError> {
    info!("[update_group_handler] Updating group {}", id);
    let (request, upload) = context.into_parts::<UpdateGroupRequest>()?;
    let group = service
        .update_group(&id, request, upload)
        .await
        .map_err(|e| HandlerError::from_service(e, "Error updating group"))?;
    Ok(ApiResponse::ok("Group updated successfully", group))
}

pub async fn delete_group_handler(
    State(service): State<Arc<GroupServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    info!("[delete_group_handler] Deleting group {}", id);
    let group = service
        .delete_group(&id)
        .await
        .map_err(|e| HandlerError::from_service(e, "Error deleting group"))?;
    Ok(ApiResponse::ok("Group deleted successfully", group))
}
