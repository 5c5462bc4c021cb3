use axum::{extract::{Path, State}, response::IntoResponse};
use std::sync::Arc;
use tracing::info;

use crate::dto::user_dto::{CreateUserRequest, UpdateUserRequest};
use crate::handler::request::RequestContext;
use crate::service::user_service::{UserService, UserServiceImpl};
use crate::util::envelope::ApiResponse;
use crate::util::error::HandlerError;

pub async fn create_user_handler(
    State(service): State<Arc<UserServiceImpl>>,
    context: RequestContext,
) -> Result<impl IntoResponse, HandlerError> {
    info!("[create_user_handler] Handler called");
    let (request, upload) = context.into_parts::<CreateUserRequest>()?;
    let user = service
        .create_user(request, upload)
        .await
        .map_err(|e| HandlerError::from_service(e, "Error creating user"))?;
    Ok(ApiResponse::created("User created successfully", user))
}

pub async fn list_users_handler(
    State(service): State<Arc<UserServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let users = service
        .list_users()
        .await
        .map_err(|e| HandlerError::from_service(e, "Error fetching users"))?;
    Ok(ApiResponse::ok("Users fetched successfully", users))
}

pub async fn get_user_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let user = service
        .get_user(&id)
        .await
        .map_err(|e| HandlerError::from_service(e, "Error fetching user"))?;
    Ok(ApiResponse::ok("User fetched successfully", user))
}

pub async fn update_user_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Path(id): Path<String>,
    context: RequestContext,
) -> Result<impl IntoResponse, HandlerError> {
    info!("[update_user_handler] Updating user {}", id);
    let (request, upload) = context.into_parts::<UpdateUserRequest>()?;
    let user = service
        .update_user(&id, request, upload)
        .await
        .map_err(|e| HandlerError::from_service(e, "Error updating user"))?;
    Ok(ApiResponse::ok("User updated successfully", user))
}

pub async fn delete_user_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    info!("[delete_user_handler] Deleting user {}", id);
    let user = service
        .delete_user(&id)
        .await
        .map_err(|e| HandlerError::from_service(e, "Error deleting user"))?;
    Ok(ApiResponse::ok("User deleted successfully", user))
}
