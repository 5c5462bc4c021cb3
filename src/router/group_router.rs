use axum::{Router, routing::get};
use crate::handler::group_handler::{
    create_group_handler,
    list_groups_handler,
    get_group_handler,
    update_group_handler,
    delete_group_handler,
};
use crate::handler::fallback_handler::method_not_allowed_handler;
use std::sync::Arc;
use crate::service::group_service::GroupServiceImpl;

pub fn group_router(service: Arc<GroupServiceImpl>) -> Router {
    Router::new()
        .route("/group", get(list_groups_handler).post(create_group_handler))
        .route(
            "/group/{id}",
            get(get_group_handler).put(update_group_handler).delete(delete_group_handler),
        )
        .method_not_allowed_fallback(method_not_allowed_handler)
        .with_state(service)
}
