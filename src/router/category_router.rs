use axum::{Router, routing::get};
use crate::handler::category_handler::{
    create_category_handler,
    list_categories_handler,
    get_category_handler,
    update_category_handler,
    delete_category_handler,
};
use crate::handler::fallback_handler::method_not_allowed_handler;
use std::sync::Arc;
use crate::service::category_service::CategoryServiceImpl;

pub fn category_router(service: Arc<CategoryServiceImpl>) -> Router {
    Router::new()
        .route("/category", get(list_categories_handler).post(create_category_handler))
        .route(
            "/category/{id}",
            get(get_category_handler).put(update_category_handler).delete(delete_category_handler),
        )
        .method_not_allowed_fallback(method_not_allowed_handler)
        .with_state(service)
}
