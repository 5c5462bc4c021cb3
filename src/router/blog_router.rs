use axum::{Router, routing::get};
use crate::handler::blog_handler::{
    create_blog_handler,
    list_blogs_handler,
    get_blog_handler,
    update_blog_handler,
    delete_blog_handler,
};
use crate::handler::fallback_handler::method_not_allowed_handler;
use std::sync::Arc;
use crate::service::blog_service::BlogServiceImpl;

pub fn blog_router(service: Arc<BlogServiceImpl>) -> Router {
    Router::new()
        .route("/blog", get(list_blogs_handler).post(create_blog_handler))
        .route(
            "/blog/{id}",
            get(get_blog_handler).put(update_blog_handler).delete(delete_blog_handler),
        )
        .method_not_allowed_fallback(method_not_allowed_handler)
        .with_state(service)
}
