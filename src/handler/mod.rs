pub mod blog_handler;
pub mod category_handler;
pub mod fallback_handler;
pub mod group_handler;
pub mod request;
pub mod upload_handler;
pub mod user_handler;
