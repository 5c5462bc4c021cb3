pub mod blog_router;
pub mod category_router;
pub mod group_router;
pub mod upload_router;
pub mod user_router;
