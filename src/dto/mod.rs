pub mod blog_dto;
pub mod category_dto;
pub mod group_dto;
pub mod user_dto;
