use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::category_dto::CategoryResponse;
use crate::model::{blog::Blog, category::Category};
use crate::util::serde_ext::trimmed;

pub const BLOG_REQUIRED_FIELDS: &str = "Name, description, and categoryId are required";

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlogRequest {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(required)]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(required)]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "trimmed")]
    pub image: Option<String>,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(required)]
    pub category_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBlogRequest {
    #[serde(default, deserialize_with = "trimmed")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "trimmed")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "trimmed")]
    pub image: Option<String>,

    #[serde(default, deserialize_with = "trimmed")]
    pub category_id: Option<String>,
}

/// Blog as returned to clients. `C` is the id string, or the embedded
/// category when the reference is expanded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogResponse<C = String> {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    pub category_id: C,
    pub created_at: Option<String>,
}

pub type ExpandedBlogResponse = BlogResponse<Option<CategoryResponse>>;

impl From<Blog> for BlogResponse {
    fn from(blog: Blog) -> Self {
        let category_id = blog.category_id.to_hex();
        BlogResponse::with_category(blog, category_id)
    }
}

impl<C> BlogResponse<C> {
    fn with_category(blog: Blog, category_id: C) -> Self {
        BlogResponse {
            id: blog.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: blog.name,
            description: blog.description,
            image: blog.image,
            category_id,
            created_at: blog.created_at,
        }
    }
}

impl ExpandedBlogResponse {
    /// `category` is `None` when the referenced category no longer exists.
    pub fn expanded(blog: Blog, category: Option<Category>) -> Self {
        BlogResponse::with_category(blog, category.map(CategoryResponse::from))
    }
}
