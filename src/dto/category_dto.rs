use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::model::{category::Category, status::Status};
use crate::util::serde_ext::trimmed;

pub const CATEGORY_REQUIRED_FIELDS: &str = "name and description are required";

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(required)]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(required)]
    pub description: Option<String>,

    #[serde(default)]
    pub status: Option<Status>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCategoryRequest {
    #[serde(default, deserialize_with = "trimmed")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "trimmed")]
    pub description: Option<String>,

    #[serde(default)]
    pub status: Option<Status>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub description: String,
    pub slug: String,
    pub status: Status,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        CategoryResponse {
            id: category.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: category.name,
            description: category.description,
            slug: category.slug,
            status: category.status,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}
