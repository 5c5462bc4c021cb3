use async_trait::async_trait;
use bson::Document;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::dto::category_dto::{
    CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest, CATEGORY_REQUIRED_FIELDS,
};
use crate::model::{category::Category, timestamp};
use crate::repository::repository_error::RepositoryError;
use crate::repository::Repository;
use crate::service::record_not_found;
use crate::util::error::ServiceError;
use crate::util::object_id::parse_object_id;
use crate::util::slug::slugify;
use crate::util::validation::validate_request;

#[async_trait]
pub trait CategoryService: Send + Sync {
    async fn create_category(&self, request: CreateCategoryRequest) -> Result<CategoryResponse, ServiceError>;
    async fn list_categories(&self) -> Result<Vec<CategoryResponse>, ServiceError>;
    async fn get_category(&self, id: &str) -> Result<CategoryResponse, ServiceError>;
    async fn update_category(&self, id: &str, request: UpdateCategoryRequest) -> Result<CategoryResponse, ServiceError>;
    async fn delete_category(&self, id: &str) -> Result<CategoryResponse, ServiceError>;
}

pub struct CategoryServiceImpl {
    pub category_repo: Arc<dyn Repository<Category>>,
}

impl CategoryServiceImpl {
    pub fn new(category_repo: Arc<dyn Repository<Category>>) -> Self {
        CategoryServiceImpl { category_repo }
    }
}

/// Slug for a new or renamed category; names without any letter or digit are refused.
fn derive_slug(name: &str) -> Result<String, ServiceError> {
    let slug = slugify(name);
    if slug.is_empty() {
        return Err(ServiceError::invalid_input(
            "Invalid category name",
            "name must contain at least one letter or digit",
        ));
    }
    Ok(slug)
}

fn map_write_error(err: RepositoryError, name: Option<&str>) -> ServiceError {
    match err {
        RepositoryError::AlreadyExists(msg) => ServiceError::conflict(
            "Category already exists",
            name.map(|n| json!({ "name": n })).unwrap_or_else(|| json!(msg)),
        ),
        other => ServiceError::from(other),
    }
}

#[async_trait]
impl CategoryService for CategoryServiceImpl {
    #[instrument(skip(self, request))]
    async fn create_category(&self, request: CreateCategoryRequest) -> Result<CategoryResponse, ServiceError> {
        validate_request(&request, CATEGORY_REQUIRED_FIELDS)?;
        let CreateCategoryRequest { name: Some(name), description: Some(description), status } = request else {
            return Err(ServiceError::invalid_input("Missing required fields", CATEGORY_REQUIRED_FIELDS));
        };

        let slug = derive_slug(&name)?;
        let now = timestamp();
        let category = Category {
            id: None,
            name,
            description,
            slug,
            status: status.unwrap_or_default(),
            created_at: Some(now.clone()),
            updated_at: Some(now),
        };

        let name = category.name.clone();
        let created = self.category_repo.insert(category).await.map_err(|e| {
            error!("Failed to create category: {e}");
            map_write_error(e, Some(&name))
        })?;
        info!(slug = %created.slug, "Category created");
        Ok(CategoryResponse::from(created))
    }

    #[instrument(skip(self))]
    async fn list_categories(&self) -> Result<Vec<CategoryResponse>, ServiceError> {
        let categories = self.category_repo.find_all().await?;
        info!("Fetched {} categories", categories.len());
        Ok(categories.into_iter().map(CategoryResponse::from).collect())
    }

    #[instrument(skip(self))]
    async fn get_category(&self, id: &str) -> Result<CategoryResponse, ServiceError> {
        let id = parse_object_id(id, "category")?;
        let category = self
            .category_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| record_not_found("category"))?;
        Ok(CategoryResponse::from(category))
    }

    #[instrument(skip(self, request))]
    async fn update_category(&self, id: &str, request: UpdateCategoryRequest) -> Result<CategoryResponse, ServiceError> {
        let id = parse_object_id(id, "category")?;

        let mut changes = Document::new();
        if let Some(ref name) = request.name {
            changes.insert("name", name.clone());
            changes.insert("slug", derive_slug(name)?);
        }
        if let Some(description) = request.description {
            changes.insert("description", description);
        }
        if let Some(status) = request.status {
            changes.insert("status", bson::to_bson(&status).map_err(RepositoryError::from)?);
        }
        changes.insert("updatedAt", timestamp());

        let updated = self
            .category_repo
            .update_by_id(&id, changes)
            .await
            .map_err(|e| {
                error!("Failed to update category: {e}");
                map_write_error(e, request.name.as_deref())
            })?
            .ok_or_else(|| record_not_found("category"))?;
        info!(slug = %updated.slug, "Category updated");
        Ok(CategoryResponse::from(updated))
    }

    #[instrument(skip(self))]
    async fn delete_category(&self, id: &str) -> Result<CategoryResponse, ServiceError> {
        let id = parse_object_id(id, "category")?;
        let category = self
            .category_repo
            .delete_by_id(&id)
            .await?
            .ok_or_else(|| record_not_found("category"))?;
        info!("Category deleted");
        Ok(CategoryResponse::from(category))
    }
}
