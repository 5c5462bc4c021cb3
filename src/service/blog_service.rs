use async_trait::async_trait;
use bson::{oid::ObjectId, Document};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::dto::blog_dto::{
    BlogResponse, CreateBlogRequest, ExpandedBlogResponse, UpdateBlogRequest, BLOG_REQUIRED_FIELDS,
};
use crate::model::{blog::Blog, category::Category, timestamp};
use crate::repository::Repository;
use crate::service::{discard_upload, record_not_found, resolve_image};
use crate::util::error::ServiceError;
use crate::util::object_id::{parse_object_id, parse_reference};
use crate::util::storage::{FileStorage, UploadedFile};
use crate::util::validation::validate_request;

#[async_trait]
pub trait BlogService: Send + Sync {
    async fn create_blog(&self, request: CreateBlogRequest, upload: Option<UploadedFile>) -> Result<BlogResponse, ServiceError>;
    async fn list_blogs(&self) -> Result<Vec<ExpandedBlogResponse>, ServiceError>;
    async fn get_blog(&self, id: &str) -> Result<ExpandedBlogResponse, ServiceError>;
    async fn update_blog(&self, id: &str, request: UpdateBlogRequest, upload: Option<UploadedFile>) -> Result<BlogResponse, ServiceError>;
    async fn delete_blog(&self, id: &str) -> Result<BlogResponse, ServiceError>;
}

pub struct BlogServiceImpl {
    pub blog_repo: Arc<dyn Repository<Blog>>,
    pub category_repo: Arc<dyn Repository<Category>>,
    pub storage: Arc<dyn FileStorage>,
}

impl BlogServiceImpl {
    pub fn new(
        blog_repo: Arc<dyn Repository<Blog>>,
        category_repo: Arc<dyn Repository<Category>>,
        storage: Arc<dyn FileStorage>,
    ) -> Self {
        BlogServiceImpl { blog_repo, category_repo, storage }
    }

    /// Resolve every blog's category with a single lookup.
    async fn expand(&self, blogs: Vec<Blog>) -> Result<Vec<ExpandedBlogResponse>, ServiceError> {
        let mut ids: Vec<ObjectId> = blogs.iter().map(|b| b.category_id).collect();
        ids.sort();
        ids.dedup();

        let categories: HashMap<ObjectId, Category> = self
            .category_repo
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .filter_map(|c| c.id.map(|id| (id, c)))
            .collect();

        Ok(blogs
            .into_iter()
            .map(|blog| {
                let category = categories.get(&blog.category_id).cloned();
                ExpandedBlogResponse::expanded(blog, category)
            })
            .collect())
    }
}

#[async_trait]
impl BlogService for BlogServiceImpl {
    #[instrument(skip(self, request, upload))]
    async fn create_blog(&self, request: CreateBlogRequest, upload: Option<UploadedFile>) -> Result<BlogResponse, ServiceError> {
        validate_request(&request, BLOG_REQUIRED_FIELDS)?;
        let CreateBlogRequest { name: Some(name), description: Some(description), image, category_id: Some(category_id) } = request else {
            return Err(ServiceError::invalid_input("Missing required fields", BLOG_REQUIRED_FIELDS));
        };

        let category_id = parse_reference(&category_id, "categoryId", "category")?;
        if self.category_repo.find_by_id(&category_id).await?.is_none() {
            info!(%category_id, "Rejecting blog for unknown category");
            return Err(ServiceError::not_found("Category not found", "No category with provided ID"));
        }

        let resolved = resolve_image(self.storage.as_ref(), upload, image).await?;
        let blog = Blog {
            id: None,
            name,
            description,
            image: resolved.image.clone(),
            category_id,
            created_at: Some(timestamp()),
        };

        match self.blog_repo.insert(blog).await {
            Ok(created) => {
                info!("Blog created");
                Ok(BlogResponse::from(created))
            }
            Err(e) => {
                error!("Failed to create blog: {e}");
                discard_upload(self.storage.as_ref(), &resolved).await;
                Err(ServiceError::from(e))
            }
        }
    }

    #[instrument(skip(self))]
    async fn list_blogs(&self) -> Result<Vec<ExpandedBlogResponse>, ServiceError> {
        let blogs = self.blog_repo.find_all().await?;
        info!("Fetched {} blogs", blogs.len());
        self.expand(blogs).await
    }

    #[instrument(skip(self))]
    async fn get_blog(&self, id: &str) -> Result<ExpandedBlogResponse, ServiceError> {
        let id = parse_object_id(id, "blog")?;
        let blog = self.blog_repo.find_by_id(&id).await?.ok_or_else(|| record_not_found("blog"))?;
        let category = self.category_repo.find_by_id(&blog.category_id).await?;
        Ok(ExpandedBlogResponse::expanded(blog, category))
    }

    #[instrument(skip(self, request, upload))]
    async fn update_blog(&self, id: &str, request: UpdateBlogRequest, upload: Option<UploadedFile>) -> Result<BlogResponse, ServiceError> {
        let id = parse_object_id(id, "blog")?;

        let mut changes = Document::new();
        if let Some(name) = request.name {
            changes.insert("name", name);
        }
        if let Some(description) = request.description {
            changes.insert("description", description);
        }
        // Existence of the category is only checked on creation.
        if let Some(ref category_id) = request.category_id {
            changes.insert("categoryId", parse_reference(category_id, "categoryId", "category")?);
        }

        let resolved = resolve_image(self.storage.as_ref(), upload, request.image).await?;
        if let Some(ref image) = resolved.image {
            changes.insert("image", image.clone());
        }

        match self.blog_repo.update_by_id(&id, changes).await {
            Ok(Some(blog)) => {
                info!("Blog updated");
                Ok(BlogResponse::from(blog))
            }
            Ok(None) => {
                discard_upload(self.storage.as_ref(), &resolved).await;
                Err(record_not_found("blog"))
            }
            Err(e) => {
                error!("Failed to update blog: {e}");
                discard_upload(self.storage.as_ref(), &resolved).await;
                Err(ServiceError::from(e))
            }
        }
    }

    #[instrument(skip(self))]
    async fn delete_blog(&self, id: &str) -> Result<BlogResponse, ServiceError> {
        let id = parse_object_id(id, "blog")?;
        let blog = self.blog_repo.delete_by_id(&id).await?.ok_or_else(|| record_not_found("blog"))?;
        info!("Blog deleted");
        Ok(BlogResponse::from(blog))
    }
}
