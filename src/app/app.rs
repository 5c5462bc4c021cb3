use axum::{extract::DefaultBodyLimit, routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use crate::config::{AppConfig, ConfigError, MongoConfig, PolicyConfig, UploadConfig};
use crate::model::{blog::Blog, category::Category, group::Group, user::User};
use crate::repository::mongo_repo::{connect, MongoRepository};
use crate::repository::repository_error::RepositoryError;
use crate::repository::Repository;
use crate::handler::fallback_handler::route_not_found_handler;
use crate::router::{
    blog_router::blog_router, category_router::category_router, group_router::group_router,
    upload_router::upload_router, user_router::user_router,
};
use crate::service::blog_service::BlogServiceImpl;
use crate::service::category_service::CategoryServiceImpl;
use crate::service::group_service::GroupServiceImpl;
use crate::service::user_service::UserServiceImpl;
use crate::util::storage::{FileStorage, LocalFileStorage, StorageError};

/// Room for the non-file multipart fields on top of the upload limit.
const BODY_LIMIT_SLACK: usize = 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Invalid listen address: {0}")]
    InvalidAddress(String),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// The record stores and file storage every service is built from.
pub struct Stores {
    pub users: Arc<dyn Repository<User>>,
    pub categories: Arc<dyn Repository<Category>>,
    pub groups: Arc<dyn Repository<Group>>,
    pub blogs: Arc<dyn Repository<Blog>>,
    pub storage: Arc<dyn FileStorage>,
}

pub struct Services {
    pub user_service: Arc<UserServiceImpl>,
    pub category_service: Arc<CategoryServiceImpl>,
    pub group_service: Arc<GroupServiceImpl>,
    pub blog_service: Arc<BlogServiceImpl>,
    pub storage: Arc<dyn FileStorage>,
}

impl Services {
    pub fn new(stores: Stores, policy: PolicyConfig) -> Self {
        let Stores { users, categories, groups, blogs, storage } = stores;
        Services {
            user_service: Arc::new(UserServiceImpl::new(users.clone(), storage.clone())),
            category_service: Arc::new(CategoryServiceImpl::new(categories.clone())),
            group_service: Arc::new(GroupServiceImpl::new(groups, users, storage.clone(), policy)),
            blog_service: Arc::new(BlogServiceImpl::new(blogs, categories, storage.clone())),
            storage,
        }
    }
}

/// Full HTTP surface: resources under `/api`, stored files under `/uploads`.
pub fn build_router(services: &Services, max_upload_bytes: usize) -> Router {
    let api = Router::new()
        .merge(user_router(services.user_service.clone()))
        .merge(category_router(services.category_service.clone()))
        .merge(group_router(services.group_service.clone()))
        .merge(blog_router(services.blog_service.clone()));

    Router::new()
        .nest("/api", api)
        .nest("/uploads", upload_router(services.storage.clone()))
        .route("/", get(|| async { "Welcome to the Agora API" }))
        .route("/health", get(|| async { "OK" }))
        .fallback(route_not_found_handler)
        .layer(DefaultBodyLimit::max(max_upload_bytes.saturating_add(BODY_LIMIT_SLACK)))
}

pub struct App {
    config: AppConfig,
    router: Router,
}

impl App {
    pub async fn new() -> Result<Self, AppError> {
        let config = AppConfig::from_env()?;
        let mongo_config = MongoConfig::from_env()?;
        let upload_config = UploadConfig::from_env()?;
        let policy = PolicyConfig::from_env()?;
        info!("Group reference verification: {}", policy.verify_group_members);

        let db = connect(&mongo_config).await?;
        let stores = Stores {
            users: Arc::new(MongoRepository::<User>::new(&db).await?),
            categories: Arc::new(MongoRepository::<Category>::new(&db).await?),
            groups: Arc::new(MongoRepository::<Group>::new(&db).await?),
            blogs: Arc::new(MongoRepository::<Blog>::new(&db).await?),
            storage: Arc::new(LocalFileStorage::new(&upload_config).await?),
        };

        let services = Services::new(stores, policy);
        let router = build_router(&services, upload_config.max_bytes);
        Ok(App { config, router })
    }

    pub async fn start(self) -> Result<(), AppError> {
        let host = self
            .config
            .host
            .parse()
            .map_err(|_| AppError::InvalidAddress(self.config.host.clone()))?;
        let addr = SocketAddr::new(host, self.config.port);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("🚀 Server running at http://{}", addr);
        axum::serve(listener, self.router).await?;
        Ok(())
    }
}
