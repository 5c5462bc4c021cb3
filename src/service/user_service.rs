use async_trait::async_trait;
use bson::Bson;
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::dto::user_dto::{CreateUserRequest, UpdateUserRequest, UserResponse, USER_REQUIRED_FIELDS};
use crate::model::user::User;
use crate::repository::repository_error::RepositoryError;
use crate::repository::Repository;
use crate::service::{discard_upload, record_not_found, resolve_image};
use crate::util::error::ServiceError;
use crate::util::object_id::parse_object_id;
use crate::util::storage::{FileStorage, UploadedFile};
use crate::util::validation::validate_request;

#[async_trait]
pub trait UserService: Send + Sync {
    async fn create_user(&self, request: CreateUserRequest, upload: Option<UploadedFile>) -> Result<UserResponse, ServiceError>;
    async fn list_users(&self) -> Result<Vec<UserResponse>, ServiceError>;
    async fn get_user(&self, id: &str) -> Result<UserResponse, ServiceError>;
    async fn update_user(&self, id: &str, request: UpdateUserRequest, upload: Option<UploadedFile>) -> Result<UserResponse, ServiceError>;
    async fn delete_user(&self, id: &str) -> Result<UserResponse, ServiceError>;
}

pub struct UserServiceImpl {
    pub user_repo: Arc<dyn Repository<User>>,
    pub storage: Arc<dyn FileStorage>,
}

impl UserServiceImpl {
    pub fn new(user_repo: Arc<dyn Repository<User>>, storage: Arc<dyn FileStorage>) -> Self {
        UserServiceImpl { user_repo, storage }
    }
}

fn duplicate_email() -> ServiceError {
    ServiceError::conflict("User with this email already exists", "Duplicate email")
}

fn map_write_error(err: RepositoryError) -> ServiceError {
    match err {
        RepositoryError::AlreadyExists(_) => duplicate_email(),
        other => ServiceError::from(other),
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    #[instrument(skip(self, request, upload))]
    async fn create_user(&self, request: CreateUserRequest, upload: Option<UploadedFile>) -> Result<UserResponse, ServiceError> {
        validate_request(&request, USER_REQUIRED_FIELDS)?;
        let CreateUserRequest { name: Some(name), email: Some(email), age: Some(age), phone: Some(phone), image, role } = request else {
            return Err(ServiceError::invalid_input("Missing required fields", USER_REQUIRED_FIELDS));
        };

        if self.user_repo.find_one_by("email", Bson::String(email.clone())).await?.is_some() {
            info!("Rejecting user with duplicate email");
            return Err(duplicate_email());
        }

        let resolved = resolve_image(self.storage.as_ref(), upload, image).await?;
        let user = User {
            id: None,
            name,
            email,
            age,
            phone,
            image: resolved.image.clone(),
            role: role.unwrap_or_default(),
        };

        match self.user_repo.insert(user).await {
            Ok(created) => {
                info!("User created");
                Ok(UserResponse::from(created))
            }
            Err(e) => {
                error!("Failed to create user: {e}");
                discard_upload(self.storage.as_ref(), &resolved).await;
                Err(map_write_error(e))
            }
        }
    }

    #[instrument(skip(self))]
    async fn list_users(&self) -> Result<Vec<UserResponse>, ServiceError> {
        let users = self.user_repo.find_all().await?;
        info!("Fetched {} users", users.len());
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    #[instrument(skip(self))]
    async fn get_user(&self, id: &str) -> Result<UserResponse, ServiceError> {
        let id = parse_object_id(id, "user")?;
        let user = self.user_repo.find_by_id(&id).await?.ok_or_else(|| record_not_found("user"))?;
        Ok(UserResponse::from(user))
    }

    #[instrument(skip(self, request, upload))]
    async fn update_user(&self, id: &str, request: UpdateUserRequest, upload: Option<UploadedFile>) -> Result<UserResponse, ServiceError> {
        let id = parse_object_id(id, "user")?;
        validate_request(&request, "")?;

        let mut changes = bson::to_document(&request).map_err(RepositoryError::from)?;
        let resolved = resolve_image(self.storage.as_ref(), upload, None).await?;
        if let Some(ref image) = resolved.image {
            changes.insert("image", image.clone());
        }

        match self.user_repo.update_by_id(&id, changes).await {
            Ok(Some(user)) => {
                info!("User updated");
                Ok(UserResponse::from(user))
            }
            Ok(None) => {
                discard_upload(self.storage.as_ref(), &resolved).await;
                Err(record_not_found("user"))
            }
            Err(e) => {
                error!("Failed to update user: {e}");
                discard_upload(self.storage.as_ref(), &resolved).await;
                Err(map_write_error(e))
            }
        }
    }

    #[instrument(skip(self))]
    async fn delete_user(&self, id: &str) -> Result<UserResponse, ServiceError> {
        let id = parse_object_id(id, "user")?;
        let user = self.user_repo.delete_by_id(&id).await?.ok_or_else(|| record_not_found("user"))?;
        info!("User deleted");
        Ok(UserResponse::from(user))
    }
}
