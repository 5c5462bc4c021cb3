use async_trait::async_trait;
use bson::{oid::ObjectId, Bson, Document};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

use crate::config::policy_conf::PolicyConfig;
use crate::dto::group_dto::{
    CreateGroupRequest, ExpandedGroupResponse, GroupResponse, UpdateGroupRequest, GROUP_REQUIRED_FIELDS,
};
use crate::model::{group::Group, timestamp, user::User};
use crate::repository::repository_error::RepositoryError;
use crate::repository::Repository;
use crate::service::{discard_upload, record_not_found, resolve_image};
use crate::util::error::ServiceError;
use crate::util::object_id::{parse_object_id, parse_reference};
use crate::util::storage::{FileStorage, UploadedFile};
use crate::util::validation::validate_request;

#[async_trait]
pub trait GroupService: Send + Sync {
    async fn create_group(&self, request: CreateGroupRequest, upload: Option<UploadedFile>) -> Result<GroupResponse, ServiceError>;
    async fn list_groups(&self) -> Result<Vec<ExpandedGroupResponse>, ServiceError>;
    async fn get_group(&self, id: &str) -> Result<ExpandedGroupResponse, ServiceError>;
    async fn update_group(&self, id: &str, request: UpdateGroupRequest, upload: Option<UploadedFile>) -> Result<GroupResponse, ServiceError>;
    async fn delete_group(&self, id: &str) -> Result<GroupResponse, ServiceError>;
}

pub struct GroupServiceImpl {
    pub group_repo: Arc<dyn Repository<Group>>,
    pub user_repo: Arc<dyn Repository<User>>,
    pub storage: Arc<dyn FileStorage>,
    pub policy: PolicyConfig,
}

impl GroupServiceImpl {
    pub fn new(
        group_repo: Arc<dyn Repository<Group>>,
        user_repo: Arc<dyn Repository<User>>,
        storage: Arc<dyn FileStorage>,
        policy: PolicyConfig,
    ) -> Self {
        GroupServiceImpl { group_repo, user_repo, storage, policy }
    }

    /// Existence checks for the referenced users. A no-op unless the
    /// `verify_group_members` policy is on.
    async fn verify_references(&self, admin_id: Option<&ObjectId>, member_ids: &[ObjectId]) -> Result<(), ServiceError> {
        if !self.policy.verify_group_members {
            return Ok(());
        }

        if let Some(admin_id) = admin_id {
            if self.user_repo.find_by_id(admin_id).await?.is_none() {
                info!(%admin_id, "Rejecting group with unknown admin");
                return Err(ServiceError::not_found("Admin user not found", format!("No user with ID {}", admin_id)));
            }
        }

        if !member_ids.is_empty() {
            let found: HashSet<ObjectId> = self
                .user_repo
                .find_by_ids(member_ids)
                .await?
                .into_iter()
                .filter_map(|u| u.id)
                .collect();
            let missing: Vec<String> = member_ids
                .iter()
                .filter(|id| !found.contains(id))
                .map(|id| id.to_hex())
                .collect();
            if !missing.is_empty() {
                info!("Rejecting group with {} unknown members", missing.len());
                return Err(ServiceError::not_found("Member user not found", serde_json::json!({ "missing": missing })));
            }
        }

        Ok(())
    }

    /// Resolve admins and members of all groups with a single user lookup.
    async fn expand(&self, groups: Vec<Group>) -> Result<Vec<ExpandedGroupResponse>, ServiceError> {
        let mut ids: Vec<ObjectId> = groups
            .iter()
            .flat_map(|g| std::iter::once(g.admin_id).chain(g.member_id.iter().copied()))
            .collect();
        ids.sort();
        ids.dedup();
        debug!("Expanding {} groups over {} user references", groups.len(), ids.len());

        let users: HashMap<ObjectId, User> = self
            .user_repo
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .filter_map(|u| u.id.map(|id| (id, u)))
            .collect();

        Ok(groups
            .into_iter()
            .map(|group| {
                let admin = users.get(&group.admin_id).cloned();
                let members = group.member_id.iter().filter_map(|id| users.get(id).cloned()).collect();
                ExpandedGroupResponse::expanded(group, admin, members)
            })
            .collect())
    }
}

fn parse_members(member_ids: Option<Vec<String>>) -> Result<Vec<ObjectId>, ServiceError> {
    member_ids
        .unwrap_or_default()
        .iter()
        .map(|id| parse_reference(id, "memberId", "member"))
        .collect()
}

#[async_trait]
impl GroupService for GroupServiceImpl {
    #[instrument(skip(self, request, upload))]
    async fn create_group(&self, request: CreateGroupRequest, upload: Option<UploadedFile>) -> Result<GroupResponse, ServiceError> {
        validate_request(&request, GROUP_REQUIRED_FIELDS)?;
        let CreateGroupRequest {
            name: Some(name),
            description: Some(description),
            image,
            admin_id: Some(admin_id),
            member_id,
            status,
        } = request
        else {
            return Err(ServiceError::invalid_input("Missing required fields", GROUP_REQUIRED_FIELDS));
        };

        let admin_id = parse_reference(&admin_id, "adminId", "admin")?;
        let member_id = parse_members(member_id)?;
        self.verify_references(Some(&admin_id), &member_id).await?;

        let resolved = resolve_image(self.storage.as_ref(), upload, image).await?;
        let group = Group {
            id: None,
            name,
            description,
            image: resolved.image.clone(),
            admin_id,
            member_id,
            status: status.unwrap_or_default(),
            created_at: Some(timestamp()),
        };

        match self.group_repo.insert(group).await {
            Ok(created) => {
                info!("Group created");
                Ok(GroupResponse::from(created))
            }
            Err(e) => {
                error!("Failed to create group: {e}");
                discard_upload(self.storage.as_ref(), &resolved).await;
                Err(ServiceError::from(e))
            }
        }
    }

    #[instrument(skip(self))]
    async fn list_groups(&self) -> Result<Vec<ExpandedGroupResponse>, ServiceError> {
        let groups = self.group_repo.find_all().await?;
        info!("Fetched {} groups", groups.len());
        self.expand(groups).await
    }

    #[instrument(skip(self))]
    async fn get_group(&self, id: &str) -> Result<ExpandedGroupResponse, ServiceError> {
        let id = parse_object_id(id, "group")?;
        let group = self.group_repo.find_by_id(&id).await?.ok_or_else(|| record_not_found("group"))?;
        let mut expanded = self.expand(vec![group]).await?;
        expanded.pop().ok_or_else(|| record_not_found("group"))
    }

    #[instrument(skip(self, request, upload))]
    async fn update_group(&self, id: &str, request: UpdateGroupRequest, upload: Option<UploadedFile>) -> Result<GroupResponse, ServiceError> {
        let id = parse_object_id(id, "group")?;

        let mut changes = Document::new();
        if let Some(name) = request.name {
            changes.insert("name", name);
        }
        if let Some(description) = request.description {
            changes.insert("description", description);
        }
        if let Some(status) = request.status {
            changes.insert("status", bson::to_bson(&status).map_err(RepositoryError::from)?);
        }

        let admin_id = request
            .admin_id
            .as_deref()
            .map(|admin_id| parse_reference(admin_id, "adminId", "admin"))
            .transpose()?;
        let member_id = request.member_id.map(|ids| parse_members(Some(ids))).transpose()?;
        self.verify_references(admin_id.as_ref(), member_id.as_deref().unwrap_or_default()).await?;

        if let Some(admin_id) = admin_id {
            changes.insert("adminId", admin_id);
        }
        if let Some(member_id) = member_id {
            changes.insert("memberId", member_id.into_iter().map(Bson::ObjectId).collect::<Vec<_>>());
        }

        let resolved = resolve_image(self.storage.as_ref(), upload, request.image).await?;
        if let Some(ref image) = resolved.image {
            changes.insert("image", image.clone());
        }

        match self.group_repo.update_by_id(&id, changes).await {
            Ok(Some(group)) => {
                info!("Group updated");
                Ok(GroupResponse::from(group))
            }
            Ok(None) => {
                discard_upload(self.storage.as_ref(), &resolved).await;
                Err(record_not_found("group"))
            }
            Err(e) => {
                error!("Failed to update group: {e}");
                discard_upload(self.storage.as_ref(), &resolved).await;
                Err(ServiceError::from(e))
            }
        }
    }

    #[instrument(skip(self))]
    async fn delete_group(&self, id: &str) -> Result<GroupResponse, ServiceError> {
        let id = parse_object_id(id, "group")?;
        let group = self.group_repo.delete_by_id(&id).await?.ok_or_else(|| record_not_found("group"))?;
        info!("Group deleted");
        Ok(GroupResponse::from(group))
    }
}
