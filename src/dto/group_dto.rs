use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::user_dto::UserResponse;
use crate::model::{group::Group, status::Status, user::User};
use crate::util::serde_ext::{one_or_many, trimmed};

pub const GROUP_REQUIRED_FIELDS: &str = "name, description and adminId are required";

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
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
    pub admin_id: Option<String>,

    #[serde(default, deserialize_with = "one_or_many")]
    pub member_id: Option<Vec<String>>,

    #[serde(default)]
    pub status: Option<Status>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGroupRequest {
    #[serde(default, deserialize_with = "trimmed")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "trimmed")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "trimmed")]
    pub image: Option<String>,

    #[serde(default, deserialize_with = "trimmed")]
    pub admin_id: Option<String>,

    #[serde(default, deserialize_with = "one_or_many")]
    pub member_id: Option<Vec<String>>,

    #[serde(default)]
    pub status: Option<Status>,
}

/// Group as returned to clients. `A`/`M` are id strings, or embedded users
/// when the references are expanded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupResponse<A = String, M = String> {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    pub admin_id: A,
    pub member_id: Vec<M>,
    pub status: Status,
    pub created_at: Option<String>,
}

pub type ExpandedGroupResponse = GroupResponse<Option<UserResponse>, UserResponse>;

impl From<Group> for GroupResponse {
    fn from(group: Group) -> Self {
        let admin_id = group.admin_id.to_hex();
        let member_id = group.member_id.iter().map(|id| id.to_hex()).collect();
        GroupResponse::with_refs(group, admin_id, member_id)
    }
}

impl<A, M> GroupResponse<A, M> {
    fn with_refs(group: Group, admin_id: A, member_id: Vec<M>) -> Self {
        GroupResponse {
            id: group.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: group.name,
            description: group.description,
            image: group.image,
            admin_id,
            member_id,
            status: group.status,
            created_at: group.created_at,
        }
    }
}

impl ExpandedGroupResponse {
    /// Dangling member ids are dropped; a dangling admin becomes `None`.
    pub fn expanded(group: Group, admin: Option<User>, members: Vec<User>) -> Self {
        GroupResponse::with_refs(
            group,
            admin.map(UserResponse::from),
            members.into_iter().map(UserResponse::from).collect(),
        )
    }
}
