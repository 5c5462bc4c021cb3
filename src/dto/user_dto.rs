use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::model::user::{Role, User};
use crate::util::serde_ext::{lenient_u32, trimmed};

pub const USER_REQUIRED_FIELDS: &str = "name, email, age and phone are required";

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(required)]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(required, email)]
    pub email: Option<String>,

    #[serde(default, deserialize_with = "lenient_u32")]
    #[validate(required)]
    pub age: Option<u32>,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(required)]
    pub phone: Option<String>,

    /// Name of an already stored file; an uploaded file takes precedence.
    #[serde(default, deserialize_with = "trimmed")]
    pub image: Option<String>,

    #[serde(default)]
    pub role: Option<Role>,
}

/// Partial update; absent fields are left untouched. Serializes to the `$set` document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[serde(default, deserialize_with = "trimmed", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "trimmed", skip_serializing_if = "Option::is_none")]
    #[validate(email)]
    pub email: Option<String>,

    #[serde(default, deserialize_with = "lenient_u32", skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,

    #[serde(default, deserialize_with = "trimmed", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, deserialize_with = "trimmed", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub age: u32,
    pub phone: String,
    pub image: Option<String>,
    pub role: Role,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: user.name,
            email: user.email,
            age: user.age,
            phone: user.phone,
            image: user.image,
            role: user.role,
        }
    }
}
