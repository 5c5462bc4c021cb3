use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::model::{status::Status, Record};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    /// Weak reference to a user.
    pub admin_id: ObjectId,
    /// Weak references to users.
    #[serde(default)]
    pub member_id: Vec<ObjectId>,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Record for Group {
    const COLLECTION: &'static str = "groups";

    fn id(&self) -> Option<ObjectId> {
        self.id
    }

    fn set_id(&mut self, id: ObjectId) {
        self.id = Some(id);
    }
}
