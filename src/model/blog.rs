use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::model::Record;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    /// Weak reference to a category; checked only when the blog is created.
    pub category_id: ObjectId,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Record for Blog {
    const COLLECTION: &'static str = "blogs";

    fn id(&self) -> Option<ObjectId> {
        self.id
    }

    fn set_id(&mut self, id: ObjectId) {
        self.id = Some(id);
    }
}
