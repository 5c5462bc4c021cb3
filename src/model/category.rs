use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::model::{status::Status, Record};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub description: String,
    /// Always `slugify(name)` as of the last write of `name`.
    pub slug: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Record for Category {
    const COLLECTION: &'static str = "categories";
    const UNIQUE_FIELDS: &'static [&'static str] = &["name"];

    fn id(&self) -> Option<ObjectId> {
        self.id
    }

    fn set_id(&mut self, id: ObjectId) {
        self.id = Some(id);
    }
}
