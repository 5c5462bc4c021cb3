pub mod blog;
pub mod category;
pub mod group;
pub mod status;
pub mod user;

use bson::oid::ObjectId;
use serde::{de::DeserializeOwned, Serialize};

/// A document stored in its own collection.
pub trait Record: Serialize + DeserializeOwned + Clone + Unpin + Send + Sync + 'static {
    const COLLECTION: &'static str;
    /// Fields backed by a unique index.
    const UNIQUE_FIELDS: &'static [&'static str] = &[];

    fn id(&self) -> Option<ObjectId>;
    fn set_id(&mut self, id: ObjectId);
}

/// Current time in the format stored in `createdAt` / `updatedAt`.
pub fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
