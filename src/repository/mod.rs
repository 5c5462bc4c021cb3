pub mod mongo_repo;
pub mod repository_error;

#[cfg(any(test, feature = "test-support"))]
pub mod memory_repo;

use async_trait::async_trait;
use bson::{oid::ObjectId, Bson, Document};

use crate::model::Record;
use crate::repository::repository_error::RepositoryResult;

/// Per-collection CRUD primitives. One instance per entity type.
#[async_trait]
pub trait Repository<T: Record>: Send + Sync {
    /// Insert a record, assigning a fresh id when it has none.
    async fn insert(&self, record: T) -> RepositoryResult<T>;
    async fn find_all(&self) -> RepositoryResult<Vec<T>>;
    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<T>>;
    /// Records whose id is in `ids`, in no particular order. Unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[ObjectId]) -> RepositoryResult<Vec<T>>;
    async fn find_one_by(&self, field: &str, value: Bson) -> RepositoryResult<Option<T>>;
    /// Merge `changes` into the stored record (`$set`) and return the result.
    /// `Ok(None)` when no record has this id.
    async fn update_by_id(&self, id: &ObjectId, changes: Document) -> RepositoryResult<Option<T>>;
    /// Remove and return the record, `Ok(None)` when it does not exist.
    async fn delete_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<T>>;
}
