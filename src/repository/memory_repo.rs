//! In-memory store with the same unique-key behaviour as the Mongo collections.

use async_trait::async_trait;
use bson::{oid::ObjectId, Bson, Document};
use tokio::sync::RwLock;

use crate::model::Record;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use crate::repository::Repository;

pub struct MemoryRepository<T: Record> {
    records: RwLock<Vec<T>>,
}

impl<T: Record> MemoryRepository<T> {
    pub fn new() -> Self {
        MemoryRepository { records: RwLock::new(Vec::new()) }
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    fn check_unique(records: &[T], candidate: &Document, skip: Option<ObjectId>) -> RepositoryResult<()> {
        for field in T::UNIQUE_FIELDS {
            let Some(value) = candidate.get(*field) else { continue };
            for existing in records {
                if skip.is_some() && existing.id() == skip {
                    continue;
                }
                let doc = bson::to_document(existing)?;
                if doc.get(*field) == Some(value) {
                    return Err(RepositoryError::already_exists(format!(
                        "E11000 duplicate key error collection: {} index: {}_1 dup key: {{ {}: {} }}",
                        T::COLLECTION, field, field, value
                    )));
                }
            }
        }
        Ok(())
    }
}

impl<T: Record> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> Repository<T> for MemoryRepository<T> {
    async fn insert(&self, mut record: T) -> RepositoryResult<T> {
        if record.id().is_none() {
            record.set_id(ObjectId::new());
        }
        let mut records = self.records.write().await;
        let doc = bson::to_document(&record)?;
        Self::check_unique(&records, &doc, None)?;
        records.push(record.clone());
        Ok(record)
    }

    async fn find_all(&self) -> RepositoryResult<Vec<T>> {
        Ok(self.records.read().await.clone())
    }

    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<T>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id() == Some(*id)).cloned())
    }

    async fn find_by_ids(&self, ids: &[ObjectId]) -> RepositoryResult<Vec<T>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| r.id().map(|id| ids.contains(&id)).unwrap_or(false))
            .cloned()
            .collect())
    }

    async fn find_one_by(&self, field: &str, value: Bson) -> RepositoryResult<Option<T>> {
        let records = self.records.read().await;
        for record in records.iter() {
            if bson::to_document(record)?.get(field) == Some(&value) {
                return Ok(Some(record.clone()));
            }
        }
        Ok(None)
    }

    async fn update_by_id(&self, id: &ObjectId, changes: Document) -> RepositoryResult<Option<T>> {
        let mut records = self.records.write().await;
        let Some(index) = records.iter().position(|r| r.id() == Some(*id)) else {
            return Ok(None);
        };

        let mut doc = bson::to_document(&records[index])?;
        for (key, value) in changes {
            doc.insert(key, value);
        }
        Self::check_unique(&records, &doc, Some(*id))?;
        let updated: T = bson::from_document(doc)
            .map_err(|e| RepositoryError::validation(format!("Cast failed: {}", e)))?;
        records[index] = updated.clone();
        Ok(Some(updated))
    }

    async fn delete_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<T>> {
        let mut records = self.records.write().await;
        let Some(index) = records.iter().position(|r| r.id() == Some(*id)) else {
            return Ok(None);
        };
        Ok(Some(records.remove(index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::user::{Role, User};
    use bson::doc;

    fn user(email: &str) -> User {
        User {
            id: None,
            name: "Ada".to_string(),
            email: email.to_string(),
            age: 36,
            phone: "555-0100".to_string(),
            image: None,
            role: Role::User,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_id() {
        let repo = MemoryRepository::<User>::new();
        let created = repo.insert(user("ada@example.com")).await.unwrap();
        assert!(created.id.is_some());
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_unique_field_enforced() {
        let repo = MemoryRepository::<User>::new();
        repo.insert(user("ada@example.com")).await.unwrap();
        let err = repo.insert(user("ada@example.com")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let repo = MemoryRepository::<User>::new();
        let created = repo.insert(user("ada@example.com")).await.unwrap();
        let id = created.id.unwrap();

        let updated = repo
            .update_by_id(&id, doc! { "phone": "555-0199" })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.phone, "555-0199");
        assert_eq!(updated.email, "ada@example.com");
        assert_eq!(updated.age, 36);
    }

    #[tokio::test]
    async fn test_update_unique_conflict_and_self_update() {
        let repo = MemoryRepository::<User>::new();
        let first = repo.insert(user("a@example.com")).await.unwrap();
        repo.insert(user("b@example.com")).await.unwrap();
        let id = first.id.unwrap();

        assert!(repo.update_by_id(&id, doc! { "email": "a@example.com" }).await.is_ok());
        let err = repo.update_by_id(&id, doc! { "email": "b@example.com" }).await.unwrap_err();
        assert!(matches!(err, RepositoryError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let repo = MemoryRepository::<User>::new();
        let id = repo.insert(user("ada@example.com")).await.unwrap().id.unwrap();
        assert!(repo.delete_by_id(&id).await.unwrap().is_some());
        assert!(repo.delete_by_id(&id).await.unwrap().is_none());
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_find_helpers() {
        let repo = MemoryRepository::<User>::new();
        let a = repo.insert(user("a@example.com")).await.unwrap().id.unwrap();
        repo.insert(user("b@example.com")).await.unwrap();

        let found = repo.find_one_by("email", Bson::from("b@example.com")).await.unwrap();
        assert_eq!(found.unwrap().email, "b@example.com");
        assert!(repo.find_one_by("email", Bson::from("c@example.com")).await.unwrap().is_none());

        let many = repo.find_by_ids(&[a, ObjectId::new()]).await.unwrap();
        assert_eq!(many.len(), 1);
        assert_eq!(repo.find_all().await.unwrap().len(), 2);
    }
}
