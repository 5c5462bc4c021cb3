use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Bson, Document};
use futures::stream::TryStreamExt;
use mongodb::{
    options::{ClientOptions, Credential, FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    Client, Collection, Database, IndexModel,
};
use tracing::{debug, error, info, instrument};

use crate::config::mongo_conf::MongoConfig;
use crate::model::Record;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use crate::repository::Repository;

/// Open the shared client and resolve the database handle.
pub async fn connect(config: &MongoConfig) -> Result<Database, mongodb::error::Error> {
    let mut client_options = ClientOptions::parse(&config.uri).await?;
    client_options.app_name = Some("AgoraBackend".to_string());
    client_options.max_pool_size = Some(config.pool_size);
    client_options.connect_timeout = Some(std::time::Duration::from_secs(config.connection_timeout_secs));

    if let (Some(ref username), Some(ref password)) = (&config.username, &config.password) {
        client_options.credential = Some(Credential::builder()
            .username(username.clone())
            .password(password.clone())
            .build());
    }

    let client = Client::with_options(client_options)?;
    let db = match config.database {
        Some(ref name) => client.database(name),
        None => client
            .default_database()
            .unwrap_or_else(|| client.database(MongoConfig::FALLBACK_DATABASE)),
    };

    db.run_command(doc! { "ping": 1 }, None).await?;
    info!("Connected to MongoDB database '{}'", db.name());
    Ok(db)
}

pub struct MongoRepository<T: Record> {
    collection: Collection<T>,
}

impl<T: Record> MongoRepository<T> {
    /// Bind to the record's collection and make sure its unique indexes exist.
    pub async fn new(db: &Database) -> RepositoryResult<Self> {
        let repo = MongoRepository {
            collection: db.collection::<T>(T::COLLECTION),
        };
        repo.ensure_indexes().await?;
        Ok(repo)
    }

    async fn ensure_indexes(&self) -> RepositoryResult<()> {
        for field in T::UNIQUE_FIELDS {
            let mut keys = Document::new();
            keys.insert(*field, 1);
            let index = IndexModel::builder()
                .keys(keys)
                .options(IndexOptions::builder().unique(true).build())
                .build();
            self.collection.create_index(index, None).await.map_err(|e| {
                error!("Failed to create unique index on {}.{}: {}", T::COLLECTION, field, e);
                RepositoryError::from(e)
            })?;
            debug!("Unique index ensured on {}.{}", T::COLLECTION, field);
        }
        Ok(())
    }
}

#[async_trait]
impl<T: Record> Repository<T> for MongoRepository<T> {
    #[instrument(skip(self, record), fields(collection = T::COLLECTION))]
    async fn insert(&self, mut record: T) -> RepositoryResult<T> {
        if record.id().is_none() {
            record.set_id(ObjectId::new());
        }
        self.collection.insert_one(&record, None).await.map_err(|e| {
            error!("Failed to insert into {}: {}", T::COLLECTION, e);
            RepositoryError::from(e)
        })?;
        info!("Inserted record into {}", T::COLLECTION);
        Ok(record)
    }

    #[instrument(skip(self), fields(collection = T::COLLECTION))]
    async fn find_all(&self) -> RepositoryResult<Vec<T>> {
        let cursor = self.collection.find(None, None).await?;
        let records: Vec<T> = cursor.try_collect().await?;
        debug!("Fetched {} records from {}", records.len(), T::COLLECTION);
        Ok(records)
    }

    #[instrument(skip(self), fields(collection = T::COLLECTION, id = %id))]
    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<T>> {
        let record = self.collection.find_one(doc! { "_id": id }, None).await?;
        Ok(record)
    }

    #[instrument(skip(self, ids), fields(collection = T::COLLECTION, count = ids.len()))]
    async fn find_by_ids(&self, ids: &[ObjectId]) -> RepositoryResult<Vec<T>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let filter = doc! { "_id": { "$in": ids.to_vec() } };
        let cursor = self.collection.find(filter, None).await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self, value), fields(collection = T::COLLECTION))]
    async fn find_one_by(&self, field: &str, value: Bson) -> RepositoryResult<Option<T>> {
        let mut filter = Document::new();
        filter.insert(field, value);
        Ok(self.collection.find_one(filter, None).await?)
    }

    #[instrument(skip(self, changes), fields(collection = T::COLLECTION, id = %id))]
    async fn update_by_id(&self, id: &ObjectId, changes: Document) -> RepositoryResult<Option<T>> {
        if changes.is_empty() {
            return self.find_by_id(id).await;
        }
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": changes }, options)
            .await
            .map_err(|e| {
                error!("Failed to update {} in {}: {}", id, T::COLLECTION, e);
                RepositoryError::from(e)
            })?;
        Ok(updated)
    }

    #[instrument(skip(self), fields(collection = T::COLLECTION, id = %id))]
    async fn delete_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<T>> {
        let deleted = self.collection.find_one_and_delete(doc! { "_id": id }, None).await?;
        Ok(deleted)
    }
}
