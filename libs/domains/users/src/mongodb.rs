//! MongoDB implementation of UserRepository

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{self, Document, doc},
    options::IndexOptions,
};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{User, UserInput};
use crate::repository::UserRepository;

/// Default collection name
pub const USERS_COLLECTION: &str = "users";

/// MongoDB implementation of the UserRepository
///
/// Writes wait for the unique indexes to exist. Clones share that state, so
/// the indexes are created once per repository family and retried on the
/// next write after a failure.
#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<User>,
    indexes: Arc<OnceCell<()>>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, USERS_COLLECTION)
    }

    /// Create a new MongoUserRepository with a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<User>(collection_name);
        Self {
            collection,
            indexes: Arc::new(OnceCell::new()),
        }
    }

    /// [`init_indexes`](Self::init_indexes) at most once per repository; a
    /// failed attempt leaves nothing cached and runs again on the next call
    pub async fn ensure_indexes(&self) -> UserResult<()> {
        self.indexes.get_or_try_init(|| self.init_indexes()).await?;
        Ok(())
    }

    /// Create the unique indexes on `email` and `username`
    ///
    /// Idempotent: MongoDB accepts an identical index definition again.
    pub async fn init_indexes(&self) -> UserResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "email": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name("idx_email_unique".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "username": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name("idx_username_unique".to_string())
                        .build(),
                )
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!(collection = %self.collection.name(), "User indexes ready");
        Ok(())
    }

    fn id_filter(id: Uuid) -> Document {
        doc! { "_id": bson::Uuid::from(id) }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self, input))]
    async fn create(&self, input: UserInput) -> UserResult<User> {
        self.ensure_indexes().await?;
        let user = User::new(input);

        self.collection.insert_one(&user).await?;

        tracing::info!(user_id = %user.id, "User created");
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> UserResult<Vec<User>> {
        let cursor = self.collection.find(doc! {}).sort(doc! { "_id": 1 }).await?;
        let users: Vec<User> = cursor.try_collect().await?;
        Ok(users)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let user = self.collection.find_one(Self::id_filter(id)).await?;
        Ok(user)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: UserInput) -> UserResult<User> {
        self.ensure_indexes().await?;
        let user = User {
            id,
            email: input.email,
            username: input.username,
        };

        let result = self
            .collection
            .replace_one(Self::id_filter(id), &user)
            .await?;

        if result.matched_count == 0 {
            return Err(UserError::NotFound(id));
        }

        tracing::info!(user_id = %id, "User updated");
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> UserResult<()> {
        let result = self.collection.delete_one(Self::id_filter(id)).await?;

        if result.deleted_count == 0 {
            return Err(UserError::NotFound(id));
        }

        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }
}
