use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{User, UserInput};

/// Repository trait for User persistence
///
/// Email and username are unique across all users. Implementations report a
/// clash as [`UserError::DuplicateKey`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user with a freshly assigned id
    async fn create(&self, input: UserInput) -> UserResult<User>;

    /// All users ordered by id, which is creation order
    async fn list_all(&self) -> UserResult<Vec<User>>;

    async fn find_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    /// Replace email and username of an existing user. Never inserts.
    async fn update(&self, id: Uuid, input: UserInput) -> UserResult<User>;

    async fn delete(&self, id: Uuid) -> UserResult<()>;
}

/// In-memory repository with the same uniqueness rules as the MongoDB indexes
///
/// Comparisons are exact, as with the default collation of a unique index.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<BTreeMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Uniqueness check against every user except `skip`
fn check_unique(
    users: &BTreeMap<Uuid, User>,
    input: &UserInput,
    skip: Option<Uuid>,
) -> UserResult<()> {
    let others = || users.values().filter(|u| Some(u.id) != skip);

    if others().any(|u| u.email == input.email) {
        return Err(UserError::duplicate("email"));
    }
    if others().any(|u| u.username == input.username) {
        return Err(UserError::duplicate("username"));
    }
    Ok(())
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, input: UserInput) -> UserResult<User> {
        let mut users = self.users.write().await;
        check_unique(&users, &input, None)?;

        let user = User::new(input);
        users.insert(user.id, user.clone());

        tracing::info!(user_id = %user.id, "Created user");
        Ok(user)
    }

    async fn list_all(&self) -> UserResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(users.values().cloned().collect())
    }

    async fn find_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn update(&self, id: Uuid, input: UserInput) -> UserResult<User> {
        let mut users = self.users.write().await;
        if !users.contains_key(&id) {
            return Err(UserError::NotFound(id));
        }
        check_unique(&users, &input, Some(id))?;

        let user = users.get_mut(&id).ok_or(UserError::NotFound(id))?;
        user.apply(input);

        tracing::info!(user_id = %id, "Updated user");
        Ok(user.clone())
    }

    async fn delete(&self, id: Uuid) -> UserResult<()> {
        let mut users = self.users.write().await;
        users.remove(&id).ok_or(UserError::NotFound(id))?;

        tracing::info!(user_id = %id, "Deleted user");
        Ok(())
    }
}
