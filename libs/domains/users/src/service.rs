//! User Service - validation in front of the repository

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{User, UserInput, validation_message};
use crate::repository::UserRepository;

/// User service
///
/// Rejects invalid input before the repository is touched. Uniqueness is
/// left to the repository.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    fn validate(input: &UserInput) -> UserResult<()> {
        input
            .validate()
            .map_err(|e| UserError::Validation(validation_message(&e)))
    }

    #[instrument(skip(self))]
    pub async fn list_users(&self) -> UserResult<Vec<User>> {
        self.repository.list_all().await
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, id: Uuid) -> UserResult<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn create_user(&self, input: UserInput) -> UserResult<User> {
        Self::validate(&input)?;
        self.repository.create(input).await
    }

    /// Replace email and username of an existing user
    #[instrument(skip(self, input))]
    pub async fn update_user(&self, id: Uuid, input: UserInput) -> UserResult<User> {
        Self::validate(&input)?;
        self.repository.update(id, input).await
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: Uuid) -> UserResult<()> {
        self.repository.delete(id).await
    }
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
