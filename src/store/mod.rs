use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    auth::repo_types::{NewUser, User},
    recipes::repo_types::{NewRecipe, Recipe},
};

mod memory;
mod postgres;

pub use memory::MemoryRepository;
pub use postgres::PgRepository;

/// Integrity failures surfaced by the storage boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("username {0:?} is already taken")]
    DuplicateUsername(String),

    #[error("user {0} not found")]
    UserNotFound(Uuid),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Typed persistence for users and their recipes.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Fails with `DuplicateUsername` when the username is taken.
    async fn create_user(&self, new: NewUser) -> Result<User, StoreError>;
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Fails with `UserNotFound` when the owner does not exist.
    async fn create_recipe(&self, new: NewRecipe) -> Result<Recipe, StoreError>;
    /// Recipes owned by `user_id`, oldest first.
    async fn list_recipes_by_user(&self, user_id: Uuid) -> Result<Vec<Recipe>, StoreError>;
}
