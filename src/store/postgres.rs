use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use super::{Repository, StoreError};
use crate::{
    auth::repo_types::{NewUser, User},
    recipes::repo_types::{NewRecipe, Recipe},
};

#[derive(Clone)]
pub struct PgRepository {
    db: PgPool,
}

impl PgRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}

#[async_trait]
impl Repository for PgRepository {
    async fn create_user(&self, new: NewUser) -> Result<User, StoreError> {
        match User::create(&self.db, &new).await {
            Ok(user) => {
                debug!(user_id = %user.id, "user row inserted");
                Ok(user)
            }
            Err(e) if is_unique_violation(&e) => Err(StoreError::DuplicateUsername(new.username)),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(User::find_by_id(&self.db, id).await?)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(User::find_by_username(&self.db, username).await?)
    }

    async fn create_recipe(&self, new: NewRecipe) -> Result<Recipe, StoreError> {
        match Recipe::create(&self.db, &new).await {
            Ok(recipe) => {
                debug!(recipe_id = %recipe.id, user_id = %recipe.user_id, "recipe row inserted");
                Ok(recipe)
            }
            Err(e) if is_foreign_key_violation(&e) => Err(StoreError::UserNotFound(new.user_id)),
            Err(e) => Err(e.into()),
        }
    }

    async fn list_recipes_by_user(&self, user_id: Uuid) -> Result<Vec<Recipe>, StoreError> {
        Ok(Recipe::list_by_user(&self.db, user_id).await?)
    }
}
