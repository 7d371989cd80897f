use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Repository, StoreError};
use crate::{
    auth::repo_types::{NewUser, User},
    recipes::repo_types::{NewRecipe, Recipe},
};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    // insertion order doubles as creation order
    recipes: Vec<Recipe>,
}

/// Process-local store with the same integrity rules as the PostgreSQL schema.
#[derive(Default)]
pub struct MemoryRepository {
    tables: RwLock<Tables>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }

    #[cfg(test)]
    pub async fn recipe_count(&self) -> usize {
        self.tables.read().await.recipes.len()
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn create_user(&self, new: NewUser) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.username == new.username) {
            return Err(StoreError::DuplicateUsername(new.username));
        }
        let user = User {
            id: Uuid::new_v4(),
            username: new.username,
            password_hash: new.password_hash,
            image_url: new.image_url,
            bio: new.bio,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.username == username).cloned())
    }

    async fn create_recipe(&self, new: NewRecipe) -> Result<Recipe, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&new.user_id) {
            return Err(StoreError::UserNotFound(new.user_id));
        }
        let recipe = Recipe {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            title: new.title,
            instructions: new.instructions,
            minutes_to_complete: new.minutes_to_complete,
        };
        tables.recipes.push(recipe.clone());
        Ok(recipe)
    }

    async fn list_recipes_by_user(&self, user_id: Uuid) -> Result<Vec<Recipe>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .recipes
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }
}
