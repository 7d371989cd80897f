use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct Recipe {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub instructions: String,
    pub minutes_to_complete: i32,
}

/// A recipe that passed validation, owned by `user_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecipe {
    pub user_id: Uuid,
    pub title: String,
    pub instructions: String,
    pub minutes_to_complete: i32,
}
