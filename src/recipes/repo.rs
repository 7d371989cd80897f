use sqlx::PgPool;
use uuid::Uuid;

use crate::recipes::repo_types::{NewRecipe, Recipe};

impl Recipe {
    pub async fn create(db: &PgPool, new: &NewRecipe) -> sqlx::Result<Recipe> {
        sqlx::query_as::<_, Recipe>(
            r#"
            INSERT INTO recipes (id, user_id, title, instructions, minutes_to_complete)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, title, instructions, minutes_to_complete
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.user_id)
        .bind(&new.title)
        .bind(&new.instructions)
        .bind(new.minutes_to_complete)
        .fetch_one(db)
        .await
    }

    /// Oldest first.
    pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> sqlx::Result<Vec<Recipe>> {
        sqlx::query_as::<_, Recipe>(
            r#"
            SELECT id, user_id, title, instructions, minutes_to_complete
            FROM recipes
            WHERE user_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await
    }
}
