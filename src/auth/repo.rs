use crate::auth::repo_types::{NewUser, User};
use sqlx::PgPool;
use uuid::Uuid;

impl User {
    pub async fn find_by_id(db: &PgPool, id: Uuid) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, image_url, bio
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Exact, case-sensitive match.
    pub async fn find_by_username(db: &PgPool, username: &str) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, image_url, bio
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(db)
        .await
    }

    pub async fn create(db: &PgPool, new: &NewUser) -> sqlx::Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, password_hash, image_url, bio)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, username, password_hash, image_url, bio
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new.username)
        .bind(&new.password_hash)
        .bind(&new.image_url)
        .bind(&new.bio)
        .fetch_one(db)
        .await
    }
}
