use sqlx::FromRow;
use uuid::Uuid;

/// User record in the database. Never serialized directly; see `PublicUser`.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String, // Argon2 PHC string
    pub image_url: String,
    pub bio: String,
}

/// A validated signup with the password already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub image_url: String,
    pub bio: String,
}
