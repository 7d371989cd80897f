//! Server-side sessions.
//!
//! The client only ever holds an opaque random token in a cookie; the token
//! maps to a single `user_id` in a [`SessionStore`]. Expired records resolve
//! to nothing and are purged lazily.

use std::collections::HashMap;

use anyhow::Context;
use async_trait::async_trait;
use axum_extra::extract::cookie::{Cookie, SameSite};
use rand::{distributions::Alphanumeric, Rng};
use sqlx::PgPool;
use time::{Duration, OffsetDateTime};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::config::SessionConfig;

const TOKEN_LEN: usize = 48;

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Starts a session for `user_id` and returns its token.
    async fn create(&self, user_id: Uuid, ttl: Duration) -> anyhow::Result<String>;
    /// The bound user, or `None` for unknown and expired tokens.
    async fn resolve(&self, token: &str) -> anyhow::Result<Option<Uuid>>;
    /// Returns whether a live session was removed.
    async fn destroy(&self, token: &str) -> anyhow::Result<bool>;
}

pub fn new_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LEN)
        .map(char::from)
        .collect()
}

pub fn session_cookie(cfg: &SessionConfig, token: String) -> Cookie<'static> {
    Cookie::build((cfg.cookie_name.clone(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(cfg.cookie_secure)
        .max_age(Duration::minutes(cfg.ttl_minutes))
        .build()
}

/// Cookie used to remove the session cookie from the client.
pub fn removal_cookie(cfg: &SessionConfig) -> Cookie<'static> {
    Cookie::build((cfg.cookie_name.clone(), ""))
        .path("/")
        .build()
}

#[derive(Debug, Clone, Copy)]
struct SessionRecord {
    user_id: Uuid,
    expires_at: OffsetDateTime,
}

#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, SessionRecord>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, user_id: Uuid, ttl: Duration) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let token = new_token();
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, s| s.expires_at > now);
        sessions.insert(
            token.clone(),
            SessionRecord {
                user_id,
                expires_at: now + ttl,
            },
        );
        debug!(%user_id, "session created");
        Ok(token)
    }

    async fn resolve(&self, token: &str) -> anyhow::Result<Option<Uuid>> {
        let now = OffsetDateTime::now_utc();
        Ok(self
            .sessions
            .read()
            .await
            .get(token)
            .filter(|s| s.expires_at > now)
            .map(|s| s.user_id))
    }

    async fn destroy(&self, token: &str) -> anyhow::Result<bool> {
        let now = OffsetDateTime::now_utc();
        let removed = self.sessions.write().await.remove(token);
        Ok(removed.is_some_and(|s| s.expires_at > now))
    }
}

pub struct PgSessionStore {
    db: PgPool,
}

impl PgSessionStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn create(&self, user_id: Uuid, ttl: Duration) -> anyhow::Result<String> {
        let token = new_token();
        let expires_at = OffsetDateTime::now_utc() + ttl;

        sqlx::query("DELETE FROM sessions WHERE expires_at <= now()")
            .execute(&self.db)
            .await
            .context("purge expired sessions")?;

        sqlx::query(
            r#"
            INSERT INTO sessions (token, user_id, expires_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(&token)
        .bind(user_id)
        .bind(expires_at)
        .execute(&self.db)
        .await
        .context("insert session")?;

        debug!(%user_id, "session created");
        Ok(token)
    }

    async fn resolve(&self, token: &str) -> anyhow::Result<Option<Uuid>> {
        let row = sqlx::query_as::<_, (Uuid,)>(
            r#"
            SELECT user_id
              FROM sessions
             WHERE token = $1 AND expires_at > now()
            "#,
        )
        .bind(token)
        .fetch_optional(&self.db)
        .await
        .context("resolve session")?;
        Ok(row.map(|(user_id,)| user_id))
    }

    async fn destroy(&self, token: &str) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM sessions WHERE token = $1 AND expires_at > now()")
            .bind(token)
            .execute(&self.db)
            .await
            .context("delete session")?;
        Ok(res.rows_affected() > 0)
    }
}
