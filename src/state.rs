use crate::auth::session::{MemorySessionStore, PgSessionStore, SessionStore};
use crate::config::{AppConfig, StoreBackend};
use crate::store::{MemoryRepository, PgRepository, Repository};
use anyhow::Context;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn Repository>,
    pub sessions: Arc<dyn SessionStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        match config.backend {
            StoreBackend::Postgres => {
                let url = config
                    .database_url
                    .as_deref()
                    .context("DATABASE_URL is not set")?;
                let db = sqlx::postgres::PgPoolOptions::new()
                    .max_connections(10)
                    .connect(url)
                    .await
                    .context("connect to database")?;

                if let Err(e) = sqlx::migrate!("./migrations").run(&db).await {
                    tracing::warn!(error = %e, "migration failed; continuing");
                }

                Ok(Self::from_parts(
                    Arc::new(PgRepository::new(db.clone())),
                    Arc::new(PgSessionStore::new(db)),
                    config,
                ))
            }
            StoreBackend::Memory => {
                tracing::warn!("using in-memory storage; data is lost on restart");
                Ok(Self::from_parts(
                    Arc::new(MemoryRepository::new()),
                    Arc::new(MemorySessionStore::new()),
                    config,
                ))
            }
        }
    }

    pub fn from_parts(
        repo: Arc<dyn Repository>,
        sessions: Arc<dyn SessionStore>,
        config: Arc<AppConfig>,
    ) -> Self {
        Self {
            repo,
            sessions,
            config,
        }
    }

    pub fn session_ttl(&self) -> time::Duration {
        time::Duration::minutes(self.config.session.ttl_minutes)
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        Self::fake_with(Arc::new(MemoryRepository::new()), false)
    }

    #[cfg(test)]
    pub fn fake_with(repo: Arc<MemoryRepository>, login_verify_password: bool) -> Self {
        let config = Arc::new(AppConfig {
            backend: StoreBackend::Memory,
            database_url: None,
            session: crate::config::SessionConfig {
                cookie_name: "test_session".into(),
                cookie_secure: false,
                ttl_minutes: 5,
            },
            login_verify_password,
        });
        Self::from_parts(repo, Arc::new(MemorySessionStore::new()), config)
    }
}
