use anyhow::Context;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => anyhow::bail!("unknown STORE_BACKEND {other:?}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub cookie_secure: bool,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend: StoreBackend,
    pub database_url: Option<String>,
    pub session: SessionConfig,
    /// Off by default: login only matches the username.
    pub login_verify_password: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(get: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = match get("STORE_BACKEND") {
            Some(v) => v.parse()?,
            None => StoreBackend::Postgres,
        };

        let database_url = get("DATABASE_URL");
        if backend == StoreBackend::Postgres && database_url.is_none() {
            anyhow::bail!("DATABASE_URL is required when STORE_BACKEND=postgres");
        }

        let session = SessionConfig {
            cookie_name: get("SESSION_COOKIE_NAME").unwrap_or_else(|| "recipebook_session".into()),
            cookie_secure: parse_bool(&get, "SESSION_COOKIE_SECURE", false)?,
            ttl_minutes: match get("SESSION_TTL_MINUTES") {
                Some(v) => v
                    .parse::<i64>()
                    .with_context(|| format!("SESSION_TTL_MINUTES={v:?} is not a number"))?,
                None => 60 * 24 * 7,
            },
        };
        anyhow::ensure!(session.ttl_minutes > 0, "SESSION_TTL_MINUTES must be positive");

        Ok(Self {
            backend,
            database_url,
            session,
            login_verify_password: parse_bool(&get, "LOGIN_VERIFY_PASSWORD", false)?,
        })
    }
}

fn parse_bool<F>(get: &F, key: &str, default: bool) -> anyhow::Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = get(key) else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => anyhow::bail!("{key}={raw:?} is not a boolean"),
    }
}
