use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::CookieJar;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{auth::repo_types::User, error::ApiError, state::AppState};

/// The per-request view of the session cookie.
///
/// Never rejects for a missing or stale session: `user_id` is simply `None`.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    pub token: Option<String>,
    pub user_id: Option<Uuid>,
}

#[async_trait]
impl FromRequestParts<AppState> for SessionContext {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let Some(token) = jar
            .get(&state.config.session.cookie_name)
            .map(|c| c.value().to_owned())
            .filter(|t| !t.is_empty())
        else {
            return Ok(Self::default());
        };

        let user_id = state.sessions.resolve(&token).await?;
        if user_id.is_none() {
            debug!("session cookie does not match a live session");
        }
        Ok(Self {
            token: Some(token),
            user_id,
        })
    }
}

/// The user bound to the request's session. Rejects with 401 otherwise.
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let ctx = SessionContext::from_request_parts(parts, state).await?;
        let user_id = ctx.user_id.ok_or(ApiError::Unauthorized)?;
        match state.repo.find_user_by_id(user_id).await? {
            Some(user) => Ok(CurrentUser(user)),
            None => {
                warn!(%user_id, "session refers to a missing user");
                Err(ApiError::Unauthorized)
            }
        }
    }
}
