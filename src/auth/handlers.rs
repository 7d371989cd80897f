use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, PublicUser, SignupRequest},
        extractors::SessionContext,
        password::{hash_password, verify_password},
        repo_types::NewUser,
        session::{removal_cookie, session_cookie},
    },
    error::ApiError,
    state::AppState,
    store::StoreError,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", delete(logout))
}

pub fn session_routes() -> Router<AppState> {
    Router::new().route("/check_session", get(check_session))
}

#[instrument(skip(state, jar, payload))]
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(StatusCode, CookieJar, Json<PublicUser>), ApiError> {
    let Json(payload) = payload?;
    let signup = payload.validate().inspect_err(|e| {
        warn!(reason = %e, "signup rejected");
    })?;

    let password_hash = hash_password(&signup.password)?;
    let new_user = NewUser {
        username: signup.username,
        password_hash,
        image_url: signup.image_url,
        bio: signup.bio,
    };

    let user = match state.repo.create_user(new_user).await {
        Ok(u) => u,
        Err(StoreError::DuplicateUsername(username)) => {
            warn!(%username, "username already taken");
            return Err(ApiError::DuplicateUsername);
        }
        Err(e) => return Err(e.into()),
    };

    let token = state.sessions.create(user.id, state.session_ttl()).await?;
    info!(user_id = %user.id, username = %user.username, "user signed up");

    Ok((
        StatusCode::CREATED,
        jar.add(session_cookie(&state.config.session, token)),
        Json(PublicUser::from(&user)),
    ))
}

#[instrument(skip(state, ctx))]
pub async fn check_session(
    State(state): State<AppState>,
    ctx: SessionContext,
) -> Result<Json<PublicUser>, ApiError> {
    let user_id = ctx.user_id.ok_or(ApiError::NoSession)?;
    let user = state
        .repo
        .find_user_by_id(user_id)
        .await?
        .ok_or(ApiError::NoSession)?;
    Ok(Json(PublicUser::from(&user)))
}

/// Matches on username alone unless `login_verify_password` is enabled.
#[instrument(skip(state, ctx, jar, payload))]
pub async fn login(
    State(state): State<AppState>,
    ctx: SessionContext,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<PublicUser>), ApiError> {
    let Json(payload) = payload?;

    let Some(user) = state.repo.find_user_by_username(&payload.username).await? else {
        warn!(username = %payload.username, "login unknown username");
        return Err(ApiError::InvalidCredentials);
    };

    if state.config.login_verify_password {
        let ok = match payload.password.as_deref() {
            Some(plain) => verify_password(plain, &user.password_hash)?,
            None => false,
        };
        if !ok {
            warn!(user_id = %user.id, "login invalid password");
            return Err(ApiError::InvalidCredentials);
        }
    } else {
        warn!(user_id = %user.id, "login accepted without password verification");
    }

    if let Some(old) = ctx.token.as_deref() {
        state.sessions.destroy(old).await?;
    }
    let token = state.sessions.create(user.id, state.session_ttl()).await?;
    info!(user_id = %user.id, username = %user.username, "user logged in");

    Ok((
        jar.add(session_cookie(&state.config.session, token)),
        Json(PublicUser::from(&user)),
    ))
}

#[instrument(skip(state, ctx, jar))]
pub async fn logout(
    State(state): State<AppState>,
    ctx: SessionContext,
    jar: CookieJar,
) -> Result<(StatusCode, CookieJar), ApiError> {
    let (Some(token), Some(user_id)) = (ctx.token.as_deref(), ctx.user_id) else {
        return Err(ApiError::Unauthorized);
    };

    state.sessions.destroy(token).await?;
    info!(%user_id, "user logged out");

    Ok((
        StatusCode::NO_CONTENT,
        jar.remove(removal_cookie(&state.config.session)),
    ))
}
