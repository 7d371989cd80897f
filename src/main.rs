mod app;
mod auth;
mod config;
mod error;
mod logging;
mod recipes;
mod state;
mod store;
mod validation;

#[cfg(test)]
mod test_support;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    logging::init();

    let app_state = state::AppState::init().await?;
    if !app_state.config.login_verify_password {
        tracing::warn!("LOGIN_VERIFY_PASSWORD is off: /login accepts any password for a known username");
    }

    app::serve(app::build_app(app_state)).await
}
