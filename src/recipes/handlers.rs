use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};

use super::dto::{CreateRecipeRequest, RecipeResponse};
use crate::{auth::extractors::CurrentUser, error::ApiError, state::AppState};

pub fn recipe_routes() -> Router<AppState> {
    Router::new().route("/recipes", get(list_recipes).post(create_recipe))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn list_recipes(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<RecipeResponse>>, ApiError> {
    let recipes = state.repo.list_recipes_by_user(user.id).await?;
    let items = recipes
        .into_iter()
        .map(|r| RecipeResponse::new(r, &user))
        .collect();
    Ok(Json(items))
}

#[instrument(skip(state, user, payload), fields(user_id = %user.id))]
pub async fn create_recipe(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    payload: Result<Json<CreateRecipeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RecipeResponse>), ApiError> {
    let Json(payload) = payload?;
    let new_recipe = payload.validate(user.id).inspect_err(|e| {
        warn!(reason = %e, "recipe rejected");
    })?;

    let recipe = state.repo.create_recipe(new_recipe).await?;
    info!(recipe_id = %recipe.id, title = %recipe.title, "recipe created");

    Ok((StatusCode::CREATED, Json(RecipeResponse::new(recipe, &user))))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use serde_json::{json, Value};

    use crate::{
        state::AppState,
        store::{MemoryRepository, Repository},
        test_support::TestClient,
    };

    async fn signed_in(repo: &Arc<MemoryRepository>, username: &str) -> TestClient {
        let mut client = TestClient::new(AppState::fake_with(repo.clone(), false));
        let res = client
            .post(
                "/signup",
                json!({"username": username, "image_url": "u", "bio": "b", "password": "p"}),
            )
            .await;
        assert_eq!(res.status, StatusCode::CREATED);
        client
    }

    fn recipe(instructions_len: usize, minutes: Value) -> Value {
        json!({
            "title": "Slow-cooked beans",
            "instructions": "b".repeat(instructions_len),
            "minutes_to_complete": minutes,
        })
    }

    #[tokio::test]
    async fn requires_session() {
        let repo = Arc::new(MemoryRepository::new());
        let mut client = TestClient::new(AppState::fake_with(repo.clone(), false));

        let res = client.post("/recipes", recipe(60, json!(30))).await;
        assert_eq!(res.status, StatusCode::UNAUTHORIZED);
        assert_eq!(res.body, json!({"error": "Unauthorized"}));

        let res = client.get("/recipes").await;
        assert_eq!(res.status, StatusCode::UNAUTHORIZED);
        assert_eq!(repo.recipe_count().await, 0);
    }

    #[tokio::test]
    async fn session_for_missing_user_is_401() {
        let repo = Arc::new(MemoryRepository::new());
        let state = AppState::fake_with(repo.clone(), false);
        let mut client = TestClient::with_orphan_session(state).await;

        let res = client.get("/recipes").await;
        assert_eq!(res.status, StatusCode::UNAUTHORIZED);
        assert_eq!(res.body, json!({"error": "Unauthorized"}));

        let res = client.post("/recipes", recipe(60, json!(30))).await;
        assert_eq!(res.status, StatusCode::UNAUTHORIZED);
        assert_eq!(res.body, json!({"error": "Unauthorized"}));
        assert_eq!(repo.recipe_count().await, 0);
    }

    #[tokio::test]
    async fn unauthorized_wins_over_bad_body() {
        let mut client = TestClient::new(AppState::fake());
        let res = client.post("/recipes", json!({"title": 3})).await;
        assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn instructions_length_boundary() {
        let repo = Arc::new(MemoryRepository::new());
        let mut client = signed_in(&repo, "ann").await;

        let res = client.post("/recipes", recipe(49, json!(30))).await;
        assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            res.body,
            json!({"error": "Instructions must be at least 50 characters long."})
        );
        assert_eq!(repo.recipe_count().await, 0);

        let res = client.post("/recipes", recipe(50, json!(30))).await;
        assert_eq!(res.status, StatusCode::CREATED);
        assert_eq!(repo.recipe_count().await, 1);
    }

    #[tokio::test]
    async fn field_messages_in_order() {
        let repo = Arc::new(MemoryRepository::new());
        let mut client = signed_in(&repo, "ann").await;

        let cases = [
            (json!({}), "Title is required."),
            (json!({"title": ""}), "Title is required."),
            (json!({"title": "t"}), "Instructions are required."),
            (recipe(60, json!(null)), "Minutes to complete are required."),
            (recipe(60, json!(0)), "Minutes to complete are required."),
            (recipe(60, json!(-1)), "Minutes to complete must be a positive integer."),
            (recipe(60, json!(1.5)), "Minutes to complete must be a positive integer."),
            (recipe(60, json!("20")), "Minutes to complete must be a positive integer."),
        ];
        for (body, message) in cases {
            let res = client.post("/recipes", body).await;
            assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
            assert_eq!(res.body, json!({"error": message}));
        }
        assert_eq!(repo.recipe_count().await, 0);
    }

    #[tokio::test]
    async fn created_recipe_is_owned_by_session_user() {
        let repo = Arc::new(MemoryRepository::new());
        let mut client = signed_in(&repo, "ann").await;
        let me = client.get("/check_session").await.body;

        let res = client.post("/recipes", recipe(80, json!(25))).await;
        assert_eq!(res.status, StatusCode::CREATED);
        assert_eq!(res.body["title"], "Slow-cooked beans");
        assert_eq!(res.body["minutes_to_complete"], 25);
        assert_eq!(res.body["user_id"], me["id"]);
        assert_eq!(res.body["user"], me);

        let ann = repo.find_user_by_username("ann").await.unwrap().unwrap();
        let stored = repo.list_recipes_by_user(ann.id).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].user_id, ann.id);
        assert_eq!(res.body["id"], stored[0].id.to_string());
    }

    #[tokio::test]
    async fn index_lists_only_own_recipes() {
        let repo = Arc::new(MemoryRepository::new());
        let mut ann = signed_in(&repo, "ann").await;
        let mut bob = signed_in(&repo, "bob").await;

        ann.post("/recipes", recipe(50, json!(10))).await;
        ann.post("/recipes", recipe(55, json!(20))).await;
        bob.post("/recipes", recipe(60, json!(30))).await;

        let res = ann.get("/recipes").await;
        assert_eq!(res.status, StatusCode::OK);
        let list = res.body.as_array().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0]["minutes_to_complete"], 10);
        assert_eq!(list[1]["minutes_to_complete"], 20);
        assert!(list.iter().all(|r| r["user"]["username"] == "ann"));

        let res = bob.get("/recipes").await;
        assert_eq!(res.body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn index_after_logout_is_401() {
        let repo = Arc::new(MemoryRepository::new());
        let mut client = signed_in(&repo, "ann").await;
        let cookie = client.cookie().unwrap().to_string();
        client.post("/recipes", recipe(50, json!(10))).await;

        let res = client.delete("/logout").await;
        assert_eq!(res.status, StatusCode::NO_CONTENT);

        let res = client.get("/recipes").await;
        assert_eq!(res.status, StatusCode::UNAUTHORIZED);
        assert_eq!(res.body, json!({"error": "Unauthorized"}));

        client.set_cookie(&cookie);
        let res = client.get("/recipes").await;
        assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    }
}
