use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    auth::{dto::PublicUser, repo_types::User},
    recipes::repo_types::{NewRecipe, Recipe},
    validation::{required, ValidationError, MIN_INSTRUCTIONS_CHARS},
};

/// Request body for `POST /recipes`.
///
/// `minutes_to_complete` stays untyped so that "missing" and "not a positive
/// integer" can be told apart.
#[derive(Debug, Default, Deserialize)]
pub struct CreateRecipeRequest {
    pub title: Option<String>,
    pub instructions: Option<String>,
    pub minutes_to_complete: Option<Value>,
}

impl CreateRecipeRequest {
    /// Validates in field order and stops at the first failure.
    pub fn validate(self, user_id: Uuid) -> Result<NewRecipe, ValidationError> {
        let title = required(self.title, ValidationError::TitleRequired)?;
        let instructions = required(self.instructions, ValidationError::InstructionsRequired)?;
        if instructions.chars().count() < MIN_INSTRUCTIONS_CHARS {
            return Err(ValidationError::InstructionsTooShort);
        }
        let minutes_to_complete = minutes_to_complete(self.minutes_to_complete.as_ref())?;
        Ok(NewRecipe {
            user_id,
            title,
            instructions,
            minutes_to_complete,
        })
    }
}

fn minutes_to_complete(value: Option<&Value>) -> Result<i32, ValidationError> {
    let Some(value) = value.filter(|v| !is_blank(v)) else {
        return Err(ValidationError::MinutesRequired);
    };
    value
        .as_i64()
        .filter(|m| *m > 0)
        .and_then(|m| i32::try_from(m).ok())
        .ok_or(ValidationError::MinutesNotPositiveInteger)
}

// null, false, zero and empty containers count as "not provided"
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecipeResponse {
    pub id: Uuid,
    pub title: String,
    pub instructions: String,
    pub minutes_to_complete: i32,
    pub user_id: Uuid,
    pub user: PublicUser,
}

impl RecipeResponse {
    pub fn new(recipe: Recipe, owner: &User) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title,
            instructions: recipe.instructions,
            minutes_to_complete: recipe.minutes_to_complete,
            user_id: recipe.user_id,
            user: PublicUser::from(owner),
        }
    }
}
