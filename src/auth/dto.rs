use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    auth::repo_types::User,
    validation::{required, ValidationError},
};

/// Request body for signup. Every field is optional at the wire level so
/// that a missing field reports its own message instead of a parse error.
#[derive(Debug, Default, Deserialize)]
pub struct SignupRequest {
    pub username: Option<String>,
    pub image_url: Option<String>,
    pub bio: Option<String>,
    pub password: Option<String>,
}

/// A signup that passed validation; the password is still plaintext.
#[derive(Debug)]
pub struct ValidSignup {
    pub username: String,
    pub image_url: String,
    pub bio: String,
    pub password: String,
}

impl SignupRequest {
    /// Checks username, image_url, bio, password in that order.
    pub fn validate(self) -> Result<ValidSignup, ValidationError> {
        let username = required(self.username, ValidationError::UsernameRequired)?;
        let image_url = required(self.image_url, ValidationError::ImageUrlRequired)?;
        let bio = required(self.bio, ValidationError::BioRequired)?;
        let password = required(self.password, ValidationError::PasswordRequired)?;
        Ok(ValidSignup {
            username,
            image_url,
            bio,
            password,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: Option<String>,
}

/// Public part of the user returned to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    pub image_url: String,
    pub bio: String,
}

impl From<&User> for PublicUser {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            username: u.username.clone(),
            image_url: u.image_url.clone(),
            bio: u.bio.clone(),
        }
    }
}
