use thiserror::Error;

pub const MIN_INSTRUCTIONS_CHARS: usize = 50;

/// Field-level payload failures. `Display` is the message returned to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Username required")]
    UsernameRequired,
    #[error("Image URL required")]
    ImageUrlRequired,
    #[error("Bio required")]
    BioRequired,
    #[error("Password required")]
    PasswordRequired,

    #[error("Title is required.")]
    TitleRequired,
    #[error("Instructions are required.")]
    InstructionsRequired,
    #[error("Instructions must be at least 50 characters long.")]
    InstructionsTooShort,
    #[error("Minutes to complete are required.")]
    MinutesRequired,
    #[error("Minutes to complete must be a positive integer.")]
    MinutesNotPositiveInteger,
}

/// Returns the value when it is present and non-empty.
pub fn required(value: Option<String>, err: ValidationError) -> Result<String, ValidationError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(err),
    }
}
