use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::models::domain::SwipeAction;

/// Request to start a questionnaire session
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StartSessionRequest {
    #[validate(length(min = 1, max = 64), custom(function = "validate_client_id"))]
    #[serde(alias = "client_id", rename = "clientId")]
    pub client_id: String,
}

/// Request to record one questionnaire answer
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitAnswerRequest {
    #[validate(range(min = 1, max = 4))]
    pub question: u8,
    pub answer: u8,
}

/// Request to like or pass on a candidate
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SwipeRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "pet_id", rename = "petId")]
    pub pet_id: String,
    pub action: SwipeAction,
}

/// Client ids name files in the likes directory, so only a safe charset is allowed
pub fn validate_client_id(client_id: &str) -> Result<(), ValidationError> {
    let valid = client_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("client_id_charset"))
    }
}
