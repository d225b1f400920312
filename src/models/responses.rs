use serde::{Deserialize, Serialize};
use crate::core::badges::PetCardView;
use crate::core::questionnaire::{Progress, Question};
use crate::models::domain::{LikedPet, ResponseDraft};

/// Response for session creation
#[derive(Debug, Clone, Serialize)]
pub struct StartSessionResponse {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    #[serde(rename = "likedPets")]
    pub liked_pets: Vec<LikedPet>,
}

/// A single questionnaire step
#[derive(Debug, Clone, Serialize)]
pub struct QuestionResponse {
    pub question: &'static Question,
    pub progress: Progress,
    #[serde(rename = "isLastStep")]
    pub is_last_step: bool,
}

/// State of the draft after an answer was recorded
#[derive(Debug, Clone, Serialize)]
pub struct DraftResponse {
    pub responses: ResponseDraft,
    pub answered: u8,
    #[serde(rename = "isComplete")]
    pub is_complete: bool,
}

/// Response for submitting a completed questionnaire
#[derive(Debug, Clone, Serialize)]
pub struct FindMatchesResponse {
    pub matches: Vec<PetCardView>,
    pub total_results: usize,
    /// Set when the pet store query failed and `matches` is empty because of it
    pub degraded: bool,
}

/// Current state of a session's swipe deck
#[derive(Debug, Clone, Serialize)]
pub struct DeckResponse {
    pub active: Vec<PetCardView>,
    #[serde(rename = "likedCount")]
    pub liked_count: usize,
    #[serde(rename = "passedCount")]
    pub passed_count: usize,
    #[serde(rename = "isFinished")]
    pub is_finished: bool,
    /// Present once every candidate has been swiped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// Liked pets stored for a client
#[derive(Debug, Clone, Serialize)]
pub struct LikedPetsResponse {
    #[serde(rename = "clientId")]
    pub client_id: String,
    #[serde(rename = "likedPets")]
    pub liked_pets: Vec<LikedPet>,
    pub count: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
