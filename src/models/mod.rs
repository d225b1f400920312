// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AnswerError, CandidatePet, ExistingPets, ExperienceLevel, FilterThresholds, LikedPet,
    OutdoorPreference, QuestionnaireResponse, ResponseDraft, SpeciesPreference, SwipeAction,
    QUESTION_COUNT,
};
pub use requests::{StartSessionRequest, SubmitAnswerRequest, SwipeRequest};
pub use responses::{
    DeckResponse, DraftResponse, ErrorResponse, FindMatchesResponse, HealthResponse,
    LikedPetsResponse, QuestionResponse, StartSessionResponse,
};
