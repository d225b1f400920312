//! Pawdr Match - questionnaire-driven pet matching for the Pawdr adoption app
//!
//! Four questionnaire answers are turned into pet store conditions (energy
//! level, species, compatibility with existing pets, ease of care); the
//! matching pets are then liked or passed through a per-session swipe deck.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{MatchFilter, PetQuery, Questionnaire, SwipeDeck};
pub use models::{CandidatePet, FilterThresholds, QuestionnaireResponse, ResponseDraft};
