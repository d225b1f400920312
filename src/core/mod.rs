// Core matching exports
pub mod badges;
pub mod filter;
pub mod matcher;
pub mod questionnaire;
pub mod swipe;

pub use badges::PetCardView;
pub use filter::{Comparison, Condition, PetField, PetQuery};
pub use matcher::MatchFilter;
pub use questionnaire::{Progress, Question, QuestionOption, Questionnaire};
pub use swipe::{LikedLog, SwipeDeck};
