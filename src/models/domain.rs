use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Number of questions in the questionnaire
pub const QUESTION_COUNT: u8 = 4;

/// Errors raised while applying a single questionnaire answer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnswerError {
    #[error("Unknown question number: {0}")]
    UnknownQuestion(u8),

    #[error("Answer index {answer} is out of range for question {question}")]
    OutOfRange { question: u8, answer: u8 },
}

/// Question 1: how active and outdoorsy the adopter is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum OutdoorPreference {
    Homebound,
    SometimesActive,
    VeryActive,
}

impl TryFrom<u8> for OutdoorPreference {
    type Error = AnswerError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Homebound),
            1 => Ok(Self::SometimesActive),
            2 => Ok(Self::VeryActive),
            answer => Err(AnswerError::OutOfRange { question: 1, answer }),
        }
    }
}

impl From<OutdoorPreference> for u8 {
    fn from(value: OutdoorPreference) -> Self {
        match value {
            OutdoorPreference::Homebound => 0,
            OutdoorPreference::SometimesActive => 1,
            OutdoorPreference::VeryActive => 2,
        }
    }
}

/// Question 2: pets already living with the adopter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ExistingPets {
    NoPets,
    Friendly,
    NeedTime,
}

impl TryFrom<u8> for ExistingPets {
    type Error = AnswerError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::NoPets),
            1 => Ok(Self::Friendly),
            2 => Ok(Self::NeedTime),
            answer => Err(AnswerError::OutOfRange { question: 2, answer }),
        }
    }
}

impl From<ExistingPets> for u8 {
    fn from(value: ExistingPets) -> Self {
        match value {
            ExistingPets::NoPets => 0,
            ExistingPets::Friendly => 1,
            ExistingPets::NeedTime => 2,
        }
    }
}

/// Question 3: prior pet-care experience
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ExperienceLevel {
    Novice,
    Experienced,
    SpecialNeeds,
}

impl TryFrom<u8> for ExperienceLevel {
    type Error = AnswerError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Novice),
            1 => Ok(Self::Experienced),
            2 => Ok(Self::SpecialNeeds),
            answer => Err(AnswerError::OutOfRange { question: 3, answer }),
        }
    }
}

impl From<ExperienceLevel> for u8 {
    fn from(value: ExperienceLevel) -> Self {
        match value {
            ExperienceLevel::Novice => 0,
            ExperienceLevel::Experienced => 1,
            ExperienceLevel::SpecialNeeds => 2,
        }
    }
}

/// Question 4: cat, dog or either
///
/// Stored as a nullable boolean: `false` = cat, `true` = dog, `null` = either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum SpeciesPreference {
    Cat,
    Dog,
    #[default]
    Either,
}

impl SpeciesPreference {
    /// Map a raw answer index; anything other than cat or dog means either
    pub fn from_answer(index: u8) -> Self {
        match index {
            0 => Self::Cat,
            1 => Self::Dog,
            _ => Self::Either,
        }
    }

    /// The `species` column value this preference requires, if any
    pub fn species(self) -> Option<bool> {
        match self {
            Self::Cat => Some(false),
            Self::Dog => Some(true),
            Self::Either => None,
        }
    }
}

impl From<Option<bool>> for SpeciesPreference {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(false) => Self::Cat,
            Some(true) => Self::Dog,
            None => Self::Either,
        }
    }
}

impl From<SpeciesPreference> for Option<bool> {
    fn from(value: SpeciesPreference) -> Self {
        value.species()
    }
}

/// A completed questionnaire, as persisted to the `adopter_response` table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionnaireResponse {
    #[serde(rename = "q_outdoor_pref")]
    pub outdoor_preference: OutdoorPreference,
    #[serde(rename = "q_pets")]
    pub existing_pets: ExistingPets,
    #[serde(rename = "q_experience_level")]
    pub experience_level: ExperienceLevel,
    #[serde(rename = "q_preference", default)]
    pub species_preference: SpeciesPreference,
}

/// Answers collected so far in an in-progress questionnaire
///
/// Each answer touches exactly one field; nothing is ever reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResponseDraft {
    #[serde(rename = "q_outdoor_pref", skip_serializing_if = "Option::is_none")]
    pub outdoor_preference: Option<OutdoorPreference>,
    #[serde(rename = "q_pets", skip_serializing_if = "Option::is_none")]
    pub existing_pets: Option<ExistingPets>,
    #[serde(rename = "q_experience_level", skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<ExperienceLevel>,
    #[serde(rename = "q_preference", skip_serializing_if = "Option::is_none")]
    pub species_preference: Option<SpeciesPreference>,
}

impl ResponseDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the answer index chosen for a 1-based question number
    ///
    /// On error the draft is left untouched.
    pub fn apply_answer(&mut self, question: u8, answer: u8) -> Result<(), AnswerError> {
        match question {
            1 => self.outdoor_preference = Some(OutdoorPreference::try_from(answer)?),
            2 => self.existing_pets = Some(ExistingPets::try_from(answer)?),
            3 => self.experience_level = Some(ExperienceLevel::try_from(answer)?),
            4 => self.species_preference = Some(SpeciesPreference::from_answer(answer)),
            other => return Err(AnswerError::UnknownQuestion(other)),
        }
        Ok(())
    }

    /// Builder-style variant of [`ResponseDraft::apply_answer`]
    pub fn with_answer(mut self, question: u8, answer: u8) -> Result<Self, AnswerError> {
        self.apply_answer(question, answer)?;
        Ok(self)
    }

    pub fn is_complete(&self) -> bool {
        self.complete().is_some()
    }

    /// Number of questions answered so far
    pub fn answered(&self) -> u8 {
        [
            self.outdoor_preference.is_some(),
            self.existing_pets.is_some(),
            self.experience_level.is_some(),
            self.species_preference.is_some(),
        ]
        .iter()
        .filter(|answered| **answered)
        .count() as u8
    }

    /// The finished response, or `None` while any answer is missing
    pub fn complete(&self) -> Option<QuestionnaireResponse> {
        Some(QuestionnaireResponse {
            outdoor_preference: self.outdoor_preference?,
            existing_pets: self.existing_pets?,
            experience_level: self.experience_level?,
            species_preference: self.species_preference?,
        })
    }
}

impl From<QuestionnaireResponse> for ResponseDraft {
    fn from(response: QuestionnaireResponse) -> Self {
        Self {
            outdoor_preference: Some(response.outdoor_preference),
            existing_pets: Some(response.existing_pets),
            experience_level: Some(response.experience_level),
            species_preference: Some(response.species_preference),
        }
    }
}

/// A row of the externally owned `Pets` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidatePet {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub long_description: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default)]
    pub age: Option<u8>,
    /// `true` = dog, `false` = cat
    pub species: bool,
    pub energy_level: i32,
    pub good_with_kids: i32,
    pub good_with_pets: i32,
    pub ease_of_care: i32,
}

/// Accept both numeric and string primary keys
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}

/// Entry in a client's liked-pets log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LikedPet {
    #[serde(flatten)]
    pub pet: CandidatePet,
    #[serde(rename = "likedAt")]
    pub liked_at: chrono::DateTime<chrono::Utc>,
}

/// Swipe decision on a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeAction {
    Like,
    Pass,
}

/// Boundaries used when turning answers into store conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterThresholds {
    /// Homebound adopters get pets at or below this energy level
    pub energy_low: i32,
    /// Very active adopters get pets at or above this energy level
    pub energy_high: i32,
    pub pets_friendly_min: i32,
    pub pets_need_time_min: i32,
    pub care_novice_max: i32,
    pub care_experienced_max: i32,
}

impl Default for FilterThresholds {
    fn default() -> Self {
        Self {
            energy_low: 2,
            energy_high: 3,
            pets_friendly_min: 2,
            pets_need_time_min: 3,
            care_novice_max: 1,
            care_experienced_max: 2,
        }
    }
}
