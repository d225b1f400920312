use crate::models::{
    ExistingPets, ExperienceLevel, FilterThresholds, OutdoorPreference, QuestionnaireResponse,
};
use crate::core::filter::{Condition, PetField, PetQuery};

/// Maps a completed questionnaire onto pet store conditions
///
/// Each answer contributes at most one clause family and all clauses are
/// ANDed:
/// 1. Species preference (cat/dog, nothing for "either")
/// 2. Energy level band from the outdoor answer
/// 3. Minimum pet compatibility from the existing-pets answer
/// 4. Maximum care difficulty from the experience answer
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchFilter {
    thresholds: FilterThresholds,
}

impl MatchFilter {
    pub fn new(thresholds: FilterThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &FilterThresholds {
        &self.thresholds
    }

    /// Build the store query for a completed response
    pub fn build_query(&self, response: &QuestionnaireResponse) -> PetQuery {
        let t = &self.thresholds;
        let mut query = PetQuery::new();

        if let Some(species) = response.species_preference.species() {
            query.push(Condition::eq_bool(PetField::Species, species));
        }

        match response.outdoor_preference {
            OutdoorPreference::Homebound => {
                query.push(Condition::lte(PetField::EnergyLevel, t.energy_low));
            }
            OutdoorPreference::SometimesActive => {
                query.push(Condition::gte(PetField::EnergyLevel, t.energy_low));
                query.push(Condition::lte(PetField::EnergyLevel, t.energy_high));
            }
            OutdoorPreference::VeryActive => {
                query.push(Condition::gte(PetField::EnergyLevel, t.energy_high));
            }
        }

        match response.existing_pets {
            ExistingPets::NoPets => {}
            ExistingPets::Friendly => {
                query.push(Condition::gte(PetField::GoodWithPets, t.pets_friendly_min));
            }
            ExistingPets::NeedTime => {
                query.push(Condition::gte(PetField::GoodWithPets, t.pets_need_time_min));
            }
        }

        match response.experience_level {
            ExperienceLevel::Novice => {
                query.push(Condition::lte(PetField::EaseOfCare, t.care_novice_max));
            }
            ExperienceLevel::Experienced => {
                query.push(Condition::lte(PetField::EaseOfCare, t.care_experienced_max));
            }
            ExperienceLevel::SpecialNeeds => {}
        }

        query
    }
}
