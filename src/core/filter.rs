use serde::Serialize;
use crate::models::CandidatePet;

/// Pet columns the match filter can constrain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PetField {
    Species,
    EnergyLevel,
    GoodWithPets,
    EaseOfCare,
}

impl PetField {
    /// Column name in the pets table
    pub fn column(self) -> &'static str {
        match self {
            Self::Species => "species",
            Self::EnergyLevel => "energy_level",
            Self::GoodWithPets => "good_with_pets",
            Self::EaseOfCare => "ease_of_care",
        }
    }

    fn value_of(self, pet: &CandidatePet) -> i32 {
        match self {
            Self::Species => pet.species as i32,
            Self::EnergyLevel => pet.energy_level,
            Self::GoodWithPets => pet.good_with_pets,
            Self::EaseOfCare => pet.ease_of_care,
        }
    }
}

/// Comparison applied to a single column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "op", content = "value", rename_all = "snake_case")]
pub enum Comparison {
    EqBool(bool),
    Gte(i32),
    Lte(i32),
}

/// One `column <op> value` condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Condition {
    pub field: PetField,
    #[serde(flatten)]
    pub comparison: Comparison,
}

impl Condition {
    pub fn eq_bool(field: PetField, value: bool) -> Self {
        Self { field, comparison: Comparison::EqBool(value) }
    }

    pub fn gte(field: PetField, value: i32) -> Self {
        Self { field, comparison: Comparison::Gte(value) }
    }

    pub fn lte(field: PetField, value: i32) -> Self {
        Self { field, comparison: Comparison::Lte(value) }
    }

    #[inline]
    pub fn accepts(&self, pet: &CandidatePet) -> bool {
        match self.comparison {
            Comparison::EqBool(expected) => {
                self.field == PetField::Species && pet.species == expected
            }
            Comparison::Gte(bound) => self.field.value_of(pet) >= bound,
            Comparison::Lte(bound) => self.field.value_of(pet) <= bound,
        }
    }
}

/// Conjunction of conditions sent to the pet store
///
/// An empty query matches every pet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PetQuery {
    conditions: Vec<Condition>,
}

impl PetQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, condition: Condition) {
        self.conditions.push(condition);
    }

    pub fn and(mut self, condition: Condition) -> Self {
        self.push(condition);
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Conditions touching a single column
    pub fn on(&self, field: PetField) -> impl Iterator<Item = &Condition> {
        self.conditions.iter().filter(move |c| c.field == field)
    }

    /// Evaluate the conjunction locally
    ///
    /// The store evaluates the same predicate server-side; this is used to
    /// check store results, never to select candidates.
    pub fn accepts(&self, pet: &CandidatePet) -> bool {
        self.conditions.iter().all(|c| c.accepts(pet))
    }
}
