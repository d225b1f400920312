use serde::Serialize;
use crate::models::CandidatePet;

/// Short tag describing a pet's energy on its card
#[inline]
pub fn energy_tag(level: i32) -> &'static str {
    if level >= 2 {
        "Playful"
    } else if level == 1 {
        "Moderate"
    } else {
        "Calm"
    }
}

#[inline]
pub fn setting_tag(energy_level: i32) -> &'static str {
    if energy_level >= 2 {
        "Outdoors"
    } else {
        "Indoors"
    }
}

#[inline]
pub fn kids_tag(good_with_kids: i32) -> &'static str {
    if good_with_kids >= 1 {
        "Kid-friendly"
    } else {
        "Adults only"
    }
}

/// Severity used by clients to colour detail labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelVariant {
    Success,
    Warning,
    Danger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Label {
    pub text: &'static str,
    pub variant: LabelVariant,
}

/// Energy label on the details page
pub fn energy_label(level: i32) -> Label {
    if level >= 3 {
        Label { text: "High Energy", variant: LabelVariant::Success }
    } else if level >= 2 {
        Label { text: "Medium Energy", variant: LabelVariant::Warning }
    } else {
        Label { text: "Low Energy", variant: LabelVariant::Danger }
    }
}

/// Compatibility label for kids or other pets
pub fn compatibility_label(level: i32) -> Label {
    if level >= 3 {
        Label { text: "Good", variant: LabelVariant::Success }
    } else if level >= 2 {
        Label { text: "Will Take Time", variant: LabelVariant::Warning }
    } else {
        Label { text: "Bad", variant: LabelVariant::Danger }
    }
}

#[inline]
pub fn has_special_needs(ease_of_care: i32) -> bool {
    ease_of_care >= 3
}

pub fn species_name(species: bool) -> &'static str {
    if species {
        "Dog"
    } else {
        "Cat"
    }
}

/// Stored age, or a stable 1-8 year placeholder derived from the pet id
///
/// A stored age of 0 counts as unknown.
pub fn display_age(pet: &CandidatePet) -> u8 {
    if let Some(age) = pet.age.filter(|age| *age > 0) {
        return age;
    }
    let seed: u32 = pet.id.chars().map(|c| c as u32).sum();
    (seed % 8) as u8 + 1
}

pub fn display_description(pet: &CandidatePet) -> String {
    match pet.description.as_deref() {
        Some(description) if !description.trim().is_empty() => description.to_string(),
        _ => format!(
            "Meet {}, a {} looking for their forever home.",
            pet.name,
            species_name(pet.species).to_lowercase()
        ),
    }
}

/// Card and detail view of a candidate pet
#[derive(Debug, Clone, Serialize)]
pub struct PetCardView {
    pub id: String,
    pub name: String,
    pub species: &'static str,
    pub age: u8,
    pub description: String,
    #[serde(rename = "longDescription", skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    pub tags: [&'static str; 3],
    pub energy: Label,
    #[serde(rename = "goodWithKids")]
    pub good_with_kids: Label,
    #[serde(rename = "goodWithPets")]
    pub good_with_pets: Label,
    #[serde(rename = "specialNeeds")]
    pub special_needs: bool,
}

impl From<&CandidatePet> for PetCardView {
    fn from(pet: &CandidatePet) -> Self {
        Self {
            id: pet.id.clone(),
            name: pet.name.clone(),
            species: species_name(pet.species),
            age: display_age(pet),
            description: display_description(pet),
            long_description: pet.long_description.clone(),
            picture: pet.picture.clone(),
            tags: [
                setting_tag(pet.energy_level),
                energy_tag(pet.energy_level),
                kids_tag(pet.good_with_kids),
            ],
            energy: energy_label(pet.energy_level),
            good_with_kids: compatibility_label(pet.good_with_kids),
            good_with_pets: compatibility_label(pet.good_with_pets),
            special_needs: has_special_needs(pet.ease_of_care),
        }
    }
}
