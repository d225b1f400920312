use crate::models::{CandidatePet, LikedPet};

/// Matched candidates awaiting a like/pass decision
#[derive(Debug, Clone, Default)]
pub struct SwipeDeck {
    pets: Vec<CandidatePet>,
    liked: Vec<String>,
    passed: Vec<String>,
}

impl SwipeDeck {
    pub fn new(pets: Vec<CandidatePet>) -> Self {
        Self {
            pets,
            liked: Vec::new(),
            passed: Vec::new(),
        }
    }

    fn is_swiped(&self, pet_id: &str) -> bool {
        self.liked.iter().any(|id| id == pet_id) || self.passed.iter().any(|id| id == pet_id)
    }

    fn find_active(&self, pet_id: &str) -> Option<&CandidatePet> {
        if self.is_swiped(pet_id) {
            return None;
        }
        self.pets.iter().find(|pet| pet.id == pet_id)
    }

    /// Pets not yet liked or passed, in store order
    pub fn active(&self) -> impl Iterator<Item = &CandidatePet> {
        self.pets.iter().filter(move |pet| !self.is_swiped(&pet.id))
    }

    /// Like an active pet, returning it so the caller can record it
    ///
    /// Unknown or already swiped ids are ignored.
    pub fn like(&mut self, pet_id: &str) -> Option<CandidatePet> {
        let pet = self.find_active(pet_id)?.clone();
        self.liked.push(pet.id.clone());
        Some(pet)
    }

    /// Pass on an active pet; returns false if there was nothing to pass
    pub fn pass(&mut self, pet_id: &str) -> bool {
        if self.find_active(pet_id).is_none() {
            return false;
        }
        self.passed.push(pet_id.to_string());
        true
    }

    pub fn liked_count(&self) -> usize {
        self.liked.len()
    }

    pub fn passed_count(&self) -> usize {
        self.passed.len()
    }

    pub fn is_finished(&self) -> bool {
        self.active().next().is_none()
    }

    /// Closing message once the deck is exhausted
    pub fn summary(&self) -> Option<String> {
        if !self.is_finished() {
            return None;
        }

        Some(match self.liked.len() {
            0 => "Try adjusting your preferences to see more pets.".to_string(),
            1 => "You liked 1 pet!".to_string(),
            n => format!("You liked {} pets!", n),
        })
    }
}

/// Append-only list of pets a client has liked
///
/// Loaded when a session starts and written back in full after each append.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LikedLog {
    entries: Vec<LikedPet>,
}

impl LikedLog {
    pub fn new(entries: Vec<LikedPet>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[LikedPet] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, pet_id: &str) -> bool {
        self.entries.iter().any(|entry| entry.pet.id == pet_id)
    }

    /// Append a pet; liking the same pet twice keeps the first entry
    pub fn append(&mut self, pet: CandidatePet) -> bool {
        if self.contains(&pet.id) {
            return false;
        }
        self.entries.push(LikedPet {
            pet,
            liked_at: chrono::Utc::now(),
        });
        true
    }
}
