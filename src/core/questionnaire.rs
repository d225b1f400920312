use serde::Serialize;
use crate::models::QUESTION_COUNT;

/// One selectable answer
///
/// Option order matches the stored encoding, so the option index is the value
/// written to the response record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuestionOption {
    Text { text: &'static str },
    Image { text: &'static str, image: &'static str },
}

impl QuestionOption {
    pub fn text(&self) -> &'static str {
        match self {
            Self::Text { text } | Self::Image { text, .. } => *text,
        }
    }
}

/// A questionnaire step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    pub number: u8,
    pub title: &'static str,
    pub options: &'static [QuestionOption],
}

/// Filled progress segments out of the total step count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub current: u8,
    pub total: u8,
}

impl Progress {
    pub fn is_filled(&self, segment: u8) -> bool {
        segment < self.current
    }
}

pub static QUESTIONS: [Question; QUESTION_COUNT as usize] = [
    Question {
        number: 1,
        title: "Do you consider yourself an active and outdoorsy person?",
        options: &[
            QuestionOption::Text { text: "My best life is at home" },
            QuestionOption::Text { text: "Some times, not all weekends" },
            QuestionOption::Text { text: "Yes, I love sports and outdoors life!" },
        ],
    },
    Question {
        number: 2,
        title: "Do you already have pets?",
        options: &[
            QuestionOption::Text { text: "I don't have any pets" },
            QuestionOption::Text { text: "Yes, and they are friendly" },
            QuestionOption::Text { text: "Yes, but they will need some time" },
        ],
    },
    Question {
        number: 3,
        title: "Have you had pets before?",
        options: &[
            QuestionOption::Text { text: "No" },
            QuestionOption::Text { text: "Yes" },
            QuestionOption::Text { text: "Yes, and they had special needs" },
        ],
    },
    Question {
        number: 4,
        title: "Are you hoping for a cat or a dog?",
        options: &[
            QuestionOption::Image { text: "Cat", image: "assets/cat-sample.jpg" },
            QuestionOption::Image { text: "Dog", image: "assets/dog-sample.jpg" },
            QuestionOption::Image { text: "Either", image: "assets/either-sample.jpg" },
        ],
    },
];

/// Static questionnaire catalog
pub struct Questionnaire;

impl Questionnaire {
    pub fn questions() -> &'static [Question] {
        &QUESTIONS
    }

    /// Question for a 1-based step number
    pub fn step(step: u8) -> Option<&'static Question> {
        step.checked_sub(1)
            .and_then(|index| QUESTIONS.get(index as usize))
    }

    /// Parse a raw step parameter; anything unusable falls back to step 1
    pub fn resolve_step(raw: &str) -> u8 {
        match raw.trim().parse::<u8>() {
            Ok(step) if (1..=QUESTION_COUNT).contains(&step) => step,
            _ => 1,
        }
    }

    pub fn progress(step: u8) -> Progress {
        Progress {
            current: step.min(QUESTION_COUNT),
            total: QUESTION_COUNT,
        }
    }

    pub fn is_last_step(step: u8) -> bool {
        step == QUESTION_COUNT
    }
}
