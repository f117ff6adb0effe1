use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The fixed set of Likert hobby statements every respondent must rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum HobbyQuestion {
    Movies,
    Music,
    Radio,
    EatOut,
    Tv,
}

impl HobbyQuestion {
    pub const ALL: [HobbyQuestion; 5] = [
        HobbyQuestion::Movies,
        HobbyQuestion::Music,
        HobbyQuestion::Radio,
        HobbyQuestion::EatOut,
        HobbyQuestion::Tv,
    ];

    /// Short stable key used in URLs and summaries
    pub fn key(&self) -> &'static str {
        match self {
            HobbyQuestion::Movies => "movies",
            HobbyQuestion::Music => "music",
            HobbyQuestion::Radio => "radio",
            HobbyQuestion::EatOut => "eat_out",
            HobbyQuestion::Tv => "tv",
        }
    }

    /// Statement shown on the form; this is what gets stored as the hobby label
    pub fn label(&self) -> &'static str {
        match self {
            HobbyQuestion::Movies => "I like to watch movies",
            HobbyQuestion::Music => "I like to listen to music",
            HobbyQuestion::Radio => "I like to listen to radio",
            HobbyQuestion::EatOut => "I like to eat out",
            HobbyQuestion::Tv => "I like to watch TV",
        }
    }

    /// Resolve a rating key sent by a client, accepting either the label or the short key
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL.into_iter().find(|question| {
            question.label().eq_ignore_ascii_case(value) || question.key().eq_ignore_ascii_case(value)
        })
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|question| question.label() == label)
    }
}

/// Food choices offered as checkboxes on the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum FoodChoice {
    Pizza,
    Pasta,
    PapAndWors,
    Other,
}

impl FoodChoice {
    pub const ALL: [FoodChoice; 4] = [
        FoodChoice::Pizza,
        FoodChoice::Pasta,
        FoodChoice::PapAndWors,
        FoodChoice::Other,
    ];

    /// Choices reported on the results page
    pub const REPORTED: [FoodChoice; 3] =
        [FoodChoice::Pizza, FoodChoice::Pasta, FoodChoice::PapAndWors];

    pub fn label(&self) -> &'static str {
        match self {
            FoodChoice::Pizza => "Pizza",
            FoodChoice::Pasta => "Pasta",
            FoodChoice::PapAndWors => "Pap and Wors",
            FoodChoice::Other => "Other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|choice| choice.label().eq_ignore_ascii_case(value))
    }
}

/// Canonical stored form of a food label: known choices get their canonical
/// spelling, free text is kept as typed (trimmed).
pub fn normalize_food_label(value: &str) -> String {
    match FoodChoice::parse(value) {
        Some(choice) => choice.label().to_string(),
        None => value.trim().to_string(),
    }
}
