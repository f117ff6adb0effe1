use serde::{Deserialize, Serialize};

/// Survey rules that are tunable per deployment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyConfig {
    /// Youngest accepted respondent age (inclusive)
    #[serde(default = "default_min_age")]
    pub min_age: i32,
    /// Oldest accepted respondent age (inclusive)
    #[serde(default = "default_max_age")]
    pub max_age: i32,
}

fn default_min_age() -> i32 {
    5
}

fn default_max_age() -> i32 {
    120
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            min_age: default_min_age(),
            max_age: default_max_age(),
        }
    }
}
