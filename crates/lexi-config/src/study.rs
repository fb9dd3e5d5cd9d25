use serde::{Deserialize, Serialize};

/// How a card is presented: flip-and-grade, or type the word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudyMode {
    #[default]
    Memory,
    Spelling,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct StudyConfig {
    /// Mode used when studying new cards
    pub study_mode: StudyMode,
    /// Mode used when reviewing due cards
    pub review_mode: StudyMode,
}

impl StudyConfig {
    pub fn new() -> Self {
        Self {
            study_mode: StudyMode::Memory,
            review_mode: StudyMode::Spelling,
        }
    }
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self::new()
    }
}
