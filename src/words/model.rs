use serde::{Serialize, Deserialize};
use std::fmt;

pub const NO_DEFINITION: &str = "No definition available";

/// Canonical, normalized thesaurus entry for one word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordRecord {
    pub word: String,
    pub part_of_speech: String,
    /// First element is the primary definition
    pub definitions: Vec<String>,
    pub synonyms: Vec<String>,
    pub antonyms: Vec<String>,
    pub examples: Vec<String>,
    /// First known use, as reported by the thesaurus
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub offensive: bool,
}

impl WordRecord {
    pub fn primary_definition(&self) -> Option<&str> {
        self.definitions.first().map(String::as_str)
    }

    /// Flashcard text: the primary definition or a placeholder
    pub fn meaning(&self) -> &str {
        self.primary_definition().unwrap_or(NO_DEFINITION)
    }
}

/// Word list tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }

    /// Unknown names fall back to intermediate
    pub fn parse_lenient(name: &str) -> Difficulty {
        match name.trim().to_lowercase().as_str() {
            "beginner" => Difficulty::Beginner,
            "intermediate" => Difficulty::Intermediate,
            "advanced" => Difficulty::Advanced,
            other => {
                tracing::warn!(tier = %other, "Unknown difficulty tier, defaulting to intermediate");
                Difficulty::Intermediate
            }
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
