use chrono::{Datelike, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;
use crate::error::VocabError;
use super::model::Difficulty;

pub const BEGINNER: [&str; 24] = [
    "happy", "sad", "big", "small", "fast", "slow",
    "good", "bad", "hot", "cold", "easy", "hard",
    "new", "old", "young", "tall", "short", "loud",
    "quiet", "clean", "dirty", "light", "dark", "strong",
];

pub const INTERMEDIATE: [&str; 16] = [
    "accomplish", "benevolent", "candid", "diligent",
    "eloquent", "facilitate", "gratitude", "humble",
    "innovative", "judicious", "keen", "luminous",
    "meticulous", "nurture", "optimize", "profound",
];

pub const ADVANCED: [&str; 16] = [
    "aberration", "byzantine", "cacophony", "deleterious",
    "ephemeral", "fastidious", "garrulous", "hegemony",
    "ineffable", "juxtapose", "kaleidoscopic", "labyrinthine",
    "mellifluous", "nefarious", "obfuscate", "paradigm",
];

pub fn words_for(tier: Difficulty) -> &'static [&'static str] {
    match tier {
        Difficulty::Beginner => &BEGINNER,
        Difficulty::Intermediate => &INTERMEDIATE,
        Difficulty::Advanced => &ADVANCED,
    }
}

/// Uniform draw from a tier's list
pub fn random_word<R: Rng + ?Sized>(tier: Difficulty, rng: &mut R) -> &'static str {
    words_for(tier)
        .choose(rng)
        .copied()
        // lists are non-empty constants
        .unwrap_or(INTERMEDIATE[0])
}

/// Uniform draw among the tier's words accepted by `keep`
pub fn random_word_where<R, F>(tier: Difficulty, keep: F, rng: &mut R) -> Option<&'static str>
where
    R: Rng + ?Sized,
    F: Fn(&str) -> bool,
{
    let candidates: Vec<&'static str> = words_for(tier)
        .iter()
        .copied()
        .filter(|w| keep(w))
        .collect();
    candidates.choose(rng).copied()
}

/// Uniform draw that avoids `exclude` when the tier has any other word
pub fn random_word_except<R: Rng + ?Sized>(tier: Difficulty, exclude: &str, rng: &mut R) -> &'static str {
    random_word_where(tier, |w| w != exclude, rng).unwrap_or_else(|| random_word(tier, rng))
}

pub fn random_tier<R: Rng + ?Sized>(rng: &mut R) -> Difficulty {
    Difficulty::ALL[rng.gen_range(0..Difficulty::ALL.len())]
}

/// Same intermediate word for everyone on a given calendar day
pub fn word_for_date(date: NaiveDate) -> &'static str {
    let index = date.num_days_from_ce().rem_euclid(INTERMEDIATE.len() as i32) as usize;
    INTERMEDIATE[index]
}

pub fn difficulty_of(word: &str) -> Option<Difficulty> {
    let word = word.trim().to_lowercase();
    Difficulty::ALL
        .into_iter()
        .find(|tier| words_for(*tier).contains(&word.as_str()))
}

/// Trim, lowercase and require ASCII letters only
pub fn validate_word(raw: &str) -> Result<String, VocabError> {
    let word = raw.trim().to_lowercase();
    if word.is_empty() {
        return Err(VocabError::invalid_input("Word is empty after trimming"));
    }
    if !word.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(VocabError::invalid_input("Word contains non-letter characters")
            .with_word(word));
    }
    Ok(word)
}
