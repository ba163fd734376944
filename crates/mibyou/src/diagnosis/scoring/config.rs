use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

const FREQUENCY_SCALE: [(&str, &str, u32); 4] = [
    ("よくある", "Often", 3),
    ("たまにある", "Sometimes", 2),
    ("あまりない", "Rarely", 1),
    ("ない", "Never", 0),
];

const CONCERN_SCALE: [(&str, &str, u32); 4] = [
    ("とても気になる", "Very concerned", 3),
    ("少し気になる", "Somewhat concerned", 2),
    ("あまり気にならない", "Not much concerned", 1),
    ("気にならない", "Not concerned", 0),
];

/// Phrase to integer mapping for the four-level answer scales.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LikertScale(BTreeMap<String, u32>);

impl LikertScale {
    /// Frequency and concern scales with their Japanese and English phrases.
    pub fn standard() -> Self {
        let entries = FREQUENCY_SCALE
            .iter()
            .chain(CONCERN_SCALE.iter())
            .flat_map(|(ja, en, score)| [(ja.to_string(), *score), (en.to_string(), *score)])
            .collect();
        Self(entries)
    }

    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        Self(
            entries
                .into_iter()
                .map(|(phrase, score)| (phrase.into(), score))
                .collect(),
        )
    }

    /// Unrecognized phrases score zero.
    pub fn score(&self, phrase: &str) -> u32 {
        self.0.get(phrase).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Lookup tables the scoring engine is parameterised with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub likert: LikertScale,
    /// "None applicable" options dropped from multi-choice selections.
    pub sentinels: Vec<String>,
}

impl ScoringConfig {
    pub fn standard() -> Self {
        Self {
            likert: LikertScale::standard(),
            sentinels: vec!["該当なし".to_string(), "None applicable".to_string()],
        }
    }

    pub fn is_sentinel(&self, value: &str) -> bool {
        self.sentinels.iter().any(|sentinel| sentinel == value)
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self::standard()
    }
}
