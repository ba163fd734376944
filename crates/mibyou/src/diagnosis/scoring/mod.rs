mod config;
mod rules;

pub use config::{LikertScale, ScoringConfig};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::catalog::{DiagnosisCatalog, RecommendationRecord};
use super::domain::Answer;
use super::matcher::RecommendationMatcher;

/// Element scores at or below this value are treated as noise.
pub const TRADITIONAL_SCORE_THRESHOLD: u32 = 2;

/// Stateless evaluator that scores an answer set against the catalog.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    catalog: DiagnosisCatalog,
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(catalog: DiagnosisCatalog, config: ScoringConfig) -> Self {
        Self { catalog, config }
    }

    pub fn catalog(&self) -> &DiagnosisCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn evaluate(&self, answers: &[Answer]) -> DiagnosisReport {
        let tally = rules::tally_categories(&self.catalog.questions, answers, &self.config);
        let element_scores = rules::cross_map(&tally.scores, &self.catalog.associations);
        let matcher = RecommendationMatcher::new(&self.catalog.recommendations);

        let mut results = Vec::new();

        for entry in tally.scores.iter().filter(|entry| entry.score > 0) {
            let symptoms = tally.detected.get(&entry.key).cloned().unwrap_or_default();
            results.push(DiagnosisResult {
                dimension: Dimension::Functional,
                label: Dimension::Functional.label_for(&entry.key),
                key: entry.key.clone(),
                score: entry.score,
                recommendations: matcher.functional(&entry.key, &symptoms),
                symptoms,
            });
        }

        for entry in element_scores
            .iter()
            .filter(|entry| entry.score > TRADITIONAL_SCORE_THRESHOLD)
        {
            results.push(DiagnosisResult {
                dimension: Dimension::Traditional,
                label: Dimension::Traditional.label_for(&entry.key),
                key: entry.key.clone(),
                score: entry.score,
                symptoms: Vec::new(),
                recommendations: matcher.traditional(&entry.key),
            });
        }

        // stable: ties keep encounter order
        results.sort_by(|a, b| b.score.cmp(&a.score));

        debug!(
            answers = answers.len(),
            skipped = tally.skipped,
            categories = tally.scores.len(),
            elements = element_scores.len(),
            results = results.len(),
            "diagnosis evaluated"
        );

        DiagnosisReport {
            category_scores: tally.scores,
            element_scores,
            results,
        }
    }
}

/// Which medical perspective a result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Functional,
    Traditional,
}

impl Dimension {
    pub fn label_for(self, key: &str) -> String {
        match self {
            Dimension::Functional => format!("機能医学: {key}"),
            Dimension::Traditional => format!("伝統医学: {key}の不調"),
        }
    }
}

/// Insertion-ordered name to score table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreTable(Vec<ScoreEntry>);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub key: String,
    pub score: u32,
}

impl ScoreTable {
    pub fn add(&mut self, key: &str, amount: u32) {
        match self.0.iter_mut().find(|entry| entry.key == key) {
            Some(entry) => entry.score += amount,
            None => self.0.push(ScoreEntry {
                key: key.to_string(),
                score: amount,
            }),
        }
    }

    pub fn get(&self, key: &str) -> Option<u32> {
        self.0
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.score)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScoreEntry> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Ranked finding for a category or element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisResult {
    pub dimension: Dimension,
    pub key: String,
    pub label: String,
    pub score: u32,
    pub symptoms: Vec<String>,
    pub recommendations: Vec<RecommendationRecord>,
}

/// Scores and ranked results derived from one answer set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisReport {
    pub category_scores: ScoreTable,
    pub element_scores: ScoreTable,
    pub results: Vec<DiagnosisResult>,
}

impl DiagnosisReport {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
