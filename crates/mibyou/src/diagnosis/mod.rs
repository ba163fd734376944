//! Symptom questionnaire: catalog data, the question flow, and the rule-based
//! scoring that ranks functional categories and traditional elements.

pub mod catalog;
pub mod domain;
pub mod export;
pub mod flow;
pub mod matcher;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use catalog::{
    AssociationMatrix, CatalogError, DiagnosisCatalog, ElementRelations, Herb,
    RecommendationRecord,
};
pub use domain::{Answer, AnswerValue, Language, Question, QuestionId, QuestionKind};
pub use export::{render_text, write_text, ExportError, EXPORT_FILE_NAME};
pub use flow::{Advance, QuestionFlow};
pub use matcher::{RecommendationMatcher, MAX_RECOMMENDATIONS};
pub use router::diagnosis_router;
pub use scoring::{
    Dimension, DiagnosisReport, DiagnosisResult, LikertScale, ScoreEntry, ScoreTable,
    ScoringConfig, ScoringEngine, TRADITIONAL_SCORE_THRESHOLD,
};
pub use service::{DiagnosisService, OptionView, QuestionView};
