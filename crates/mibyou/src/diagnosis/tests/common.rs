use std::collections::BTreeMap;
use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::diagnosis::catalog::{
    AssociationMatrix, DiagnosisCatalog, ElementRelations, Herb, RecommendationRecord,
};
use crate::diagnosis::domain::{Answer, Language, Question, QuestionId, QuestionKind};
use crate::diagnosis::scoring::{ScoringConfig, ScoringEngine};
use crate::diagnosis::service::DiagnosisService;

pub(super) fn standard_catalog() -> DiagnosisCatalog {
    DiagnosisCatalog::standard().expect("embedded catalog is valid")
}

pub(super) fn standard_engine() -> ScoringEngine {
    ScoringEngine::new(standard_catalog(), ScoringConfig::standard())
}

pub(super) fn standard_service() -> Arc<DiagnosisService> {
    Arc::new(DiagnosisService::new(
        standard_catalog(),
        ScoringConfig::standard(),
        Language::Ja,
    ))
}

fn likert_question(id: &str, category: &str) -> Question {
    Question {
        id: QuestionId::new(id),
        prompt: format!("{category}の質問 {id}"),
        prompt_en: Some(format!("{category} question {id}")),
        kind: QuestionKind::SingleChoice,
        options: vec![
            "よくある".to_string(),
            "たまにある".to_string(),
            "あまりない".to_string(),
            "ない".to_string(),
        ],
        options_en: vec![
            "Often".to_string(),
            "Sometimes".to_string(),
            "Rarely".to_string(),
            "Never".to_string(),
        ],
        category: Some(category.to_string()),
        category_en: None,
        required: None,
    }
}

/// Two categories ("A", "B"), one checkbox question, one free-text
/// question, and no association matrix unless one is supplied.
pub(super) fn small_catalog(associations: Vec<ElementRelations>) -> DiagnosisCatalog {
    DiagnosisCatalog {
        questions: vec![
            likert_question("q1", "A"),
            likert_question("q2", "B"),
            Question {
                id: QuestionId::new("q3"),
                prompt: "選んでください".to_string(),
                prompt_en: None,
                kind: QuestionKind::MultiChoice,
                options: vec![
                    "めまい".to_string(),
                    "疲れやすい".to_string(),
                    "該当なし".to_string(),
                ],
                options_en: Vec::new(),
                category: Some("A".to_string()),
                category_en: None,
                required: None,
            },
            Question {
                id: QuestionId::new("q4"),
                prompt: "自由記述".to_string(),
                prompt_en: None,
                kind: QuestionKind::FreeText,
                options: Vec::new(),
                options_en: Vec::new(),
                category: None,
                category_en: None,
                required: None,
            },
        ],
        recommendations: vec![RecommendationRecord {
            name: "Aケア".to_string(),
            price: "¥3,000".to_string(),
            treatment_approach: String::new(),
            target_symptoms: vec!["Aの質問".to_string()],
            session_duration: "30分".to_string(),
            recommended_frequency: "週1回".to_string(),
            herbs: vec![Herb {
                name: "陳皮".to_string(),
                properties: vec!["理気".to_string()],
            }],
        }],
        associations: AssociationMatrix(associations),
    }
}

pub(super) fn relations(element: &str, weights: &[(&str, u32)]) -> ElementRelations {
    ElementRelations {
        element: element.to_string(),
        weights: weights
            .iter()
            .map(|(category, weight)| (category.to_string(), *weight))
            .collect::<BTreeMap<_, _>>(),
    }
}

pub(super) fn small_engine(associations: Vec<ElementRelations>) -> ScoringEngine {
    ScoringEngine::new(small_catalog(associations), ScoringConfig::standard())
}

/// Answers touching three categories of the embedded catalog.
pub(super) fn mixed_answers() -> Vec<Answer> {
    vec![
        Answer::new("q1", "よくある"),
        Answer::new("q3", "たまにある"),
        Answer::new("q4", "よくある"),
        Answer::new("q8", "ない"),
        Answer::new("q10", vec!["めまい", "該当なし"]),
    ]
}

pub(super) async fn read_body(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body")
        .to_vec()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = read_body(response).await;
    serde_json::from_slice(&body).expect("json payload")
}
