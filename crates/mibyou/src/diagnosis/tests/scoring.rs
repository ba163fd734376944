use super::common::*;
use crate::diagnosis::domain::{Answer, QuestionKind};
use crate::diagnosis::scoring::{DiagnosisResult, Dimension, TRADITIONAL_SCORE_THRESHOLD};

fn labels(results: &[DiagnosisResult]) -> Vec<&str> {
    results.iter().map(|result| result.label.as_str()).collect()
}

fn recommendation_names(result: &DiagnosisResult) -> Vec<&str> {
    result
        .recommendations
        .iter()
        .map(|record| record.name.as_str())
        .collect()
}

#[test]
fn single_frequent_answer_yields_one_functional_result() {
    let engine = small_engine(Vec::new());

    let report = engine.evaluate(&[Answer::new("q1", "よくある")]);

    assert_eq!(report.category_scores.get("A"), Some(3));
    assert_eq!(report.results.len(), 1);
    let result = &report.results[0];
    assert_eq!(result.dimension, Dimension::Functional);
    assert_eq!(result.label, "機能医学: A");
    assert_eq!(result.score, 3);
    assert_eq!(result.symptoms, vec!["Aの質問 q1".to_string()]);
    assert_eq!(recommendation_names(result), vec!["Aケア"]);
}

#[test]
fn never_answers_produce_no_results() {
    let engine = standard_engine();
    let answers: Vec<Answer> = engine
        .catalog()
        .questions
        .iter()
        .map(|question| Answer::new(question.id.as_str(), "Never"))
        .collect();

    let report = engine.evaluate(&answers);

    assert!(report.is_empty());
    assert!(report.category_scores.is_empty());
    assert!(report.element_scores.is_empty());
}

#[test]
fn sentinel_only_selection_contributes_nothing() {
    let engine = small_engine(Vec::new());

    let report = engine.evaluate(&[Answer::new("q3", vec!["該当なし"])]);

    assert!(report.category_scores.is_empty());
    assert!(report.results.is_empty());
}

#[test]
fn unknown_phrases_and_questions_are_ignored() {
    let engine = small_engine(Vec::new());

    let report = engine.evaluate(&[
        Answer::new("q1", "xyz"),
        Answer::new("q99", "よくある"),
        Answer::new("q4", "頭が重い"),
    ]);

    assert!(report.results.is_empty());
}

#[test]
fn selection_count_adds_to_category_score() {
    let engine = small_engine(Vec::new());

    let report = engine.evaluate(&[
        Answer::new("q1", "あまりない"),
        Answer::new("q3", vec!["めまい", "疲れやすい", "None applicable"]),
    ]);

    assert_eq!(report.category_scores.get("A"), Some(3));
    assert_eq!(report.results[0].symptoms.len(), 2);
}

#[test]
fn element_scores_follow_weighted_sum() {
    let engine = small_engine(vec![
        relations("気", &[("A", 2), ("B", 1)]),
        relations("血", &[("B", 3)]),
        relations("水", &[("A", 0)]),
    ]);

    let report = engine.evaluate(&[
        Answer::new("q1", "たまにある"),
        Answer::new("q2", "Often"),
    ]);

    assert_eq!(report.category_scores.get("A"), Some(2));
    assert_eq!(report.category_scores.get("B"), Some(3));
    assert_eq!(report.element_scores.get("気"), Some(2 * 2 + 3));
    assert_eq!(report.element_scores.get("血"), Some(9));
    assert_eq!(report.element_scores.get("水"), None);
}

#[test]
fn element_results_require_score_above_threshold() {
    let engine = small_engine(vec![relations("気", &[("A", 1)])]);

    let at_threshold = engine.evaluate(&[Answer::new("q1", "たまにある")]);
    assert_eq!(at_threshold.element_scores.get("気"), Some(TRADITIONAL_SCORE_THRESHOLD));
    assert!(at_threshold
        .results
        .iter()
        .all(|result| result.dimension == Dimension::Functional));

    let above = engine.evaluate(&[Answer::new("q1", "よくある")]);
    let traditional: Vec<&DiagnosisResult> = above
        .results
        .iter()
        .filter(|result| result.dimension == Dimension::Traditional)
        .collect();
    assert_eq!(traditional.len(), 1);
    assert_eq!(traditional[0].label, "伝統医学: 気の不調");
    assert!(traditional[0].symptoms.is_empty());
    assert_eq!(recommendation_names(traditional[0]), vec!["Aケア"]);
}

#[test]
fn standard_catalog_ranks_mixed_answers() {
    let engine = standard_engine();

    let report = engine.evaluate(&mixed_answers());

    assert_eq!(report.category_scores.get("自律神経"), Some(6));
    assert_eq!(report.category_scores.get("ホルモン"), Some(3));
    assert_eq!(report.element_scores.get("気"), Some(21));
    assert_eq!(report.element_scores.get("血"), Some(15));
    assert_eq!(report.element_scores.get("精"), Some(6));
    assert_eq!(report.element_scores.get("水"), None);

    assert_eq!(
        labels(&report.results),
        vec![
            "伝統医学: 気の不調",
            "伝統医学: 血の不調",
            "機能医学: 自律神経",
            "伝統医学: 精の不調",
            "機能医学: ホルモン",
        ]
    );

    assert_eq!(
        recommendation_names(&report.results[0]),
        vec!["自律神経調整ヘッドスパ", "免疫ケア薬膳コース"]
    );
    assert_eq!(
        recommendation_names(&report.results[1]),
        vec!["温活よもぎ蒸し", "美肌アロマトリートメント"]
    );
    assert_eq!(
        recommendation_names(&report.results[2]),
        vec!["自律神経調整ヘッドスパ"]
    );
    assert_eq!(
        recommendation_names(&report.results[3]),
        vec!["免疫ケア薬膳コース", "腎精養生鍼灸"]
    );
    assert_eq!(
        recommendation_names(&report.results[4]),
        vec!["温活よもぎ蒸し"]
    );
}

#[test]
fn ties_keep_functional_entries_first() {
    let engine = standard_engine();

    let report = engine.evaluate(&[Answer::new("q1", "よくある")]);

    assert_eq!(
        labels(&report.results),
        vec!["伝統医学: 気の不調", "機能医学: 自律神経", "伝統医学: 血の不調"]
    );
}

#[test]
fn results_are_sorted_and_capped() {
    let engine = standard_engine();
    let answers: Vec<Answer> = engine
        .catalog()
        .questions
        .iter()
        .map(|question| {
            if question.kind == QuestionKind::MultiChoice {
                let everything: Vec<&str> = question.options.iter().map(String::as_str).collect();
                Answer::new(question.id.as_str(), everything)
            } else {
                Answer::new(question.id.as_str(), "よくある")
            }
        })
        .collect();

    let report = engine.evaluate(&answers);

    assert!(!report.results.is_empty());
    assert!(report
        .results
        .windows(2)
        .all(|pair| pair[0].score >= pair[1].score));
    assert!(report
        .results
        .iter()
        .all(|result| result.recommendations.len() <= 2));
}

#[test]
fn evaluation_is_idempotent() {
    let engine = standard_engine();
    let answers = mixed_answers();

    assert_eq!(engine.evaluate(&answers), engine.evaluate(&answers));
}
