use std::collections::HashMap;

use tracing::trace;

use super::super::catalog::AssociationMatrix;
use super::super::domain::{Answer, AnswerValue, Question};
use super::config::ScoringConfig;
use super::ScoreTable;

pub(crate) struct CategoryTally {
    pub scores: ScoreTable,
    pub detected: HashMap<String, Vec<String>>,
    pub skipped: usize,
}

impl CategoryTally {
    fn record(&mut self, category: &str, score: u32, prompt: &str) {
        self.scores.add(category, score);
        self.detected
            .entry(category.to_string())
            .or_default()
            .push(prompt.to_string());
    }
}

/// One pass over the answers, accumulating per-category scores and the
/// prompts that contributed to them.
pub(crate) fn tally_categories(
    questions: &[Question],
    answers: &[Answer],
    config: &ScoringConfig,
) -> CategoryTally {
    let mut tally = CategoryTally {
        scores: ScoreTable::default(),
        detected: HashMap::new(),
        skipped: 0,
    };

    for answer in answers {
        let Some(question) = questions
            .iter()
            .find(|question| question.id == answer.question_id)
        else {
            trace!(question_id = %answer.question_id, "answer without catalog question ignored");
            tally.skipped += 1;
            continue;
        };

        let Some(category) = question.category.as_deref() else {
            continue;
        };

        match &answer.value {
            AnswerValue::Text(phrase) => {
                let score = config.likert.score(phrase);
                if score > 0 {
                    tally.record(category, score, &question.prompt);
                }
            }
            AnswerValue::Choices(choices) => {
                let selected = choices
                    .iter()
                    .filter(|choice| !config.is_sentinel(choice))
                    .count() as u32;
                if selected > 0 {
                    tally.record(category, selected, &question.prompt);
                }
            }
        }
    }

    tally
}

/// Projects category scores onto the traditional elements:
/// `element += category score * weight` for every defined, non-zero cell.
pub(crate) fn cross_map(categories: &ScoreTable, matrix: &AssociationMatrix) -> ScoreTable {
    let mut elements = ScoreTable::default();
    for entry in categories.iter() {
        for relations in matrix.elements() {
            if let Some(weight) = relations.weight(&entry.key) {
                elements.add(&relations.element, entry.score * weight);
            }
        }
    }
    elements
}
