use serde::Serialize;

use super::domain::{Answer, AnswerValue, Question, QuestionId};

/// Result of asking the flow to move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome", content = "index")]
pub enum Advance {
    Moved(usize),
    /// Already on the last question; the caller moves on to results.
    AtEnd,
    /// The current question still needs an answer.
    Blocked,
}

/// Walks the respondent through the ordered question list and owns the
/// answer set.
#[derive(Debug, Clone)]
pub struct QuestionFlow {
    questions: Vec<Question>,
    answers: Vec<Answer>,
    index: usize,
}

impl QuestionFlow {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            answers: Vec::new(),
            index: 0,
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.index)
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.questions.len()
    }

    /// 1-based position and total question count.
    pub fn progress(&self) -> (usize, usize) {
        let total = self.questions.len();
        ((self.index + 1).min(total), total)
    }

    pub fn answer_for(&self, id: &QuestionId) -> Option<&AnswerValue> {
        self.answers
            .iter()
            .find(|answer| &answer.question_id == id)
            .map(|answer| &answer.value)
    }

    /// Inserts or overwrites the answer for `question_id`.
    pub fn answer(&mut self, question_id: QuestionId, value: AnswerValue) {
        match self
            .answers
            .iter_mut()
            .find(|answer| answer.question_id == question_id)
        {
            Some(existing) => existing.value = value,
            None => self.answers.push(Answer { question_id, value }),
        }
    }

    /// Adds `option` to a multi-choice selection, or removes it when already
    /// selected. A previous text answer is replaced.
    pub fn toggle(&mut self, question_id: QuestionId, option: &str) {
        let mut selections = self
            .answer_for(&question_id)
            .and_then(AnswerValue::as_choices)
            .map(<[String]>::to_vec)
            .unwrap_or_default();

        if let Some(position) = selections.iter().position(|selected| selected == option) {
            selections.remove(position);
        } else {
            selections.push(option.to_string());
        }

        self.answer(question_id, AnswerValue::Choices(selections));
    }

    pub fn can_advance(&self) -> bool {
        let Some(question) = self.current() else {
            return false;
        };

        if !question.is_required() {
            return true;
        }

        self.answer_for(&question.id)
            .map(|value| !value.is_empty())
            .unwrap_or(false)
    }

    pub fn next(&mut self) -> Advance {
        if !self.can_advance() {
            return Advance::Blocked;
        }
        if self.is_last() {
            return Advance::AtEnd;
        }
        self.index += 1;
        Advance::Moved(self.index)
    }

    /// Steps back one question; `None` when already on the first.
    pub fn prev(&mut self) -> Option<usize> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(self.index)
    }

    pub fn restart(&mut self) {
        self.answers.clear();
        self.index = 0;
    }
}
