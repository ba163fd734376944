use serde::Serialize;
use tracing::info;

use super::catalog::DiagnosisCatalog;
use super::domain::{Answer, Language, Question, QuestionId, QuestionKind};
use super::export::render_text;
use super::flow::QuestionFlow;
use super::scoring::{DiagnosisReport, ScoringConfig, ScoringEngine};

/// Facade shared by the HTTP router and the CLI: serves localized
/// questions, starts flows, and scores answer sets.
pub struct DiagnosisService {
    engine: ScoringEngine,
    default_language: Language,
}

impl DiagnosisService {
    pub fn new(catalog: DiagnosisCatalog, config: ScoringConfig, default_language: Language) -> Self {
        info!(
            questions = catalog.questions.len(),
            recommendations = catalog.recommendations.len(),
            "diagnosis catalog loaded"
        );
        Self {
            engine: ScoringEngine::new(catalog, config),
            default_language,
        }
    }

    pub fn default_language(&self) -> Language {
        self.default_language
    }

    pub fn catalog(&self) -> &DiagnosisCatalog {
        self.engine.catalog()
    }

    pub fn questions(&self, language: Option<Language>) -> Vec<QuestionView> {
        let language = language.unwrap_or(self.default_language);
        self.catalog()
            .questions
            .iter()
            .map(|question| QuestionView::localized(question, language))
            .collect()
    }

    pub fn start_flow(&self) -> QuestionFlow {
        QuestionFlow::new(self.catalog().questions.clone())
    }

    pub fn evaluate(&self, answers: &[Answer]) -> DiagnosisReport {
        self.engine.evaluate(answers)
    }

    pub fn export(&self, answers: &[Answer]) -> String {
        render_text(&self.evaluate(answers).results)
    }
}

/// Question as presented to a respondent in one language.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub id: QuestionId,
    pub prompt: String,
    pub kind: QuestionKind,
    pub kind_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub required: bool,
    pub options: Vec<OptionView>,
}

/// `value` is what gets submitted; `caption` is what gets shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub value: String,
    pub caption: String,
}

impl QuestionView {
    pub fn localized(question: &Question, language: Language) -> Self {
        let options = question
            .options
            .iter()
            .zip(question.options(language))
            .map(|(value, caption)| OptionView {
                value: value.clone(),
                caption: caption.to_string(),
            })
            .collect();

        Self {
            id: question.id.clone(),
            prompt: question.prompt(language).to_string(),
            kind: question.kind,
            kind_label: question.kind.label(),
            category: question.category_label(language).map(str::to_string),
            required: question.is_required(),
            options,
        }
    }
}
