use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier wrapper for catalog questions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub String);

impl QuestionId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Display language selected by the respondent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    Ja,
    En,
}

impl Language {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ja" | "jp" | "japanese" => Some(Self::Ja),
            "en" | "english" => Some(Self::En),
            _ => None,
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Language::Ja => "ja",
            Language::En => "en",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Language::Ja => "日本語",
            Language::En => "English",
        }
    }
}

/// Input control a question is answered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    #[serde(alias = "radio")]
    SingleChoice,
    #[serde(alias = "checkbox")]
    MultiChoice,
    #[serde(alias = "input")]
    FreeText,
}

impl QuestionKind {
    pub const fn label(self) -> &'static str {
        match self {
            QuestionKind::SingleChoice => "single_choice",
            QuestionKind::MultiChoice => "multi_choice",
            QuestionKind::FreeText => "free_text",
        }
    }

    pub const fn is_choice(self) -> bool {
        !matches!(self, QuestionKind::FreeText)
    }
}

/// A single catalog question with its bilingual variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub prompt: String,
    #[serde(default)]
    pub prompt_en: Option<String>,
    pub kind: QuestionKind,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub options_en: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub category_en: Option<String>,
    #[serde(default)]
    pub required: Option<bool>,
}

impl Question {
    /// Free-text questions may be skipped unless the catalog marks them required.
    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(self.kind.is_choice())
    }

    pub fn prompt(&self, language: Language) -> &str {
        match language {
            Language::Ja => &self.prompt,
            Language::En => self.prompt_en.as_deref().unwrap_or(&self.prompt),
        }
    }

    pub fn category_label(&self, language: Language) -> Option<&str> {
        match language {
            Language::Ja => self.category.as_deref(),
            Language::En => self
                .category_en
                .as_deref()
                .or(self.category.as_deref()),
        }
    }

    /// Option captions in the requested language, falling back per entry to the
    /// primary list. Answer values always use the primary option text.
    pub fn options(&self, language: Language) -> Vec<&str> {
        self.options
            .iter()
            .enumerate()
            .map(|(index, option)| match language {
                Language::Ja => option.as_str(),
                Language::En => self
                    .options_en
                    .get(index)
                    .map(String::as_str)
                    .unwrap_or(option.as_str()),
            })
            .collect()
    }
}

/// Value captured for a question: one string or a set of selections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Text(String),
    Choices(Vec<String>),
}

impl AnswerValue {
    pub fn is_empty(&self) -> bool {
        match self {
            AnswerValue::Text(text) => text.is_empty(),
            AnswerValue::Choices(choices) => choices.is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(text) => Some(text),
            AnswerValue::Choices(_) => None,
        }
    }

    pub fn as_choices(&self) -> Option<&[String]> {
        match self {
            AnswerValue::Text(_) => None,
            AnswerValue::Choices(choices) => Some(choices),
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        AnswerValue::Text(value.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(value: String) -> Self {
        AnswerValue::Text(value)
    }
}

impl From<Vec<String>> for AnswerValue {
    fn from(value: Vec<String>) -> Self {
        AnswerValue::Choices(value)
    }
}

impl From<Vec<&str>> for AnswerValue {
    fn from(value: Vec<&str>) -> Self {
        AnswerValue::Choices(value.into_iter().map(str::to_string).collect())
    }
}

/// Response recorded against a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: QuestionId,
    pub value: AnswerValue,
}

impl Answer {
    pub fn new(question_id: impl Into<String>, value: impl Into<AnswerValue>) -> Self {
        Self {
            question_id: QuestionId::new(question_id),
            value: value.into(),
        }
    }
}
