use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::domain::{Question, QuestionId};

const STANDARD_CATALOG: &str = include_str!("../../data/catalog.json");

/// Static data consumed by the scoring engine: questions, the treatment
/// catalog, and the category to element association matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisCatalog {
    pub questions: Vec<Question>,
    pub recommendations: Vec<RecommendationRecord>,
    pub associations: AssociationMatrix,
}

impl DiagnosisCatalog {
    /// Catalog compiled into the binary.
    pub fn standard() -> Result<Self, CatalogError> {
        Self::from_reader(STANDARD_CATALOG.as_bytes())
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let file = File::open(path.as_ref()).map_err(|source| CatalogError::Io {
            path: path.as_ref().display().to_string(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_reader(reader)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn question(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|question| &question.id == id)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for question in &self.questions {
            if !seen.insert(&question.id) {
                return Err(CatalogError::DuplicateQuestion(question.id.clone()));
            }

            if question.kind.is_choice() && question.options.is_empty() {
                return Err(CatalogError::MissingOptions(question.id.clone()));
            }

            if !question.options_en.is_empty() && question.options_en.len() != question.options.len()
            {
                return Err(CatalogError::TranslationMismatch {
                    id: question.id.clone(),
                    primary: question.options.len(),
                    translated: question.options_en.len(),
                });
            }
        }
        Ok(())
    }
}

/// Treatment offered by the salon, matched against detected symptoms or
/// herb properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationRecord {
    pub name: String,
    pub price: String,
    #[serde(default)]
    pub treatment_approach: String,
    pub target_symptoms: Vec<String>,
    pub session_duration: String,
    pub recommended_frequency: String,
    #[serde(default)]
    pub herbs: Vec<Herb>,
}

impl RecommendationRecord {
    pub fn has_property(&self, wanted: &[&str]) -> bool {
        self.herbs.iter().any(|herb| {
            herb.properties
                .iter()
                .any(|property| wanted.iter().any(|want| *want == property.as_str()))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Herb {
    pub name: String,
    #[serde(default)]
    pub properties: Vec<String>,
}

/// Relation weights of one traditional element to the functional categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementRelations {
    pub element: String,
    pub weights: BTreeMap<String, u32>,
}

/// Ordered category to element weighting. Element order decides the
/// encounter order of element scores.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssociationMatrix(pub Vec<ElementRelations>);

impl AssociationMatrix {
    pub fn elements(&self) -> impl Iterator<Item = &ElementRelations> {
        self.0.iter()
    }

    /// Defined, non-zero weight of `category` under `element`.
    pub fn weight(&self, element: &str, category: &str) -> Option<u32> {
        self.0
            .iter()
            .find(|relations| relations.element == element)
            .and_then(|relations| relations.weight(category))
    }
}

impl ElementRelations {
    pub fn weight(&self, category: &str) -> Option<u32> {
        self.weights
            .get(category)
            .copied()
            .filter(|weight| *weight > 0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("unable to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("question id {0} appears more than once")]
    DuplicateQuestion(QuestionId),
    #[error("choice question {0} has no options")]
    MissingOptions(QuestionId),
    #[error("question {id} has {primary} options but {translated} translations")]
    TranslationMismatch {
        id: QuestionId,
        primary: usize,
        translated: usize,
    },
}
