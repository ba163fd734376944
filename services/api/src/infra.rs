use metrics_exporter_prometheus::PrometheusHandle;
use mibyou::config::AppConfig;
use mibyou::diagnosis::{Answer, DiagnosisService, Language, ScoringConfig};
use mibyou::error::AppError;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn build_service(config: &AppConfig) -> Result<Arc<DiagnosisService>, AppError> {
    let catalog = config.diagnosis.load_catalog()?;
    Ok(Arc::new(DiagnosisService::new(
        catalog,
        ScoringConfig::standard(),
        config.diagnosis.language,
    )))
}

/// Answer files may hold a bare array or the HTTP request shape.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AnswerFile {
    Bare(Vec<Answer>),
    Wrapped { answers: Vec<Answer> },
}

pub(crate) fn load_answers(path: &Path) -> Result<Vec<Answer>, AppError> {
    let reader = BufReader::new(File::open(path)?);
    let file: AnswerFile = serde_json::from_reader(reader)?;
    let answers = match file {
        AnswerFile::Bare(answers) | AnswerFile::Wrapped { answers } => answers,
    };
    Ok(answers)
}

pub(crate) fn parse_language(raw: &str) -> Result<Language, String> {
    Language::parse(raw).ok_or_else(|| format!("unsupported language '{raw}' (expected ja or en)"))
}
