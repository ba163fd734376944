use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use super::scoring::DiagnosisResult;

pub const EXPORT_FILE_NAME: &str = "diagnosis-result.txt";

/// Plain-text rendering of the ranked results, one block per result.
pub fn render_text(results: &[DiagnosisResult]) -> String {
    results
        .iter()
        .map(|result| {
            let recommendations: Vec<&str> = result
                .recommendations
                .iter()
                .map(|record| record.name.as_str())
                .collect();
            format!(
                "{} (スコア: {})\n症状: {}\n推奨施術: {}\n",
                result.label,
                result.score,
                result.symptoms.join(", "),
                recommendations.join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Writes the export to `path`. A directory target receives
/// [`EXPORT_FILE_NAME`].
pub fn write_text(path: impl AsRef<Path>, results: &[DiagnosisResult]) -> Result<PathBuf, ExportError> {
    let path = path.as_ref();
    let target = if path.is_dir() {
        path.join(EXPORT_FILE_NAME)
    } else {
        path.to_path_buf()
    };

    fs::write(&target, render_text(results)).map_err(|source| ExportError::Write {
        path: target.display().to_string(),
        source,
    })?;

    info!(path = %target.display(), results = results.len(), "diagnosis export written");
    Ok(target)
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("unable to write export {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnosis::catalog::RecommendationRecord;
    use crate::diagnosis::scoring::Dimension;

    fn recommendation(name: &str) -> RecommendationRecord {
        RecommendationRecord {
            name: name.to_string(),
            price: "¥6,600".to_string(),
            treatment_approach: String::new(),
            target_symptoms: Vec::new(),
            session_duration: "40分".to_string(),
            recommended_frequency: "週1回".to_string(),
            herbs: Vec::new(),
        }
    }

    fn results() -> Vec<DiagnosisResult> {
        vec![
            DiagnosisResult {
                dimension: Dimension::Functional,
                key: "自律神経".to_string(),
                label: "機能医学: 自律神経".to_string(),
                score: 5,
                symptoms: vec!["寝つき".to_string(), "肩こり".to_string()],
                recommendations: vec![recommendation("ヘッドスパ"), recommendation("よもぎ蒸し")],
            },
            DiagnosisResult {
                dimension: Dimension::Traditional,
                key: "気".to_string(),
                label: "伝統医学: 気の不調".to_string(),
                score: 3,
                symptoms: Vec::new(),
                recommendations: Vec::new(),
            },
        ]
    }

    #[test]
    fn renders_one_block_per_result() {
        let text = render_text(&results());

        assert_eq!(
            text,
            "機能医学: 自律神経 (スコア: 5)\n症状: 寝つき, 肩こり\n推奨施術: ヘッドスパ, よもぎ蒸し\n\n\
             伝統医学: 気の不調 (スコア: 3)\n症状: \n推奨施術: \n"
        );
    }

    #[test]
    fn empty_results_render_empty_text() {
        assert_eq!(render_text(&[]), "");
    }

    #[test]
    fn writes_into_directory_with_default_name() {
        let dir = std::env::temp_dir().join(format!("mibyou-export-{}", std::process::id()));
        fs::create_dir_all(&dir).expect("temp dir");

        let written = write_text(&dir, &results()).expect("export written");

        assert_eq!(written, dir.join(EXPORT_FILE_NAME));
        let contents = fs::read_to_string(&written).expect("readable");
        assert!(contents.starts_with("機能医学: 自律神経"));
        fs::remove_dir_all(&dir).ok();
    }
}
