use crate::infra::{build_service, load_answers, parse_language};
use chrono::{Local, NaiveDate};
use clap::Args;
use mibyou::config::AppConfig;
use mibyou::diagnosis::router::DiagnosisResponse;
use mibyou::diagnosis::{
    write_text, Advance, AnswerValue, DiagnosisReport, DiagnosisService, Language, QuestionFlow,
    QuestionKind,
};
use mibyou::error::AppError;
use mibyou::telemetry;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Args, Debug, Default)]
pub(crate) struct QuestionsArgs {
    /// Display language (ja or en). Defaults to MIBYOU_LANGUAGE.
    #[arg(long, value_parser = parse_language)]
    pub(crate) lang: Option<Language>,
}

#[derive(Args, Debug)]
pub(crate) struct DiagnoseArgs {
    /// JSON file with answers, either an array or {"answers": [...]}
    #[arg(long)]
    pub(crate) answers: PathBuf,
    /// Also write the plain-text export to this file or directory
    #[arg(long)]
    pub(crate) export: Option<PathBuf>,
    /// Print the full report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct InterviewArgs {
    /// Display language (ja or en). Defaults to MIBYOU_LANGUAGE.
    #[arg(long, value_parser = parse_language)]
    pub(crate) lang: Option<Language>,
    /// Write the plain-text export to this file or directory when finished
    #[arg(long)]
    pub(crate) export: Option<PathBuf>,
}

fn bootstrap() -> Result<Arc<DiagnosisService>, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    build_service(&config)
}

pub(crate) fn run_questions(args: QuestionsArgs) -> Result<(), AppError> {
    let service = bootstrap()?;
    let language = args.lang.unwrap_or(service.default_language());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (index, question) in service.questions(Some(language)).iter().enumerate() {
        writeln!(out, "{}. [{}] {}", index + 1, question.kind_label, question.prompt)?;
        if let Some(category) = &question.category {
            writeln!(out, "   {}: {}", category_caption(language), category)?;
        }
        for option in &question.options {
            writeln!(out, "   - {}", option.caption)?;
        }
    }
    Ok(())
}

pub(crate) fn run_diagnose(args: DiagnoseArgs) -> Result<(), AppError> {
    let service = bootstrap()?;
    let answers = load_answers(&args.answers)?;
    info!(answers = answers.len(), path = %args.answers.display(), "answers loaded");

    let report = service.evaluate(&answers);
    let today = Local::now().date_naive();

    if args.json {
        let response = DiagnosisResponse {
            evaluated_on: today,
            category_scores: report.category_scores.clone(),
            element_scores: report.element_scores.clone(),
            results: report.results.clone(),
        };
        let json = serde_json::to_string_pretty(&response)?;
        println!("{json}");
    } else {
        let stdout = io::stdout();
        render_report(&report, service.default_language(), today, &mut stdout.lock())?;
    }

    if let Some(path) = args.export {
        let written = write_text(path, &report.results)?;
        eprintln!("export written to {}", written.display());
    }

    Ok(())
}

pub(crate) fn run_interview(args: InterviewArgs) -> Result<(), AppError> {
    let service = bootstrap()?;
    let language = args.lang.unwrap_or(service.default_language());
    let mut flow = service.start_flow();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = stdin.lock();
    let mut out = stdout.lock();

    match interview(&mut flow, language, &mut input, &mut out)? {
        InterviewOutcome::Aborted => {
            writeln!(out, "{}", aborted_caption(language))?;
            return Ok(());
        }
        InterviewOutcome::Completed => {}
    }

    let report = service.evaluate(flow.answers());
    render_report(&report, language, Local::now().date_naive(), &mut out)?;

    if let Some(path) = args.export {
        let written = write_text(path, &report.results)?;
        writeln!(out, "\n{}", written.display())?;
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InterviewOutcome {
    Completed,
    Aborted,
}

/// Drives `flow` from line-oriented input. Choice questions take option
/// numbers; multi-choice input toggles options until an empty line.
/// `:b` steps back and `:q` aborts.
pub(crate) fn interview<R: BufRead, W: Write>(
    flow: &mut QuestionFlow,
    language: Language,
    input: &mut R,
    out: &mut W,
) -> io::Result<InterviewOutcome> {
    loop {
        let Some(question) = flow.current().cloned() else {
            return Ok(InterviewOutcome::Completed);
        };

        let (position, total) = flow.progress();
        writeln!(out, "\n{position} / {total}  {}", question.prompt(language))?;
        if let Some(category) = question.category_label(language) {
            writeln!(out, "  {}: {category}", category_caption(language))?;
        }
        for (index, caption) in question.options(language).iter().enumerate() {
            writeln!(out, "  {}) {caption}", index + 1)?;
        }
        if let Some(AnswerValue::Choices(selected)) = flow.answer_for(&question.id) {
            writeln!(out, "  [{}]", selected.join(", "))?;
        }
        write!(out, "> ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(InterviewOutcome::Aborted);
        }
        let line = line.trim();

        match line {
            ":q" => return Ok(InterviewOutcome::Aborted),
            ":b" => {
                flow.prev();
                continue;
            }
            _ => {}
        }

        match question.kind {
            QuestionKind::SingleChoice if !line.is_empty() => {
                match pick_option(&question.options, line) {
                    Some(option) => {
                        flow.answer(question.id.clone(), AnswerValue::Text(option.to_string()))
                    }
                    None => {
                        writeln!(out, "{}", invalid_caption(language))?;
                        continue;
                    }
                }
            }
            QuestionKind::MultiChoice if !line.is_empty() => {
                for token in line.split(',') {
                    match pick_option(&question.options, token) {
                        Some(option) => flow.toggle(question.id.clone(), option),
                        None => writeln!(out, "{}", invalid_caption(language))?,
                    }
                }
                continue;
            }
            QuestionKind::FreeText if !line.is_empty() => {
                flow.answer(question.id.clone(), AnswerValue::Text(line.to_string()));
            }
            _ => {}
        }

        match flow.next() {
            Advance::Moved(_) => {}
            Advance::AtEnd => return Ok(InterviewOutcome::Completed),
            Advance::Blocked => writeln!(out, "{}", required_caption(language))?,
        }
    }
}

fn pick_option<'a>(options: &'a [String], token: &str) -> Option<&'a str> {
    let number: usize = token.trim().parse().ok()?;
    options
        .get(number.checked_sub(1)?)
        .map(String::as_str)
}

pub(crate) fn render_report<W: Write>(
    report: &DiagnosisReport,
    language: Language,
    evaluated_on: NaiveDate,
    out: &mut W,
) -> io::Result<()> {
    let title = match language {
        Language::Ja => "診断結果",
        Language::En => "Diagnosis Results",
    };
    writeln!(out, "\n{title} ({evaluated_on})")?;

    if report.is_empty() {
        let message = match language {
            Language::Ja => "特に気になる症状は検出されませんでした。健康的な生活を心がけましょう。",
            Language::En => {
                "No significant symptoms detected. Continue maintaining a healthy lifestyle."
            }
        };
        writeln!(out, "{message}")?;
        return Ok(());
    }

    for (index, result) in report.results.iter().enumerate() {
        writeln!(out, "\n{}. {} (スコア: {})", index + 1, result.label, result.score)?;
        for symptom in &result.symptoms {
            writeln!(out, "   * {symptom}")?;
        }
        for record in &result.recommendations {
            writeln!(
                out,
                "   - {} {} | {} | {}",
                record.name, record.price, record.session_duration, record.recommended_frequency
            )?;
            if !record.treatment_approach.is_empty() {
                writeln!(out, "     {}", record.treatment_approach)?;
            }
        }
    }
    Ok(())
}

fn category_caption(language: Language) -> &'static str {
    match language {
        Language::Ja => "カテゴリ",
        Language::En => "Category",
    }
}

fn invalid_caption(language: Language) -> &'static str {
    match language {
        Language::Ja => "番号で選択してください",
        Language::En => "Please choose by number",
    }
}

fn required_caption(language: Language) -> &'static str {
    match language {
        Language::Ja => "回答を選択してください",
        Language::En => "An answer is required",
    }
}

fn aborted_caption(language: Language) -> &'static str {
    match language {
        Language::Ja => "診断を中断しました",
        Language::En => "Diagnosis cancelled",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mibyou::diagnosis::{DiagnosisCatalog, QuestionId, ScoringConfig};
    use std::io::Cursor;

    fn service() -> DiagnosisService {
        DiagnosisService::new(
            DiagnosisCatalog::standard().expect("catalog"),
            ScoringConfig::standard(),
            Language::Ja,
        )
    }

    #[test]
    fn interview_collects_answers_for_every_question() {
        let service = service();
        let mut flow = service.start_flow();
        let script = "1\n".repeat(9) + "1,2\n\n" + "4\n\n" + "\n";
        let mut input = Cursor::new(script);
        let mut out = Vec::new();

        let outcome = interview(&mut flow, Language::En, &mut input, &mut out).expect("io");

        assert_eq!(outcome, InterviewOutcome::Completed);
        assert_eq!(
            flow.answer_for(&QuestionId::new("q10")),
            Some(&AnswerValue::from(vec!["疲れやすい", "目の疲れ"]))
        );
        let report = service.evaluate(flow.answers());
        assert_eq!(report.category_scores.get("自律神経"), Some(11));
        assert_eq!(report.category_scores.get("ホルモン"), Some(6));
        let transcript = String::from_utf8(out).expect("utf-8");
        assert!(transcript.contains("1 / 12"));
        assert!(transcript.contains("Often"));
    }

    #[test]
    fn interview_blocks_until_required_answer_and_supports_back() {
        let service = service();
        let mut flow = service.start_flow();
        let mut input = Cursor::new("\n9\n2\n:b\n:q\n");
        let mut out = Vec::new();

        let outcome = interview(&mut flow, Language::Ja, &mut input, &mut out).expect("io");

        assert_eq!(outcome, InterviewOutcome::Aborted);
        assert_eq!(flow.index(), 0);
        assert_eq!(
            flow.answer_for(&QuestionId::new("q1")),
            Some(&AnswerValue::from("たまにある"))
        );
        let transcript = String::from_utf8(out).expect("utf-8");
        assert!(transcript.contains("回答を選択してください"));
        assert!(transcript.contains("番号で選択してください"));
    }

    #[test]
    fn end_of_input_aborts() {
        let service = service();
        let mut flow = service.start_flow();
        let mut input = Cursor::new("");
        let mut out = Vec::new();

        let outcome = interview(&mut flow, Language::Ja, &mut input, &mut out).expect("io");
        assert_eq!(outcome, InterviewOutcome::Aborted);
    }

    #[test]
    fn empty_report_prints_healthy_message() {
        let report = service().evaluate(&[]);
        let mut out = Vec::new();
        let today = NaiveDate::from_ymd_opt(2025, 10, 1).expect("valid date");

        render_report(&report, Language::En, today, &mut out).expect("io");

        let text = String::from_utf8(out).expect("utf-8");
        assert!(text.contains("Diagnosis Results (2025-10-01)"));
        assert!(text.contains("No significant symptoms detected"));
    }

    #[test]
    fn report_lists_results_with_recommendations() {
        let service = service();
        let report = service.evaluate(&[mibyou::diagnosis::Answer::new("q4", "よくある")]);
        let mut out = Vec::new();
        let today = NaiveDate::from_ymd_opt(2025, 10, 1).expect("valid date");

        render_report(&report, Language::Ja, today, &mut out).expect("io");

        let text = String::from_utf8(out).expect("utf-8");
        assert!(text.contains("機能医学: ホルモン (スコア: 3)"));
        assert!(text.contains("温活よもぎ蒸し ¥6,600"));
    }
}
