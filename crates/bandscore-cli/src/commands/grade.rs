//! The `bandscore grade` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};
use serde::Serialize;

use bandscore_core::model::TestId;
use bandscore_core::parser::parse_answer_key;
use bandscore_core::scorer::{score, ScoreResult};
use bandscore_core::sheet::AnswerSheet;
use bandscore_core::sink::{JsonDirSink, ScoreSink, ScoreSubmission};

use crate::config::BandscoreConfig;

#[derive(Serialize)]
struct GradeReport<'a> {
    test: TestId,
    #[serde(flatten)]
    result: &'a ScoreResult,
}

pub fn execute(
    config: &BandscoreConfig,
    key_path: PathBuf,
    answers_path: PathBuf,
    time_taken: u64,
    record: Option<Option<PathBuf>>,
    format: String,
) -> Result<()> {
    let key = parse_answer_key(&key_path)?;
    let sheet = AnswerSheet::load_json(&answers_path)?;

    tracing::debug!(test = %key.test(), "grading answer sheet");
    let result = score(&sheet, &key);

    match format.as_str() {
        "text" => print_text(key.test(), &result),
        "json" => {
            let report = GradeReport {
                test: key.test(),
                result: &result,
            };
            let json =
                serde_json::to_string_pretty(&report).context("failed to serialize result")?;
            println!("{json}");
        }
        other => anyhow::bail!("unknown format '{other}' (expected text or json)"),
    }

    if let Some(dir) = record {
        let sink = JsonDirSink::new(dir.unwrap_or_else(|| config.results_dir.clone()));
        let submission = ScoreSubmission::new(key.test(), &result, time_taken);
        sink.record(&submission)?;
        eprintln!("Submission saved to: {}", sink.path_for(&submission).display());
    }

    Ok(())
}

fn print_text(test: TestId, result: &ScoreResult) {
    let mut table = Table::new();
    table.set_header(vec!["Question", "Your answer", "Expected", "Result"]);

    for outcome in &result.outcomes {
        let mark = if outcome.possible > 1 {
            format!("{}/{}", outcome.awarded, outcome.possible)
        } else if outcome.is_correct() {
            "correct".to_string()
        } else {
            "wrong".to_string()
        };
        table.add_row(vec![
            Cell::new(&outcome.key),
            Cell::new(outcome.response.as_deref().unwrap_or("-")),
            Cell::new(&outcome.expected),
            Cell::new(mark),
        ]);
    }

    println!("{test}\n{table}");
    println!(
        "Score: {}/{} ({}%)  Band: {}",
        result.raw_correct_count, result.total_questions, result.percentage, result.band_score
    );
}
