//! Score sink boundary: what a graded submission looks like to storage.
//!
//! The engine only builds a [`ScoreSubmission`]; callers decide where it
//! goes. [`JsonDirSink`] keeps one JSON file per submission.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::band::BandScore;
use crate::model::{Skill, TestId};
use crate::scorer::ScoreResult;

/// A persisted submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSubmission {
    pub id: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub book: u32,
    pub module: Skill,
    pub test_number: u32,
    /// Raw correct count.
    pub score: u32,
    pub total_questions: u32,
    pub percentage: u8,
    pub band_score: BandScore,
    pub time_taken_seconds: u64,
}

impl ScoreSubmission {
    pub fn new(test: TestId, result: &ScoreResult, time_taken_seconds: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            submitted_at: Utc::now(),
            book: test.book,
            module: test.module,
            test_number: test.test_number,
            score: result.raw_correct_count,
            total_questions: result.total_questions,
            percentage: result.percentage,
            band_score: result.band_score,
            time_taken_seconds,
        }
    }

    pub fn test(&self) -> TestId {
        TestId {
            book: self.book,
            module: self.module,
            test_number: self.test_number,
        }
    }
}

/// Somewhere submissions are recorded.
pub trait ScoreSink: Send + Sync {
    fn record(&self, submission: &ScoreSubmission) -> Result<()>;
}

/// Writes each submission as pretty JSON into a directory.
#[derive(Debug, Clone)]
pub struct JsonDirSink {
    dir: PathBuf,
}

impl JsonDirSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path a submission is written to.
    pub fn path_for(&self, submission: &ScoreSubmission) -> PathBuf {
        self.dir.join(format!(
            "{}-book{}-test{}-{}.json",
            submission.module, submission.book, submission.test_number, submission.id
        ))
    }

    /// Load every readable submission, oldest first.
    ///
    /// A missing directory yields an empty list; unreadable files are
    /// skipped with a warning.
    pub fn load_all(&self) -> Result<Vec<ScoreSubmission>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut submissions = Vec::new();
        for entry in std::fs::read_dir(&self.dir)
            .with_context(|| format!("failed to read directory: {}", self.dir.display()))?
        {
            let path = entry?.path();
            if !path.extension().is_some_and(|ext| ext == "json") {
                continue;
            }
            match load_submission(&path) {
                Ok(s) => submissions.push(s),
                Err(e) => tracing::warn!("skipping {}: {e:#}", path.display()),
            }
        }

        submissions.sort_by_key(|s| s.submitted_at);
        Ok(submissions)
    }
}

impl ScoreSink for JsonDirSink {
    fn record(&self, submission: &ScoreSubmission) -> Result<()> {
        let json =
            serde_json::to_string_pretty(submission).context("failed to serialize submission")?;
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create {}", self.dir.display()))?;
        let path = self.path_for(submission);
        std::fs::write(&path, json)
            .with_context(|| format!("failed to write submission to {}", path.display()))?;
        tracing::debug!(path = %path.display(), id = %submission.id, "wrote submission");
        Ok(())
    }
}

fn load_submission(path: &Path) -> Result<ScoreSubmission> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read submission from {}", path.display()))?;
    serde_json::from_str(&content).context("failed to parse submission JSON")
}

/// Keeps submissions in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    submissions: Mutex<Vec<ScoreSubmission>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submissions(&self) -> Vec<ScoreSubmission> {
        self.submissions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ScoreSink for MemorySink {
    fn record(&self, submission: &ScoreSubmission) -> Result<()> {
        self.submissions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(submission.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_result(correct: u32) -> ScoreResult {
        ScoreResult {
            raw_correct_count: correct,
            total_questions: 40,
            percentage: crate::scorer::percentage(correct, 40),
            band_score: crate::band::to_band(i64::from(correct), Skill::Listening),
            outcomes: vec![],
        }
    }

    fn test_id() -> TestId {
        TestId {
            book: 18,
            module: Skill::Listening,
            test_number: 2,
        }
    }

    #[test]
    fn wire_field_names() {
        let submission = ScoreSubmission::new(test_id(), &make_result(30), 1800);
        let value = serde_json::to_value(&submission).unwrap();
        for field in [
            "book",
            "module",
            "testNumber",
            "score",
            "totalQuestions",
            "percentage",
            "bandScore",
            "timeTakenSeconds",
        ] {
            assert!(value.get(field).is_some(), "missing {field}");
        }
        assert_eq!(value["module"], "listening");
        assert_eq!(value["bandScore"], 7.0);
        assert_eq!(value["percentage"], 75);
    }

    #[test]
    fn json_dir_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let sink = JsonDirSink::new(dir.path().join("results"));

        let first = ScoreSubmission::new(test_id(), &make_result(20), 600);
        let second = ScoreSubmission::new(test_id(), &make_result(35), 900);
        sink.record(&first).unwrap();
        sink.record(&second).unwrap();
        std::fs::write(dir.path().join("results/broken.json"), "{not json").unwrap();

        let loaded = sink.load_all().unwrap();
        assert_eq!(loaded.len(), 2);
        assert!(loaded.iter().any(|s| s.id == first.id));
        assert_eq!(loaded[0].test(), test_id());
    }

    #[test]
    fn missing_dir_is_empty_history() {
        let dir = tempfile::tempdir().unwrap();
        let sink = JsonDirSink::new(dir.path().join("never-created"));
        assert!(sink.load_all().unwrap().is_empty());
    }

    #[test]
    fn memory_sink_collects() {
        let sink = MemorySink::new();
        let submission = ScoreSubmission::new(test_id(), &make_result(1), 5);
        sink.record(&submission).unwrap();
        assert_eq!(sink.submissions().len(), 1);
        assert_eq!(sink.submissions()[0].score, 1);
    }
}
