//! Score aggregation.
//!
//! Walks an answer key in display order, grades every slot against the
//! answer sheet, and derives the percentage and band. Pure: the same sheet
//! and key always produce the same result.

use serde::{Deserialize, Serialize};

use crate::band::{to_band, BandScore};
use crate::group::{resolve_group, resolve_multi_select};
use crate::matcher::matches_with;
use crate::model::{AnswerKey, AnswerSpec, QuestionKey};
use crate::sheet::AnswerSheet;

/// Grading of one question, sibling, or multi-select group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOutcome {
    pub key: QuestionKey,
    /// What the respondent submitted, if anything.
    pub response: Option<String>,
    /// The expected answer as shown on review screens.
    pub expected: String,
    pub awarded: u32,
    pub possible: u32,
}

impl QuestionOutcome {
    pub fn is_correct(&self) -> bool {
        self.awarded == self.possible
    }
}

/// The immutable result of one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub raw_correct_count: u32,
    pub total_questions: u32,
    /// `round(100 * raw_correct_count / total_questions)`, halves rounded up.
    pub percentage: u8,
    pub band_score: BandScore,
    /// Per-slot breakdown in display order.
    pub outcomes: Vec<QuestionOutcome>,
}

/// Grade `sheet` against `key`.
pub fn score(sheet: &AnswerSheet, key: &AnswerKey) -> ScoreResult {
    let policy = key.literal_policy();
    let mut outcomes = Vec::with_capacity(key.entries().len());

    for entry in key.entries() {
        match &entry.spec {
            AnswerSpec::Literal(_) | AnswerSpec::Choice(_) | AnswerSpec::Categorical(_) => {
                let response = sheet.answer(&entry.key);
                let correct = response.is_some_and(|r| matches_with(r, &entry.spec, policy));
                outcomes.push(QuestionOutcome {
                    key: entry.key.clone(),
                    response: response.map(str::to_string),
                    expected: entry.spec.expected(),
                    awarded: u32::from(correct),
                    possible: 1,
                });
            }
            AnswerSpec::EitherOrder { siblings, accepted } => {
                let expected = entry.spec.expected();
                let resolved = resolve_group(
                    sheet.answers(),
                    siblings,
                    accepted,
                    key.duplicate_policy(),
                    policy,
                );
                for (sibling, correct) in resolved {
                    outcomes.push(QuestionOutcome {
                        response: sheet.answer(&sibling).map(str::to_string),
                        key: sibling,
                        expected: expected.clone(),
                        awarded: u32::from(correct),
                        possible: 1,
                    });
                }
            }
            AnswerSpec::MultiSelect { accepted, .. } => {
                let selected = sheet.selections(&entry.key);
                let awarded = selected
                    .map(|s| resolve_multi_select(s, accepted))
                    .unwrap_or(0);
                outcomes.push(QuestionOutcome {
                    key: entry.key.clone(),
                    response: selected
                        .filter(|s| !s.is_empty())
                        .map(|s| s.iter().cloned().collect::<Vec<_>>().join(", ")),
                    expected: entry.spec.expected(),
                    awarded,
                    possible: entry.spec.slots(),
                });
            }
        }
    }

    log_unknown_keys(sheet, key);

    let raw_correct_count: u32 = outcomes.iter().map(|o| o.awarded).sum();
    let total_questions = key.total_slots();

    ScoreResult {
        raw_correct_count,
        total_questions,
        percentage: percentage(raw_correct_count, total_questions),
        band_score: to_band(i64::from(raw_correct_count), key.test().module),
        outcomes,
    }
}

/// Integer percentage rounded half up. Zero when `total` is zero.
pub fn percentage(correct: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    let correct = u64::from(correct.min(total));
    let total = u64::from(total);
    ((200 * correct + total) / (2 * total)) as u8
}

fn log_unknown_keys(sheet: &AnswerSheet, key: &AnswerKey) {
    let unknown = sheet
        .answers()
        .keys()
        .chain(sheet.all_selections().keys())
        .filter(|k| !key.is_known(k))
        .count();
    if unknown > 0 {
        tracing::debug!(
            test = %key.test(),
            unknown,
            "ignoring answers for questions not in the answer key"
        );
    }
}
