//! The respondent's answer sheet for one test-taking session.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::QuestionKey;

/// Raw answers as typed or selected. The only state that changes during a
/// session; scoring reads it and never mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSheet {
    /// Text answers keyed by question.
    #[serde(default)]
    answers: BTreeMap<QuestionKey, String>,
    /// Selected option letters keyed by multi-select group.
    #[serde(default)]
    selections: BTreeMap<QuestionKey, BTreeSet<String>>,
}

impl AnswerSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the current text of a question, replacing any earlier text.
    pub fn record(&mut self, key: impl Into<QuestionKey>, text: impl Into<String>) {
        self.answers.insert(key.into(), text.into());
    }

    /// Remove the text answer of a question.
    pub fn clear(&mut self, key: &str) -> Option<String> {
        self.answers.remove(key)
    }

    /// Tick an option in a multi-select group. Returns `false` if it was
    /// already ticked.
    pub fn select(&mut self, group: impl Into<QuestionKey>, option: impl Into<String>) -> bool {
        self.selections
            .entry(group.into())
            .or_default()
            .insert(option.into())
    }

    /// Untick an option. Returns `false` if it was not ticked.
    pub fn deselect(&mut self, group: &str, option: &str) -> bool {
        let Some(options) = self.selections.get_mut(group) else {
            return false;
        };
        let removed = options.remove(option);
        if options.is_empty() {
            self.selections.remove(group);
        }
        removed
    }

    /// Discard everything, as when the respondent restarts the test.
    pub fn reset(&mut self) {
        self.answers.clear();
        self.selections.clear();
    }

    pub fn answer(&self, key: &str) -> Option<&str> {
        self.answers.get(key).map(String::as_str)
    }

    pub fn selections(&self, group: &str) -> Option<&BTreeSet<String>> {
        self.selections.get(group)
    }

    pub fn answers(&self) -> &BTreeMap<QuestionKey, String> {
        &self.answers
    }

    pub fn all_selections(&self) -> &BTreeMap<QuestionKey, BTreeSet<String>> {
        &self.selections
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty() && self.selections.is_empty()
    }

    /// Load a sheet from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read answer sheet from {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse answer sheet: {}", path.display()))
    }
}
