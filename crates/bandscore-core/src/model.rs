//! Core data model types for bandscore.
//!
//! An [`AnswerKey`] is the immutable, validated answer set of one practice
//! test. Every question is tagged with an [`AnswerSpec`] once, at load time,
//! so grading dispatches on the variant and never inspects key text.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::normalize::{fold_literal, normalize};

/// Identifier of a question slot or group (e.g. `"14"` or `"19&20"`).
pub type QuestionKey = String;

/// The assessed skill. Each has its own band table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Skill {
    Reading,
    Listening,
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Skill::Reading => write!(f, "reading"),
            Skill::Listening => write!(f, "listening"),
        }
    }
}

impl FromStr for Skill {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reading" => Ok(Skill::Reading),
            "listening" => Ok(Skill::Listening),
            other => Err(ConfigError::UnknownModule(other.to_string())),
        }
    }
}

/// Which test an answer key belongs to: `(book, module, test_number)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TestId {
    pub book: u32,
    pub module: Skill,
    pub test_number: u32,
}

impl fmt::Display for TestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Book {} {} test {}",
            self.book, self.module, self.test_number
        )
    }
}

/// Closed vocabulary for TRUE/FALSE/NOT GIVEN and YES/NO/NOT GIVEN questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "TRUE")]
    True,
    #[serde(rename = "FALSE")]
    False,
    #[serde(rename = "YES")]
    Yes,
    #[serde(rename = "NO")]
    No,
    #[serde(rename = "NOT GIVEN")]
    NotGiven,
}

impl Verdict {
    /// Normalized comparison label.
    pub fn label(self) -> &'static str {
        match self {
            Verdict::True => "true",
            Verdict::False => "false",
            Verdict::Yes => "yes",
            Verdict::No => "no",
            Verdict::NotGiven => "not given",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label().to_uppercase())
    }
}

impl FromStr for Verdict {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "true" => Ok(Verdict::True),
            "false" => Ok(Verdict::False),
            "yes" => Ok(Verdict::Yes),
            "no" => Ok(Verdict::No),
            "not given" => Ok(Verdict::NotGiven),
            other => Err(format!("unknown verdict: {other}")),
        }
    }
}

/// The canonical answer of one question or question group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum AnswerSpec {
    /// Free text; `/` separates acceptable alternatives.
    Literal(String),
    /// An option letter or multi-letter code.
    Choice(String),
    /// TRUE/FALSE/NOT GIVEN or YES/NO/NOT GIVEN.
    Categorical(Verdict),
    /// Sibling questions whose answers form an unordered set. Each accepted
    /// value can be credited to one sibling only.
    EitherOrder {
        siblings: Vec<QuestionKey>,
        accepted: Vec<String>,
    },
    /// Choose up to `choose` options; one point per accepted option picked.
    MultiSelect { accepted: Vec<String>, choose: u32 },
}

impl AnswerSpec {
    /// Number of individually scored slots this entry contributes.
    pub fn slots(&self) -> u32 {
        match self {
            AnswerSpec::Literal(_) | AnswerSpec::Choice(_) | AnswerSpec::Categorical(_) => 1,
            AnswerSpec::EitherOrder { siblings, .. } => siblings.len() as u32,
            AnswerSpec::MultiSelect { accepted, .. } => accepted.len() as u32,
        }
    }

    /// Human-readable rendering of the expected answer, for review screens.
    pub fn expected(&self) -> String {
        match self {
            AnswerSpec::Literal(text) | AnswerSpec::Choice(text) => text.clone(),
            AnswerSpec::Categorical(verdict) => verdict.to_string(),
            AnswerSpec::EitherOrder { accepted, .. } => accepted.join(" / "),
            AnswerSpec::MultiSelect { accepted, .. } => accepted.join(", "),
        }
    }

    /// Reject definitions no answer can satisfy under `policy`.
    fn validate(&self, key: &str, policy: &LiteralPolicy) -> Result<(), ConfigError> {
        let empty = || ConfigError::EmptyCanonical {
            key: key.to_string(),
        };
        match self {
            AnswerSpec::Literal(text) => {
                if text.split('/').any(|alt| fold_literal(alt, policy).is_empty()) {
                    return Err(empty());
                }
            }
            AnswerSpec::Choice(code) => {
                if normalize(code).is_empty() {
                    return Err(empty());
                }
            }
            AnswerSpec::Categorical(_) => {}
            AnswerSpec::EitherOrder { siblings, accepted } => {
                if siblings.len() < 2 {
                    return Err(ConfigError::TooFewSiblings {
                        key: key.to_string(),
                        found: siblings.len(),
                    });
                }
                validate_accepted(key, accepted, |v| fold_literal(v, policy))?;
            }
            AnswerSpec::MultiSelect { accepted, choose } => {
                validate_accepted(key, accepted, normalize)?;
                if *choose == 0 {
                    return Err(ConfigError::ZeroChoose {
                        key: key.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

fn validate_accepted(
    key: &str,
    accepted: &[String],
    canonical: impl Fn(&str) -> String,
) -> Result<(), ConfigError> {
    if accepted.is_empty() {
        return Err(ConfigError::EmptyAcceptedSet {
            key: key.to_string(),
        });
    }
    let mut seen = HashSet::new();
    for value in accepted {
        let value = canonical(value);
        if value.is_empty() {
            return Err(ConfigError::EmptyCanonical {
                key: key.to_string(),
            });
        }
        if !seen.insert(value.clone()) {
            return Err(ConfigError::DuplicateAccepted {
                key: key.to_string(),
                value,
            });
        }
    }
    Ok(())
}

/// Loose-equivalence rules applied to every `Literal` question of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiteralPolicy {
    /// Drop ASCII punctuation (a `.` between digits is kept).
    pub ignore_punctuation: bool,
    /// Treat `-` as a space.
    pub hyphen_as_space: bool,
    /// Drop a leading `a`, `an` or `the`.
    pub ignore_articles: bool,
    /// Accept a single trailing `s` on either side.
    pub plural_tolerance: bool,
}

impl Default for LiteralPolicy {
    fn default() -> Self {
        Self {
            ignore_punctuation: true,
            hyphen_as_space: true,
            ignore_articles: false,
            plural_tolerance: true,
        }
    }
}

impl LiteralPolicy {
    /// Plain normalized equality, no loose rules.
    pub const fn strict() -> Self {
        Self {
            ignore_punctuation: false,
            hyphen_as_space: false,
            ignore_articles: false,
            plural_tolerance: false,
        }
    }
}

/// How either-order groups treat two siblings submitting the same value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// The first sibling in key order keeps the credit.
    #[default]
    FirstWins,
    /// No sibling sharing a duplicated value is credited.
    NoneCredited,
}

/// One question (or group) of an answer key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerEntry {
    pub key: QuestionKey,
    pub spec: AnswerSpec,
}

impl AnswerEntry {
    pub fn new(key: impl Into<QuestionKey>, spec: AnswerSpec) -> Self {
        Self {
            key: key.into(),
            spec,
        }
    }
}

/// A validated, immutable answer key for one test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerKey {
    test: TestId,
    entries: Vec<AnswerEntry>,
    literal_policy: LiteralPolicy,
    duplicate_policy: DuplicatePolicy,
}

impl AnswerKey {
    /// Build an answer key with the default [`LiteralPolicy`].
    pub fn new(test: TestId, entries: Vec<AnswerEntry>) -> Result<Self, ConfigError> {
        Self::with_policy(test, entries, LiteralPolicy::default())
    }

    /// Build an answer key, rejecting any configuration defect.
    ///
    /// Literal answers are checked as `literal_policy` folds them, so a
    /// canonical answer that folds to nothing is refused here.
    pub fn with_policy(
        test: TestId,
        entries: Vec<AnswerEntry>,
        literal_policy: LiteralPolicy,
    ) -> Result<Self, ConfigError> {
        let mut seen: HashSet<&str> = HashSet::new();
        for entry in &entries {
            entry.spec.validate(&entry.key, &literal_policy)?;

            if !seen.insert(entry.key.as_str()) {
                return Err(ConfigError::DuplicateKey(entry.key.clone()));
            }
            if let AnswerSpec::EitherOrder { siblings, .. } = &entry.spec {
                for sibling in siblings {
                    if !seen.insert(sibling.as_str()) {
                        return Err(ConfigError::DuplicateKey(sibling.clone()));
                    }
                }
            }
        }

        let key = Self {
            test,
            entries,
            literal_policy,
            duplicate_policy: DuplicatePolicy::default(),
        };
        if key.total_slots() == 0 {
            return Err(ConfigError::NoQuestions);
        }
        Ok(key)
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Check the key against an author-declared question count.
    pub fn ensure_total(self, declared: u32) -> Result<Self, ConfigError> {
        let actual = self.total_slots();
        if actual != declared {
            return Err(ConfigError::QuestionCountMismatch { declared, actual });
        }
        Ok(self)
    }

    pub fn test(&self) -> TestId {
        self.test
    }

    pub fn entries(&self) -> &[AnswerEntry] {
        &self.entries
    }

    pub fn literal_policy(&self) -> &LiteralPolicy {
        &self.literal_policy
    }

    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicate_policy
    }

    /// Total scorable slots across all entries.
    pub fn total_slots(&self) -> u32 {
        self.entries.iter().map(|e| e.spec.slots()).sum()
    }

    /// Whether `key` names a question, a sibling, or a group of this key.
    pub fn is_known(&self, key: &str) -> bool {
        self.entries.iter().any(|entry| {
            entry.key == key
                || matches!(&entry.spec, AnswerSpec::EitherOrder { siblings, .. }
                    if siblings.iter().any(|s| s == key))
        })
    }
}
