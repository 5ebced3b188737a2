//! Answer-key configuration errors.
//!
//! A broken answer key must never reach grading: every defect below is
//! raised while the key is being built, so the test cannot be scored at all.

use thiserror::Error;

/// Errors that make an answer key unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A canonical answer (or one of its `/` alternatives) is empty.
    #[error("question {key}: canonical answer is empty")]
    EmptyCanonical { key: String },

    /// The verdict is not one of TRUE, FALSE, NOT GIVEN, YES, NO.
    #[error("question {key}: unknown verdict '{value}'")]
    UnknownVerdict { key: String, value: String },

    /// The same question key appears more than once.
    #[error("duplicate question key: {0}")]
    DuplicateKey(String),

    /// An either-order group lists fewer than two siblings.
    #[error("group {key}: needs at least two siblings, found {found}")]
    TooFewSiblings { key: String, found: usize },

    /// A group has no accepted values.
    #[error("group {key}: accepted answer set is empty")]
    EmptyAcceptedSet { key: String },

    /// An accepted set lists the same value twice.
    #[error("group {key}: accepted value '{value}' listed more than once")]
    DuplicateAccepted { key: String, value: String },

    /// A multi-select group asks for zero choices.
    #[error("group {key}: choose must be at least 1")]
    ZeroChoose { key: String },

    /// A question entry sets zero or several answer fields.
    #[error("question {key}: expected exactly one answer field, found {found}")]
    AmbiguousAnswer { key: String, found: usize },

    /// An either-order entry is missing its sibling list.
    #[error("group {key}: either_order requires a siblings list")]
    MissingSiblings { key: String },

    /// The key contains no scorable question slots.
    #[error("answer key has no questions")]
    NoQuestions,

    /// The declared question count disagrees with the entries.
    #[error("answer key declares {declared} questions but defines {actual}")]
    QuestionCountMismatch { declared: u32, actual: u32 },

    /// The module is neither reading nor listening.
    #[error("unknown module: {0}")]
    UnknownModule(String),
}
