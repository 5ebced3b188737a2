//! Single-answer matching.
//!
//! Decides whether one text response satisfies a plain [`AnswerSpec`].
//! Group variants are resolved jointly by [`crate::group`] instead.

use crate::model::{AnswerSpec, LiteralPolicy};
use crate::normalize::{fold_literal, literal_eq, normalize};

/// Match `raw` against `spec` using the default [`LiteralPolicy`].
pub fn matches(raw: &str, spec: &AnswerSpec) -> bool {
    matches_with(raw, spec, &LiteralPolicy::default())
}

/// Match `raw` against `spec`.
///
/// An unanswered (empty or whitespace-only) response never matches.
pub fn matches_with(raw: &str, spec: &AnswerSpec, policy: &LiteralPolicy) -> bool {
    let answer = normalize(raw);
    if answer.is_empty() {
        return false;
    }

    match spec {
        AnswerSpec::Literal(canonical) => literal_matches(&answer, canonical, policy),
        AnswerSpec::Choice(code) => answer == normalize(code),
        AnswerSpec::Categorical(verdict) => answer == verdict.label(),
        AnswerSpec::EitherOrder { .. } | AnswerSpec::MultiSelect { .. } => false,
    }
}

fn literal_matches(answer: &str, canonical: &str, policy: &LiteralPolicy) -> bool {
    let folded = fold_literal(answer, policy);
    if folded.is_empty() {
        return false;
    }
    canonical
        .split('/')
        .map(|alt| fold_literal(alt, policy))
        .filter(|alt| !alt.is_empty())
        .any(|alt| literal_eq(&folded, &alt, policy))
}
