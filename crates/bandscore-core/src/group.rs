//! Resolution of question groups whose correctness is decided jointly.
//!
//! Either-order groups share one accepted value set across sibling blanks,
//! and each value can be credited once. Multi-select groups credit every
//! accepted option that was picked, independently.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::model::{DuplicatePolicy, LiteralPolicy, QuestionKey};
use crate::normalize::{fold_literal, literal_eq, normalize};

/// Decide per-sibling correctness of an either-order group.
///
/// Returns one `(key, correct)` pair per sibling, in sibling order. Answers
/// and accepted values are compared under the key's `literal` policy, so a
/// word-valued group is as tolerant as a plain literal question. A sibling
/// is a candidate for the accepted value it matches; `duplicates` settles
/// candidates that share a value.
pub fn resolve_group(
    answers: &BTreeMap<QuestionKey, String>,
    siblings: &[QuestionKey],
    accepted: &[String],
    duplicates: DuplicatePolicy,
    literal: &LiteralPolicy,
) -> Vec<(QuestionKey, bool)> {
    let accepted: Vec<String> = accepted.iter().map(|v| fold_literal(v, literal)).collect();

    // index of the accepted value each sibling's answer matches
    let candidates: Vec<Option<usize>> = siblings
        .iter()
        .map(|key| {
            let answer = fold_literal(answers.get(key).map_or("", String::as_str), literal);
            if answer.is_empty() {
                return None;
            }
            accepted
                .iter()
                .position(|value| literal_eq(&answer, value, literal))
        })
        .collect();

    let credited: Vec<bool> = match duplicates {
        DuplicatePolicy::FirstWins => {
            let mut claimed = HashSet::new();
            candidates
                .iter()
                .map(|c| c.is_some_and(|value| claimed.insert(value)))
                .collect()
        }
        DuplicatePolicy::NoneCredited => {
            let mut claims: HashMap<usize, usize> = HashMap::new();
            for value in candidates.iter().flatten() {
                *claims.entry(*value).or_default() += 1;
            }
            candidates
                .iter()
                .map(|c| c.is_some_and(|value| claims.get(&value) == Some(&1)))
                .collect()
        }
    };

    tracing::debug!(
        siblings = ?siblings,
        credited = credited.iter().filter(|c| **c).count(),
        "resolved either-order group"
    );

    siblings.iter().cloned().zip(credited).collect()
}

/// Count the selected options that are in the accepted set.
///
/// Selections beyond the group's cap, or outside the option alphabet, are
/// tolerated: they simply do not intersect.
pub fn resolve_multi_select(selected: &BTreeSet<String>, accepted: &[String]) -> u32 {
    let selected: HashSet<String> = selected
        .iter()
        .map(|v| normalize(v))
        .filter(|v| !v.is_empty())
        .collect();
    let accepted: HashSet<String> = accepted.iter().map(|v| normalize(v)).collect();

    selected.intersection(&accepted).count() as u32
}
