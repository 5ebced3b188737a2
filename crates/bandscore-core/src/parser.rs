//! TOML answer-key parser.
//!
//! Loads answer keys from TOML files and directories, and validates them.
//! Hard defects abort the load; questionable but scorable keys produce
//! warnings.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::ConfigError;
use crate::model::{
    AnswerEntry, AnswerKey, AnswerSpec, DuplicatePolicy, LiteralPolicy, Skill, TestId, Verdict,
};

/// Intermediate TOML structure for parsing answer-key files.
#[derive(Debug, Deserialize)]
struct TomlAnswerKeyFile {
    test: TomlTestHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlTestHeader {
    book: u32,
    module: String,
    test_number: u32,
    #[serde(default)]
    total_questions: Option<u32>,
    #[serde(default)]
    duplicate_policy: DuplicatePolicy,
    #[serde(default)]
    literal_policy: LiteralPolicy,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    key: String,
    #[serde(default)]
    literal: Option<String>,
    #[serde(default)]
    choice: Option<String>,
    #[serde(default)]
    verdict: Option<String>,
    #[serde(default)]
    either_order: Option<Vec<String>>,
    #[serde(default)]
    siblings: Option<Vec<String>>,
    #[serde(default)]
    multi_select: Option<Vec<String>>,
    #[serde(default)]
    choose: Option<u32>,
}

impl TomlQuestion {
    fn into_entry(self) -> Result<AnswerEntry, ConfigError> {
        let found = [
            self.literal.is_some(),
            self.choice.is_some(),
            self.verdict.is_some(),
            self.either_order.is_some(),
            self.multi_select.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count();
        if found != 1 {
            return Err(ConfigError::AmbiguousAnswer {
                key: self.key,
                found,
            });
        }

        let spec = if let Some(text) = self.literal {
            AnswerSpec::Literal(text)
        } else if let Some(code) = self.choice {
            AnswerSpec::Choice(code)
        } else if let Some(verdict) = self.verdict {
            let parsed = verdict
                .parse::<Verdict>()
                .map_err(|_| ConfigError::UnknownVerdict {
                    key: self.key.clone(),
                    value: verdict,
                })?;
            AnswerSpec::Categorical(parsed)
        } else if let Some(accepted) = self.either_order {
            let siblings = self.siblings.ok_or_else(|| ConfigError::MissingSiblings {
                key: self.key.clone(),
            })?;
            AnswerSpec::EitherOrder { siblings, accepted }
        } else {
            let accepted = self.multi_select.unwrap_or_default();
            let choose = self.choose.unwrap_or(accepted.len() as u32);
            AnswerSpec::MultiSelect { accepted, choose }
        };

        Ok(AnswerEntry::new(self.key, spec))
    }
}

/// Parse a single TOML file into an `AnswerKey`.
pub fn parse_answer_key(path: &Path) -> Result<AnswerKey> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answer key file: {}", path.display()))?;

    parse_answer_key_str(&content, path)
}

/// Parse a TOML string into an `AnswerKey` (useful for testing).
pub fn parse_answer_key_str(content: &str, source_path: &Path) -> Result<AnswerKey> {
    let parsed: TomlAnswerKeyFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let invalid = || format!("invalid answer key: {}", source_path.display());

    let module: Skill = parsed.test.module.parse().with_context(invalid)?;
    let test = TestId {
        book: parsed.test.book,
        module,
        test_number: parsed.test.test_number,
    };

    let entries = parsed
        .questions
        .into_iter()
        .map(TomlQuestion::into_entry)
        .collect::<Result<Vec<_>, _>>()
        .with_context(invalid)?;

    let mut key = AnswerKey::with_policy(test, entries, parsed.test.literal_policy)
        .with_context(invalid)?
        .with_duplicate_policy(parsed.test.duplicate_policy);

    if let Some(declared) = parsed.test.total_questions {
        key = key.ensure_total(declared).with_context(invalid)?;
    }

    tracing::debug!(
        test = %key.test(),
        questions = key.total_slots(),
        "loaded answer key"
    );
    Ok(key)
}

/// Recursively load all `.toml` answer-key files from a directory.
///
/// Files that fail to parse are skipped with a warning.
pub fn load_answer_key_directory(dir: &Path) -> Result<Vec<AnswerKey>> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    paths.sort();

    let mut keys = Vec::new();
    for path in paths {
        if path.is_dir() {
            keys.extend(load_answer_key_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_answer_key(&path) {
                Ok(key) => keys.push(key),
                Err(e) => {
                    tracing::warn!("skipping {}: {e:#}", path.display());
                }
            }
        }
    }

    Ok(keys)
}

/// Expected slot count of a full test.
pub const FULL_TEST_QUESTIONS: u32 = 40;

/// A warning from answer-key validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question key (if applicable).
    pub key: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Check a built answer key for scorable but suspicious definitions.
pub fn validate_answer_key(key: &AnswerKey) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let warn = |k: &str, message: String| ValidationWarning {
        key: Some(k.to_string()),
        message,
    };

    for entry in key.entries() {
        match &entry.spec {
            AnswerSpec::Choice(code) => {
                if code.trim().contains(char::is_whitespace) {
                    warnings.push(warn(
                        &entry.key,
                        format!("choice code '{code}' contains whitespace"),
                    ));
                }
            }
            AnswerSpec::Literal(_) | AnswerSpec::Categorical(_) => {}
            AnswerSpec::EitherOrder { siblings, accepted } => {
                if accepted.len() < siblings.len() {
                    warnings.push(warn(
                        &entry.key,
                        format!(
                            "{} siblings share only {} accepted values; some can never be correct",
                            siblings.len(),
                            accepted.len()
                        ),
                    ));
                }
            }
            AnswerSpec::MultiSelect { accepted, choose } => {
                if *choose as usize != accepted.len() {
                    warnings.push(warn(
                        &entry.key,
                        format!(
                            "choose is {choose} but {} values are accepted",
                            accepted.len()
                        ),
                    ));
                }
            }
        }
    }

    let total = key.total_slots();
    if total != FULL_TEST_QUESTIONS {
        warnings.push(ValidationWarning {
            key: None,
            message: format!(
                "answer key has {total} questions; band tables assume {FULL_TEST_QUESTIONS}"
            ),
        });
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[test]
book = 17
module = "reading"
test_number = 1
duplicate_policy = "none-credited"

[test.literal_policy]
ignore_articles = true

[[questions]]
key = "1"
literal = "corridor/passageway"

[[questions]]
key = "2"
choice = "C"

[[questions]]
key = "3"
verdict = "NOT GIVEN"

[[questions]]
key = "19&20"
either_order = ["B", "D"]
siblings = ["19", "20"]

[[questions]]
key = "27-29"
multi_select = ["B", "C", "E"]
"#;

    fn source() -> PathBuf {
        PathBuf::from("test.toml")
    }

    #[test]
    fn parse_valid_toml() {
        let key = parse_answer_key_str(VALID_TOML, &source()).unwrap();
        assert_eq!(key.test().book, 17);
        assert_eq!(key.test().module, Skill::Reading);
        assert_eq!(key.entries().len(), 5);
        assert_eq!(key.total_slots(), 8);
        assert_eq!(key.duplicate_policy(), DuplicatePolicy::NoneCredited);
        assert!(key.literal_policy().ignore_articles);
        // untouched policy fields keep their defaults
        assert!(key.literal_policy().plural_tolerance);
        assert_eq!(
            key.entries()[2].spec,
            AnswerSpec::Categorical(Verdict::NotGiven)
        );
        assert_eq!(
            key.entries()[4].spec,
            AnswerSpec::MultiSelect {
                accepted: vec!["B".into(), "C".into(), "E".into()],
                choose: 3
            }
        );
    }

    #[test]
    fn parse_defaults() {
        let toml = r#"
[test]
book = 1
module = "listening"
test_number = 4

[[questions]]
key = "1"
choice = "A"
"#;
        let key = parse_answer_key_str(toml, &source()).unwrap();
        assert_eq!(key.duplicate_policy(), DuplicatePolicy::FirstWins);
        assert_eq!(*key.literal_policy(), LiteralPolicy::default());
    }

    #[test]
    fn empty_canonical_fails_fast() {
        let toml = r#"
[test]
book = 1
module = "reading"
test_number = 1

[[questions]]
key = "1"
literal = ""
"#;
        let err = parse_answer_key_str(toml, &source()).unwrap_err();
        assert!(
            matches!(
                err.downcast_ref::<ConfigError>(),
                Some(ConfigError::EmptyCanonical { .. })
            ),
            "{err:#}"
        );
    }

    #[test]
    fn punctuation_only_literal_fails_fast() {
        for literal in ["...", "-", "corridor/?"] {
            let toml = format!(
                r#"
[test]
book = 1
module = "reading"
test_number = 1

[[questions]]
key = "1"
literal = "{literal}"
"#
            );
            let err = parse_answer_key_str(&toml, &source()).unwrap_err();
            assert!(
                matches!(
                    err.downcast_ref::<ConfigError>(),
                    Some(ConfigError::EmptyCanonical { .. })
                ),
                "{literal}: {err:#}"
            );
        }
    }

    #[test]
    fn punctuation_literal_allowed_when_significant() {
        let toml = r#"
[test]
book = 1
module = "reading"
test_number = 1

[test.literal_policy]
ignore_punctuation = false
hyphen_as_space = false

[[questions]]
key = "1"
literal = "-"
"#;
        let key = parse_answer_key_str(toml, &source()).unwrap();
        assert_eq!(key.total_slots(), 1);
    }

    #[test]
    fn two_answer_fields_rejected() {
        let toml = r#"
[test]
book = 1
module = "reading"
test_number = 1

[[questions]]
key = "1"
literal = "x"
choice = "A"
"#;
        let err = parse_answer_key_str(toml, &source()).unwrap_err();
        assert!(format!("{err:#}").contains("exactly one answer field"));
    }

    #[test]
    fn unknown_verdict_and_module_rejected() {
        let verdict = r#"
[test]
book = 1
module = "reading"
test_number = 1

[[questions]]
key = "1"
verdict = "MAYBE"
"#;
        assert!(format!("{:#}", parse_answer_key_str(verdict, &source()).unwrap_err())
            .contains("unknown verdict"));

        let module = r#"
[test]
book = 1
module = "writing"
test_number = 1

[[questions]]
key = "1"
choice = "A"
"#;
        assert!(format!("{:#}", parse_answer_key_str(module, &source()).unwrap_err())
            .contains("unknown module"));
    }

    #[test]
    fn either_order_needs_siblings() {
        let toml = r#"
[test]
book = 1
module = "reading"
test_number = 1

[[questions]]
key = "19&20"
either_order = ["B", "D"]
"#;
        let err = parse_answer_key_str(toml, &source()).unwrap_err();
        assert!(format!("{err:#}").contains("siblings"));
    }

    #[test]
    fn declared_total_mismatch_rejected() {
        let toml = r#"
[test]
book = 1
module = "reading"
test_number = 1
total_questions = 40

[[questions]]
key = "1"
choice = "A"
"#;
        let err = parse_answer_key_str(toml, &source()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::QuestionCountMismatch {
                declared: 40,
                actual: 1
            })
        ));
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        assert!(parse_answer_key_str(bad, &PathBuf::from("bad.toml")).is_err());
    }

    #[test]
    fn validate_reports_suspicious_entries() {
        let toml = r#"
[test]
book = 1
module = "reading"
test_number = 1

[[questions]]
key = "1"
literal = "timber"

[[questions]]
key = "2"
choice = "A B"

[[questions]]
key = "3&4&5"
either_order = ["B", "D"]
siblings = ["3", "4", "5"]

[[questions]]
key = "6-8"
multi_select = ["A", "C", "F"]
choose = 2
"#;
        let key = parse_answer_key_str(toml, &source()).unwrap();
        let warnings = validate_answer_key(&key);
        let for_key = |k: &str| warnings.iter().any(|w| w.key.as_deref() == Some(k));
        assert!(!for_key("1"));
        assert!(for_key("2"));
        assert!(for_key("3&4&5"));
        assert!(for_key("6-8"));
        assert!(warnings
            .iter()
            .any(|w| w.key.is_none() && w.message.contains("8 questions")));
    }

    #[test]
    fn load_directory_skips_broken_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("good.toml"), VALID_TOML).unwrap();
        std::fs::write(dir.path().join("bad.toml"), "[test]\nbook = 1").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested/also.toml"), VALID_TOML).unwrap();

        let keys = load_answer_key_directory(dir.path()).unwrap();
        assert_eq!(keys.len(), 2);
        assert!(load_answer_key_directory(&dir.path().join("good.toml")).is_err());
    }
}
