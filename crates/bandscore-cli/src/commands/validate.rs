//! The `bandscore validate` command.

use std::path::PathBuf;

use anyhow::Result;

use bandscore_core::parser::{load_answer_key_directory, parse_answer_key, validate_answer_key};

use crate::config::BandscoreConfig;

pub fn execute(config: &BandscoreConfig, key_path: Option<PathBuf>) -> Result<()> {
    let key_path = key_path.unwrap_or_else(|| config.answer_keys_dir.clone());

    let keys = if key_path.is_dir() {
        load_answer_key_directory(&key_path)?
    } else {
        vec![parse_answer_key(&key_path)?]
    };

    if keys.is_empty() {
        anyhow::bail!("no valid answer keys found in {}", key_path.display());
    }

    let mut total_warnings = 0;

    for key in &keys {
        println!("{} ({} questions)", key.test(), key.total_slots());

        let warnings = validate_answer_key(key);
        for w in &warnings {
            let prefix = w
                .key
                .as_ref()
                .map(|k| format!("  [{k}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All answer keys valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
