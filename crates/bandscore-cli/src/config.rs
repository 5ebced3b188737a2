//! CLI configuration (`bandscore.toml`).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level bandscore configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandscoreConfig {
    /// Directory `validate` checks when no `--key` is given.
    #[serde(default = "default_answer_keys_dir")]
    pub answer_keys_dir: PathBuf,
    /// Directory recorded submissions are written to and read from.
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,
}

fn default_answer_keys_dir() -> PathBuf {
    PathBuf::from("./answer-keys")
}
fn default_results_dir() -> PathBuf {
    PathBuf::from("./bandscore-results")
}

impl Default for BandscoreConfig {
    fn default() -> Self {
        Self {
            answer_keys_dir: default_answer_keys_dir(),
            results_dir: default_results_dir(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `bandscore.toml` in the current directory
/// 2. `~/.config/bandscore/config.toml`
///
/// `BANDSCORE_RESULTS_DIR` overrides `results_dir`.
pub fn load_config_from(path: Option<&Path>) -> Result<BandscoreConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("bandscore.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => BandscoreConfig::default(),
    };

    if let Ok(dir) = std::env::var("BANDSCORE_RESULTS_DIR") {
        config.results_dir = PathBuf::from(dir);
    }

    Ok(config)
}

fn parse_config(content: &str) -> Result<BandscoreConfig> {
    let mut config: BandscoreConfig = toml::from_str(content)?;
    config.answer_keys_dir = resolve_path(&config.answer_keys_dir);
    config.results_dir = resolve_path(&config.results_dir);
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("bandscore"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_BANDSCORE_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_BANDSCORE_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_BANDSCORE_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("unterminated ${OOPS"), "unterminated ${OOPS");
        std::env::remove_var("_BANDSCORE_TEST_VAR");
    }

    #[test]
    fn default_config() {
        let config = BandscoreConfig::default();
        assert_eq!(config.answer_keys_dir, PathBuf::from("./answer-keys"));
        assert_eq!(config.results_dir, PathBuf::from("./bandscore-results"));
    }

    #[test]
    fn parse_partial_config() {
        let config = parse_config(r#"results_dir = "/tmp/scores""#).unwrap();
        assert_eq!(config.results_dir, PathBuf::from("/tmp/scores"));
        assert_eq!(config.answer_keys_dir, default_answer_keys_dir());
    }

    #[test]
    fn parse_resolves_env_references() {
        std::env::set_var("_BANDSCORE_KEYS_ROOT", "/srv/keys");
        let config = parse_config(r#"answer_keys_dir = "${_BANDSCORE_KEYS_ROOT}/book17""#).unwrap();
        assert_eq!(config.answer_keys_dir, PathBuf::from("/srv/keys/book17"));
        std::env::remove_var("_BANDSCORE_KEYS_ROOT");
    }

    #[test]
    fn explicit_missing_path_is_error() {
        let err = load_config_from(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bandscore.toml");
        std::fs::write(&path, "answer_keys_dir = \"keys\"\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.answer_keys_dir, PathBuf::from("keys"));
    }
}
