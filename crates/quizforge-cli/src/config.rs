//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level quizforge configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizforgeConfig {
    /// Directory holding persisted session progress.
    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,
    /// Directory for score reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Default report formats on submit.
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_state_dir() -> PathBuf {
    PathBuf::from("./quizforge-state")
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./quizforge-results")
}
fn default_format() -> String {
    "json".to_string()
}

impl Default for QuizforgeConfig {
    fn default() -> Self {
        Self {
            state_dir: default_state_dir(),
            output_dir: default_output_dir(),
            format: default_format(),
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `quizforge.toml` in the current directory
/// 2. `~/.config/quizforge/config.toml`
///
/// A missing config means defaults, not an error.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizforgeConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizforge.toml");
        if local.exists() {
            Some(local)
        } else {
            config_home().filter(|p| p.exists())
        }
    };

    match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))
        }
        None => Ok(QuizforgeConfig::default()),
    }
}

fn config_home() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizforge").join("config.toml"))
}
