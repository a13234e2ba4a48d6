use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::session::mode::{Direction, TrainingMode};

pub const LANGUAGES: &[&str] = &["en", "ru"];

const MAX_THRESHOLD: u32 = 20;
const MAX_DELAY_MS: u64 = 10_000;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_dictionary_path")]
    pub dictionary_path: PathBuf,
    #[serde(default = "default_verbs_path")]
    pub verbs_path: PathBuf,
    #[serde(default = "default_word_threshold")]
    pub word_threshold: u32,
    #[serde(default = "default_verb_threshold")]
    pub verb_threshold: u32,
    #[serde(default = "default_correct_delay_ms")]
    pub correct_delay_ms: u64,
    #[serde(default = "default_incorrect_delay_ms")]
    pub incorrect_delay_ms: u64,
    #[serde(default)]
    pub direction: Direction,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_dictionary_path() -> PathBuf {
    PathBuf::from("dictionary.txt")
}
fn default_verbs_path() -> PathBuf {
    PathBuf::from("irregular_verbs.txt")
}
fn default_word_threshold() -> u32 {
    2
}
fn default_verb_threshold() -> u32 {
    1
}
fn default_correct_delay_ms() -> u64 {
    800
}
fn default_incorrect_delay_ms() -> u64 {
    1500
}
fn default_theme() -> String {
    "catppuccin-mocha".to_string()
}
fn default_language() -> String {
    "en".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dictionary_path: default_dictionary_path(),
            verbs_path: default_verbs_path(),
            word_threshold: default_word_threshold(),
            verb_threshold: default_verb_threshold(),
            correct_delay_ms: default_correct_delay_ms(),
            incorrect_delay_ms: default_incorrect_delay_ms(),
            direction: Direction::default(),
            theme: default_theme(),
            language: default_language(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)
                .with_context(|| format!("invalid config {}", path.display()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Defaults when the file at `path` is unusable, plus the reason so the
    /// caller can report it once logging is up.
    pub fn load_or_default(path: &Path) -> (Self, Option<anyhow::Error>) {
        match Self::load_from(path) {
            Ok(config) => (config, None),
            Err(err) => (Config::default(), Some(err)),
        }
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(path)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("slovarik")
            .join("config.toml")
    }

    pub fn log_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("slovarik")
            .join("logs")
    }

    pub fn deck_path(&self, mode: TrainingMode) -> &PathBuf {
        match mode {
            TrainingMode::Dictionary => &self.dictionary_path,
            TrainingMode::Irregular => &self.verbs_path,
        }
    }

    /// Clamp numeric settings into range and reset unknown languages.
    /// Call after deserialization and after applying CLI overrides.
    pub fn validate(&mut self) {
        self.word_threshold = self.word_threshold.clamp(1, MAX_THRESHOLD);
        self.verb_threshold = self.verb_threshold.clamp(1, MAX_THRESHOLD);
        self.correct_delay_ms = self.correct_delay_ms.min(MAX_DELAY_MS);
        self.incorrect_delay_ms = self.incorrect_delay_ms.min(MAX_DELAY_MS);
        if !LANGUAGES.contains(&self.language.as_str()) {
            self.language = default_language();
        }
    }
}
