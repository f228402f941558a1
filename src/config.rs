use crate::errors::AuditError;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const DEFAULT_CONFIG_FILE: &str = "locaudit.toml";
pub const DICTIONARY_DIR_ENV: &str = "LOCAUDIT_DICTIONARY_DIR";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub dictionary_dir: PathBuf,
    pub file_pattern: String,
    /// Reference locale; diffs against it omit the "(vs ...)" suffix in headers.
    pub source_locale: String,
    pub target_locale: String,
    pub locales: Vec<String>,
    pub missing_pairs: Vec<LocalePair>,
    pub scan_locales: Vec<String>,
    pub untranslated: Untranslated,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LocalePair {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Untranslated {
    pub content_terms: Vec<String>,
    pub ascii_threshold: f64,
    pub preview_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dictionary_dir: PathBuf::from("src/dictionaries"),
            file_pattern: "{locale}.json".to_string(),
            source_locale: "en".to_string(),
            target_locale: "ja".to_string(),
            locales: vec!["en".into(), "ko".into(), "ja".into()],
            missing_pairs: vec![LocalePair::new("en", "ja"), LocalePair::new("ko", "ja")],
            scan_locales: vec!["ja".into()],
            untranslated: Untranslated::default(),
        }
    }
}

impl Default for Untranslated {
    fn default() -> Self {
        Self {
            content_terms: ["description", "title", "content", "question", "answer"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            ascii_threshold: 0.8,
            preview_chars: 50,
        }
    }
}

impl LocalePair {
    pub fn new(source: &str, target: &str) -> Self {
        Self { source: source.to_string(), target: target.to_string() }
    }
}

impl Config {
    pub fn dictionary_path(&self, locale: &str) -> PathBuf {
        self.dictionary_dir.join(self.file_pattern.replace("{locale}", locale))
    }

    /// Logs locales that are used but not declared in `locales`.
    pub fn warn_unknown_locale(&self, locale: &str) {
        if !self.locales.is_empty() && !self.locales.iter().any(|l| l == locale) {
            warn!(locale = %locale, known = ?self.locales, "Locale is not listed in config");
        }
    }

    pub fn validate(&self) -> Result<(), AuditError> {
        if !self.file_pattern.contains("{locale}") {
            return Err(AuditError::InvalidConfig(format!(
                "file_pattern {:?} has no {{locale}} placeholder",
                self.file_pattern
            )));
        }
        self.untranslated.validate()
    }
}

impl Untranslated {
    pub fn validate(&self) -> Result<(), AuditError> {
        if self.content_terms.iter().all(|t| t.is_empty()) {
            return Err(AuditError::InvalidConfig("content_terms must not be empty".into()));
        }
        if !(0.0..=1.0).contains(&self.ascii_threshold) {
            return Err(AuditError::InvalidConfig(format!(
                "ascii_threshold must be within 0..=1, got {}",
                self.ascii_threshold
            )));
        }
        if self.preview_chars == 0 {
            return Err(AuditError::InvalidConfig("preview_chars must be at least 1".into()));
        }
        Ok(())
    }
}

/// Loads `path` (or `locaudit.toml`), falling back to defaults when the file is absent.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let explicit = path.is_some();
    let path = path.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let mut cfg = if path.exists() {
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Reading config file {:?}", path))?;
        toml::from_str::<Config>(&contents)
            .with_context(|| format!("Parsing config file {:?}", path))?
    } else if explicit {
        return Err(AuditError::FileNotFound(path).into());
    } else {
        Config::default()
    };

    if let Ok(dir) = env::var(DICTIONARY_DIR_ENV) {
        if !dir.trim().is_empty() {
            cfg.dictionary_dir = PathBuf::from(dir);
        }
    }

    cfg.validate().with_context(|| format!("Validating config {:?}", path))?;
    Ok(cfg)
}
