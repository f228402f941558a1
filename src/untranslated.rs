use crate::config::Untranslated;
use crate::diff::join_path;
use anyhow::Result;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub key: String,
    pub value: String,
}

/// Flags string leaves under content-bearing keys whose letters are mostly ASCII.
#[derive(Debug, Clone)]
pub struct ContentScanner {
    terms: Vec<String>,
    threshold: f64,
    // ASCII digits and anything that is not a letter, number or underscore
    strip: Regex,
}

impl ContentScanner {
    pub fn new(cfg: &Untranslated) -> Result<Self> {
        Ok(Self {
            terms: cfg.content_terms.iter().filter(|t| !t.is_empty()).cloned().collect(),
            threshold: cfg.ascii_threshold,
            strip: Regex::new(r"[0-9]|[^\p{L}\p{N}_]")?,
        })
    }

    /// Matches anywhere in the dotted path, so an ancestor segment qualifies its leaves.
    pub fn is_content_key(&self, path: &str) -> bool {
        self.terms.iter().any(|t| path.contains(t.as_str()))
    }

    pub fn is_mostly_english(&self, v: &Value) -> bool {
        let Value::String(text) = v else { return false };
        let clean = self.strip.replace_all(text, "");
        let total = clean.chars().count();
        if total == 0 {
            return false;
        }
        let ascii = clean.chars().filter(|c| c.is_ascii()).count();
        (ascii as f64 / total as f64) > self.threshold
    }

    /// Candidates in traversal order.
    pub fn find_untranslated(&self, obj: &Map<String, Value>, prefix: Option<&str>) -> Vec<Candidate> {
        let mut out = Vec::new();
        for (k, val) in obj.iter() {
            let key = join_path(prefix, k);
            match val {
                Value::Object(child) => out.extend(self.find_untranslated(child, Some(&key))),
                Value::String(s) => {
                    if self.is_content_key(&key) && self.is_mostly_english(val) {
                        out.push(Candidate { key, value: s.clone() });
                    }
                }
                _ => {}
            }
        }
        out
    }
}
