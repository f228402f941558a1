use crate::untranslated::Candidate;
use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Report {
    Missing(MissingReport),
    Untranslated(UntranslatedReport),
}

#[derive(Debug, Clone, Serialize)]
pub struct MissingReport {
    pub source: String,
    pub target: String,
    /// Set when the source is not the reference locale.
    #[serde(skip)]
    pub versus: bool,
    pub keys: Vec<String>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct UntranslatedReport {
    pub file: String,
    pub candidates: Vec<Candidate>,
    pub total: usize,
    #[serde(skip)]
    pub preview_chars: usize,
}

impl Report {
    pub fn total(&self) -> usize {
        match self {
            Report::Missing(r) => r.total,
            Report::Untranslated(r) => r.total,
        }
    }

    pub fn write_text<W: Write>(&self, out: &mut W) -> Result<()> {
        match self {
            Report::Missing(r) => {
                if r.versus {
                    writeln!(out, "Missing keys in {} (vs {}):", r.target, r.source)?;
                } else {
                    writeln!(out, "Missing keys in {}:", r.target)?;
                }
                for key in r.keys.iter() {
                    writeln!(out, "{}", key)?;
                }
                writeln!(out, "\nTotal missing: {}", r.total)?;
            }
            Report::Untranslated(r) => {
                writeln!(out, "Potentially untranslated English content in {}:", r.file)?;
                for c in r.candidates.iter() {
                    writeln!(out, "{}: {}...", c.key, preview(&c.value, r.preview_chars))?;
                }
                writeln!(out, "\nTotal potential untranslated: {}", r.total)?;
            }
        }
        Ok(())
    }
}

/// First `n` characters of `s`, counted in Unicode scalar values.
pub fn preview(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Text reports are separated by a blank line; JSON is one document (an array when batched).
pub fn write_reports<W: Write>(
    out: &mut W,
    reports: &[Report],
    format: OutputFormat,
    batched: bool,
) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for (i, r) in reports.iter().enumerate() {
                if i > 0 {
                    writeln!(out)?;
                }
                r.write_text(out)?;
            }
        }
        OutputFormat::Json => {
            if batched {
                serde_json::to_writer_pretty(&mut *out, reports)?;
            } else if let Some(r) = reports.first() {
                serde_json::to_writer_pretty(&mut *out, r)?;
            }
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}
