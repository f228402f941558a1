use crate::config::{Config, LocalePair, load_config};
use crate::diff::{flatten_keys, missing_keys};
use crate::json_utils::read_dictionary;
use crate::report::{MissingReport, OutputFormat, Report, UntranslatedReport, write_reports};
use crate::untranslated::ContentScanner;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};

/// Exit status for `--strict` runs that report findings; errors exit with 1.
pub const FINDINGS_EXIT_CODE: u8 = 3;

#[derive(Parser, Debug)]
#[command(
    name = "locaudit",
    version,
    about = "Audit locale dictionaries for missing keys and untranslated text"
)]
pub struct Cli {
    /// Config file (defaults to locaudit.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List keys present in the source dictionary but missing from the target
    Missing(MissingArgs),
    /// List content strings in a dictionary that still look like English
    Untranslated(UntranslatedArgs),
    /// Run every configured diff and scan
    All(OutputArgs),
}

#[derive(Args, Debug, Clone, Copy)]
pub struct OutputArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Exit with status 3 when any finding is reported
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args, Debug)]
pub struct MissingArgs {
    /// Source locale (defaults to source_locale from config)
    #[arg(long)]
    pub source: Option<String>,
    /// Target locale (defaults to target_locale from config)
    #[arg(long)]
    pub target: Option<String>,
    /// Source dictionary path, overriding the one derived from the locale
    #[arg(long)]
    pub source_file: Option<PathBuf>,
    /// Target dictionary path, overriding the one derived from the locale
    #[arg(long)]
    pub target_file: Option<PathBuf>,
    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug)]
pub struct UntranslatedArgs {
    /// Locale to scan (defaults to target_locale from config)
    #[arg(long)]
    pub locale: Option<String>,
    /// Dictionary path, overriding the one derived from the locale
    #[arg(long)]
    pub file: Option<PathBuf>,
    /// Comma-separated content terms, e.g. title,description
    #[arg(long)]
    pub terms: Option<String>,
    /// ASCII letter fraction above which a value is flagged
    #[arg(long)]
    pub threshold: Option<f64>,
    #[command(flatten)]
    pub output: OutputArgs,
}

pub fn run(cli: Cli) -> Result<ExitCode> {
    let cfg = load_config(cli.config.as_deref())?;
    debug!(?cfg, "Loaded config");

    match cli.command {
        Commands::Missing(args) => handle_missing(&cfg, args),
        Commands::Untranslated(args) => handle_untranslated(cfg, args),
        Commands::All(output) => handle_all(&cfg, output),
    }
}

fn handle_missing(cfg: &Config, args: MissingArgs) -> Result<ExitCode> {
    let source = args.source.unwrap_or_else(|| cfg.source_locale.clone());
    let target = args.target.unwrap_or_else(|| cfg.target_locale.clone());
    let pair = LocalePair { source, target };
    let report = missing_report(cfg, &pair, args.source_file, args.target_file)?;
    emit(&[report], args.output, false)
}

fn handle_untranslated(mut cfg: Config, args: UntranslatedArgs) -> Result<ExitCode> {
    if let Some(t) = args.terms.as_ref() {
        cfg.untranslated.content_terms = t
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }
    if let Some(t) = args.threshold {
        cfg.untranslated.ascii_threshold = t;
    }
    cfg.untranslated.validate().context("Validating untranslated options")?;

    let locale = args.locale.unwrap_or_else(|| cfg.target_locale.clone());
    let report = untranslated_report(&cfg, &locale, args.file)?;
    emit(&[report], args.output, false)
}

fn handle_all(cfg: &Config, output: OutputArgs) -> Result<ExitCode> {
    let mut reports = Vec::new();
    for pair in cfg.missing_pairs.iter() {
        reports.push(missing_report(cfg, pair, None, None)?);
    }
    for locale in cfg.scan_locales.iter() {
        reports.push(untranslated_report(cfg, locale, None)?);
    }
    emit(&reports, output, true)
}

fn missing_report(
    cfg: &Config,
    pair: &LocalePair,
    source_file: Option<PathBuf>,
    target_file: Option<PathBuf>,
) -> Result<Report> {
    cfg.warn_unknown_locale(&pair.source);
    cfg.warn_unknown_locale(&pair.target);
    let source_file = source_file.unwrap_or_else(|| cfg.dictionary_path(&pair.source));
    let target_file = target_file.unwrap_or_else(|| cfg.dictionary_path(&pair.target));

    let source = read_dictionary(&source_file)
        .with_context(|| format!("Reading source dictionary for {}", pair.source))?;
    let target = read_dictionary(&target_file)
        .with_context(|| format!("Reading target dictionary for {}", pair.target))?;

    let source_keys = flatten_keys(&source, None);
    let target_keys = flatten_keys(&target, None);
    debug!(source = source_keys.len(), target = target_keys.len(), "Flattened keys");

    let keys = missing_keys(&source_keys, &target_keys);
    info!(source = %pair.source, target = %pair.target, missing = keys.len(), "Key diff complete");
    Ok(Report::Missing(MissingReport {
        source: display_name(&source_file),
        target: display_name(&target_file),
        versus: pair.source != cfg.source_locale,
        total: keys.len(),
        keys,
    }))
}

fn untranslated_report(cfg: &Config, locale: &str, file: Option<PathBuf>) -> Result<Report> {
    cfg.warn_unknown_locale(locale);
    let file = file.unwrap_or_else(|| cfg.dictionary_path(locale));
    let dict = read_dictionary(&file)
        .with_context(|| format!("Reading dictionary for {}", locale))?;

    let scanner = ContentScanner::new(&cfg.untranslated)?;
    let candidates = scanner.find_untranslated(&dict, None);
    info!(locale = %locale, flagged = candidates.len(), "Untranslated scan complete");
    Ok(Report::Untranslated(UntranslatedReport {
        file: display_name(&file),
        total: candidates.len(),
        candidates,
        preview_chars: cfg.untranslated.preview_chars,
    }))
}

fn emit(reports: &[Report], output: OutputArgs, batched: bool) -> Result<ExitCode> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_reports(&mut out, reports, output.format, batched)?;

    let findings: usize = reports.iter().map(Report::total).sum();
    if output.strict && findings > 0 {
        return Ok(ExitCode::from(FINDINGS_EXIT_CODE));
    }
    Ok(ExitCode::SUCCESS)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_missing_with_overrides() {
        let cli = Cli::try_parse_from([
            "locaudit", "missing", "--source", "ko", "--target-file", "x/ja.json", "--strict",
        ])
        .unwrap();
        match cli.command {
            Commands::Missing(args) => {
                assert_eq!(args.source.as_deref(), Some("ko"));
                assert_eq!(args.target, None);
                assert_eq!(args.target_file, Some(PathBuf::from("x/ja.json")));
                assert!(args.output.strict);
                assert_eq!(args.output.format, OutputFormat::Text);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn parses_untranslated_options() {
        let cli = Cli::try_parse_from([
            "locaudit", "--config", "c.toml", "untranslated", "--terms", "title, label",
            "--threshold", "0.5", "--format", "json",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("c.toml")));
        match cli.command {
            Commands::Untranslated(args) => {
                assert_eq!(args.terms.as_deref(), Some("title, label"));
                assert_eq!(args.threshold, Some(0.5));
                assert_eq!(args.output.format, OutputFormat::Json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(Cli::try_parse_from(["locaudit", "all", "--format", "xml"]).is_err());
    }

    #[test]
    fn display_name_uses_file_name() {
        assert_eq!(display_name(Path::new("src/dictionaries/ja.json")), "ja.json");
    }
}
