//! Terminal output: run summary, progress spinner and output formats.

use clap::ValueEnum;
use colored::Colorize;
use dangle::audit::AuditSummary;
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Colored, human-readable text
    #[default]
    Pretty,
    /// JSON output
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => anyhow::bail!(
                "Unknown output format: {}\n\
                 Valid formats: pretty, json",
                s
            ),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Spinner on stderr counting processed records.
///
/// Hidden when `visible` is false; indicatif also hides it when stderr is not
/// a terminal.
pub fn spinner(visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}

/// Spinner message for the running totals
pub fn progress_message(summary: &AuditSummary) -> String {
    format!(
        "walking {}: {} pages, {} records, {} unknown",
        summary.zone_id, summary.pages, summary.records, summary.unknown
    )
}

/// Print the end-of-run summary to stdout
pub fn print_summary(
    summary: &AuditSummary,
    recognized: &Path,
    unknown: &Path,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(summary)?);
        }
        OutputFormat::Pretty => {
            println!("{} {}", "Zone:".bold(), summary.zone_id.cyan());
            println!(
                "  {} {} pages, {} records ({} other types skipped)",
                "walked:".bold(),
                summary.pages,
                summary.records,
                summary.skipped
            );
            println!(
                "  {} {} targets -> {}",
                "recognized:".bold(),
                summary.recognized.to_string().green(),
                recognized.display()
            );

            let unknown_count = if summary.unknown == 0 {
                summary.unknown.to_string().green()
            } else {
                summary.unknown.to_string().red().bold()
            };
            println!("  {} {} targets -> {}", "unknown:".bold(), unknown_count, unknown.display());

            if !summary.malformed.is_empty() {
                println!(
                    "  {} {} records skipped",
                    "malformed:".bold(),
                    summary.malformed.len().to_string().yellow()
                );
                for record in &summary.malformed {
                    println!("    {} {}", "-".dimmed(), record.reason);
                }
            }

            if let Some(elapsed) = summary.elapsed() {
                let millis = elapsed.num_milliseconds();
                #[allow(clippy::cast_precision_loss)]
                let seconds = millis as f64 / 1000.0;
                println!("  {} {seconds:.1}s", "elapsed:".bold());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_parsing() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Pretty);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn progress_message_shows_totals() {
        let mut summary = AuditSummary::start("Z1");
        summary.pages = 2;
        summary.records = 7;
        summary.unknown = 1;
        assert_eq!(progress_message(&summary), "walking Z1: 2 pages, 7 records, 1 unknown");
    }
}
