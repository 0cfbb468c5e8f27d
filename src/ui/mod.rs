//! UI/Progress presentation layer
//!
//! This module handles:
//! - One progress line per processed resource (default)
//! - Interactive progress bars using indicatif (`--progress`)
//! - Silent progress for quiet mode
//!
//! All progress reporting goes through the ProgressReporter trait, allowing
//! different implementations based on command-line flags (e.g., --quiet, --verbose).

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

/// Totals of a finished generation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationSummary {
    /// Number of embedded resources
    pub resources: usize,
    /// Sum of all embedded file sizes
    pub total_bytes: u64,
    /// Number of files written, including the aggregator
    pub files_written: usize,
}

/// Progress reporter trait for a generation run
pub trait ProgressReporter {
    /// A resource was embedded into its generated unit
    fn resource_processed(&mut self, path: &str, identifier: &str, size: usize);

    /// Non-fatal problem worth surfacing
    fn warn(&mut self, message: &str) {
        eprintln!(
            "{} {}",
            Style::new().yellow().bold().apply_to("Warning:"),
            message
        );
    }

    /// The run completed
    fn finish(&mut self, summary: &GenerationSummary);

    /// Abandon on error
    fn abandon(&mut self);
}

/// Prints one line per processed resource to stdout
#[derive(Debug, Default)]
pub struct LineProgressReporter {
    verbose: bool,
}

impl LineProgressReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl ProgressReporter for LineProgressReporter {
    fn resource_processed(&mut self, path: &str, identifier: &str, size: usize) {
        if self.verbose {
            println!(
                "{} processed {} {}",
                path,
                Style::new().cyan().apply_to(identifier),
                Style::new().dim().apply_to(format!("({} bytes)", size))
            );
        } else {
            println!("{} processed", path);
        }
    }

    fn finish(&mut self, summary: &GenerationSummary) {
        if self.verbose {
            println!(
                "{} {} resources ({} bytes), {} files written",
                Style::new().green().bold().apply_to("Done:"),
                summary.resources,
                summary.total_bytes,
                summary.files_written
            );
        }
    }

    fn abandon(&mut self) {}
}

/// Interactive progress reporter with a spinner
///
/// The resource walk is lazy, so the total is unknown and the bar only counts.
pub struct InteractiveProgressReporter {
    pb: ProgressBar,
}

impl InteractiveProgressReporter {
    pub fn new() -> Self {
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} {pos} resources {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());

        let pb = ProgressBar::new_spinner();
        pb.set_style(style);

        Self { pb }
    }
}

impl Default for InteractiveProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for InteractiveProgressReporter {
    fn resource_processed(&mut self, path: &str, _identifier: &str, _size: usize) {
        // Truncate long paths for display
        let display_path = if path.chars().count() > 50 {
            let tail: String = path.chars().skip(path.chars().count() - 47).collect();
            format!("...{}", tail)
        } else {
            path.to_string()
        };
        self.pb.set_message(display_path);
        self.pb.inc(1);
    }

    fn warn(&mut self, message: &str) {
        self.pb.suspend(|| {
            eprintln!(
                "{} {}",
                Style::new().yellow().bold().apply_to("Warning:"),
                message
            );
        });
    }

    fn finish(&mut self, summary: &GenerationSummary) {
        self.pb.finish_with_message(format!(
            "embedded ({} bytes, {} files written)",
            summary.total_bytes, summary.files_written
        ));
    }

    fn abandon(&mut self) {
        self.pb.abandon();
    }
}

/// Silent progress reporter for quiet mode
///
/// No-op implementation that does not display progress. Warnings still reach stderr.
#[derive(Debug, Default)]
pub struct SilentProgressReporter;

impl ProgressReporter for SilentProgressReporter {
    fn resource_processed(&mut self, _path: &str, _identifier: &str, _size: usize) {
        // No-op for silent mode
    }

    fn finish(&mut self, _summary: &GenerationSummary) {
        // No-op for silent mode
    }

    fn abandon(&mut self) {
        // No-op for silent mode
    }
}

/// Records every call, for asserting on driver behaviour
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingProgressReporter {
    pub processed: Vec<(String, String, usize)>,
    pub warnings: Vec<String>,
    pub summary: Option<GenerationSummary>,
    pub abandoned: bool,
}

#[cfg(test)]
impl ProgressReporter for RecordingProgressReporter {
    fn resource_processed(&mut self, path: &str, identifier: &str, size: usize) {
        self.processed
            .push((path.to_string(), identifier.to_string(), size));
    }

    fn warn(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }

    fn finish(&mut self, summary: &GenerationSummary) {
        self.summary = Some(summary.clone());
    }

    fn abandon(&mut self) {
        self.abandoned = true;
    }
}
