//! Text output formatter for human-readable display
//!
//! Progress is written as hooks are scanned:
//!
//! ```text
//! upadup is checking additional_dependencies of flake8...
//!   flake8-bugbear==22.12.6 => flake8-bugbear==24.2.6
//! upadup is checking additional_dependencies of blacken-docs...no updates needed
//! apply updates...done
//! ```

use crate::domain::{HookReport, UpdateSummary};
use crate::output::Verbosity;
use colored::Colorize;
use std::io::Write;

/// Text formatter for per-hook progress and the final summary
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    fn quiet(&self) -> bool {
        self.verbosity == Verbosity::Quiet
    }

    /// Starts the progress line of one hook; left open until `hook_result`
    pub fn hook_started(&self, hook_id: &str, writer: &mut dyn Write) -> std::io::Result<()> {
        if self.quiet() {
            return Ok(());
        }
        write!(writer, "upadup is checking additional_dependencies of {}...", hook_id)?;
        writer.flush()
    }

    /// Finishes the progress line of one hook
    pub fn hook_result(&self, report: &HookReport, writer: &mut dyn Write) -> std::io::Result<()> {
        if self.quiet() {
            return Ok(());
        }

        if !report.has_updates() && report.skipped.is_empty() {
            return writeln!(writer, "no updates needed");
        }

        writeln!(writer)?;
        for (old, new) in report.changes() {
            if self.color {
                writeln!(writer, "  {} => {}", old.red(), new.green())?;
            } else {
                writeln!(writer, "  {} => {}", old, new)?;
            }
        }
        for skipped in &report.skipped {
            if self.color {
                writeln!(
                    writer,
                    "  {} {} ({})",
                    "skipped".yellow(),
                    skipped.dependency,
                    skipped.reason.dimmed()
                )?;
            } else {
                writeln!(writer, "  skipped {} ({})", skipped.dependency, skipped.reason)?;
            }
        }
        Ok(())
    }

    /// Starts the write-back line
    pub fn apply_started(&self, writer: &mut dyn Write) -> std::io::Result<()> {
        if self.quiet() {
            return Ok(());
        }
        write!(writer, "apply updates...")?;
        writer.flush()
    }

    /// Finishes the write-back line
    pub fn apply_finished(&self, writer: &mut dyn Write) -> std::io::Result<()> {
        if self.quiet() {
            return Ok(());
        }
        if self.color {
            writeln!(writer, "{}", "done".green())
        } else {
            writeln!(writer, "done")
        }
    }

    /// Printed when no tracked hook needs an update
    pub fn nothing_to_do(&self, writer: &mut dyn Write) -> std::io::Result<()> {
        if self.quiet() {
            return Ok(());
        }
        writeln!(writer, "no updates needed in any hook configs")
    }

    /// Counts, shown only in verbose mode
    pub fn format_summary(
        &self,
        summary: &UpdateSummary,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if self.verbosity != Verbosity::Verbose {
            return Ok(());
        }

        let label = if self.color {
            "Summary:".bold().to_string()
        } else {
            "Summary:".to_string()
        };
        let verb = if summary.check { "pending" } else { "updated" };
        writeln!(
            writer,
            "{} {} hook(s) checked, {} dependency(ies) {}, {} skipped",
            label,
            summary.hooks_scanned(),
            summary.total_updates(),
            verb,
            summary.total_skips()
        )
    }
}
