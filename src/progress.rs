//! Spinner shown while a hook's dependencies are resolved
//!
//! Draws on stderr through indicatif, which hides it when stderr is not a
//! terminal. The spinner must be cleared before the hook's result line is
//! printed to stdout.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// Per-hook lookup progress for one run
pub struct Progress {
    enabled: bool,
    total_hooks: usize,
    started: usize,
    bar: Option<ProgressBar>,
}

impl Progress {
    /// `total_hooks` is the number of tracked hooks found by the scan
    pub fn new(enabled: bool, total_hooks: usize) -> Self {
        Self {
            enabled,
            total_hooks,
            started: 0,
            bar: None,
        }
    }

    /// Returns true while a hook is being resolved
    pub fn is_active(&self) -> bool {
        self.bar.is_some()
    }

    /// Number of hooks started so far
    pub fn started(&self) -> usize {
        self.started
    }

    /// Starts the spinner for the next hook
    pub fn start_hook(&mut self, hook_id: &str) {
        self.finish_hook();
        self.started += 1;
        if !self.enabled {
            return;
        }

        let style = ProgressStyle::default_spinner()
            .tick_chars(TICK_CHARS)
            .template("{spinner:.cyan} [{prefix}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(style);
        spinner.set_prefix(format!("{}/{}", self.started, self.total_hooks));
        spinner.set_message(format!("resolving additional_dependencies of {}", hook_id));
        spinner.enable_steady_tick(Duration::from_millis(80));
        self.bar = Some(spinner);
    }

    /// Clears the spinner of the current hook
    pub fn finish_hook(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}
