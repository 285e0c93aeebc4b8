//! Output formatting for update results
//!
//! This module provides:
//! - Text output for per-hook progress and the final summary
//! - Unified diff output for check mode

mod diff;
mod text;

pub use diff::DiffFormatter;
pub use text::TextFormatter;

/// Output verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Minimal output
    Quiet,
    /// Normal output
    #[default]
    Normal,
    /// Detailed output with additional information
    Verbose,
}

impl Verbosity {
    /// Create verbosity from CLI flags; quiet wins
    pub fn from_cli(verbose: bool, quiet: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_default() {
        assert_eq!(Verbosity::default(), Verbosity::Normal);
    }

    #[test]
    fn test_verbosity_from_cli() {
        assert_eq!(Verbosity::from_cli(false, false), Verbosity::Normal);
        assert_eq!(Verbosity::from_cli(true, false), Verbosity::Verbose);
        assert_eq!(Verbosity::from_cli(false, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_cli(true, true), Verbosity::Quiet);
    }
}
