//! CLI argument parsing module for upadup

use crate::manifest::DEFAULT_CONFIG_FILE;
use crate::output::Verbosity;
use crate::update::TagMode;
use clap::Parser;
use std::path::PathBuf;

/// Keeps `additional_dependencies` of pre-commit hooks up to date
#[derive(Parser, Debug, Clone)]
#[command(
    name = "upadup",
    version,
    about = "upadup -- the pre-commit additional_dependencies updater"
)]
pub struct CliArgs {
    /// Don't apply updates; print a diff and exit 1 if updates are pending
    #[arg(long)]
    pub check: bool,

    /// Pin tag-backed dependencies to commit shas instead of tag names
    #[arg(long)]
    pub freeze: bool,

    /// Pre-commit config to update
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    pub file: PathBuf,

    /// Enable verbose output and debug logging
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - no progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl CliArgs {
    /// How tag references are rewritten
    pub fn tag_mode(&self) -> TagMode {
        if self.freeze {
            TagMode::Freeze
        } else {
            TagMode::Name
        }
    }

    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_cli(self.verbose, self.quiet)
    }

    /// Directory searched for `.upadup.toml` / `pyproject.toml`
    pub fn settings_dir(&self) -> PathBuf {
        match self.file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        let args = CliArgs::parse_from(["upadup"]);
        assert!(!args.check);
        assert!(!args.freeze);
        assert!(!args.verbose);
        assert!(!args.quiet);
        assert_eq!(args.file, PathBuf::from(".pre-commit-config.yaml"));
        assert_eq!(args.tag_mode(), TagMode::Name);
        assert_eq!(args.verbosity(), Verbosity::Normal);
    }

    #[test]
    fn test_check_flag() {
        let args = CliArgs::parse_from(["upadup", "--check"]);
        assert!(args.check);
    }

    #[test]
    fn test_freeze_flag() {
        let args = CliArgs::parse_from(["upadup", "--freeze"]);
        assert_eq!(args.tag_mode(), TagMode::Freeze);
    }

    #[test]
    fn test_file_argument() {
        let args = CliArgs::parse_from(["upadup", "--file", "sub/hooks.yaml"]);
        assert_eq!(args.file, PathBuf::from("sub/hooks.yaml"));
        assert_eq!(args.settings_dir(), PathBuf::from("sub"));
    }

    #[test]
    fn test_settings_dir_defaults_to_cwd() {
        let args = CliArgs::parse_from(["upadup"]);
        assert_eq!(args.settings_dir(), PathBuf::from("."));
    }

    #[test]
    fn test_quiet_flags() {
        let args = CliArgs::parse_from(["upadup", "-q"]);
        assert_eq!(args.verbosity(), Verbosity::Quiet);

        let args = CliArgs::parse_from(["upadup", "--quiet", "--verbose"]);
        assert_eq!(args.verbosity(), Verbosity::Quiet);
    }

    #[test]
    fn test_verbose_flag() {
        let args = CliArgs::parse_from(["upadup", "--verbose"]);
        assert_eq!(args.verbosity(), Verbosity::Verbose);
    }

    #[test]
    fn test_positional_arguments_rejected() {
        assert!(CliArgs::try_parse_from(["upadup", "extra"]).is_err());
    }
}
