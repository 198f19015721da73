//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};
use clap_complete::Shell;

use crate::cli::error::{CliError, CliResult};
use crate::config::Settings;
use crate::domain::{ElementOrder, RenderStyle};

/// Render set-operation trees as ASCII diagrams
#[derive(Parser, Debug)]
#[command(name = "settree")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input files with one node per line (`-` reads stdin)
    #[arg(value_hint = ValueHint::FilePath)]
    pub files: Vec<PathBuf>,

    /// Diagram layout: ascii or tree
    #[arg(short, long)]
    pub style: Option<RenderStyle>,

    /// Print set elements in ascending order
    #[arg(long)]
    pub sort: bool,

    /// Reject blank lines instead of skipping them
    #[arg(long)]
    pub keep_blank_lines: bool,

    /// Do not print a header before each tree
    #[arg(long)]
    pub no_header: bool,

    /// Config file layered over the global one
    #[arg(short, long, env = "SETTREE_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Debug output: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count)]
    pub debug: u8,

    /// Generate shell completions and exit
    #[arg(long = "generate", value_enum)]
    pub generator: Option<Shell>,

    /// Print author, version and effective settings
    #[arg(long)]
    pub info: bool,
}

impl Cli {
    /// Reject argument combinations clap cannot express.
    pub fn validate(&self) -> CliResult<()> {
        if self.files.is_empty() && !self.info {
            return Err(CliError::Usage(
                "no input files given, pass one or more paths or '-' for stdin".to_string(),
            ));
        }
        let stdin_count = self.files.iter().filter(|p| p.as_os_str() == "-").count();
        if stdin_count > 1 {
            return Err(CliError::InvalidArgs(
                "stdin ('-') can only be read once".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply command line flags on top of loaded settings.
    pub fn apply_to(&self, mut settings: Settings) -> Settings {
        if let Some(style) = self.style {
            settings.style = style;
        }
        if self.sort {
            settings.order = ElementOrder::Ascending;
        }
        if self.keep_blank_lines {
            settings.skip_blank_lines = false;
        }
        if self.no_header {
            settings.header = false;
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exitcode;
    use clap::CommandFactory;

    #[test]
    fn given_no_files_when_validating_then_usage_error() {
        let cli = Cli::parse_from(["settree"]);
        let err = cli.validate().unwrap_err();
        assert_eq!(err.exit_code(), exitcode::USAGE);
    }

    #[test]
    fn given_info_without_files_when_validating_then_ok() {
        let cli = Cli::parse_from(["settree", "--info"]);
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn given_config_arg_when_inspecting_then_falls_back_to_env_var() {
        let cmd = Cli::command();
        let config = cmd
            .get_arguments()
            .find(|arg| arg.get_id() == "config")
            .unwrap();
        assert_eq!(config.get_env(), Some(std::ffi::OsStr::new("SETTREE_CONFIG")));
    }

    #[test]
    fn given_stdin_twice_when_validating_then_invalid_args() {
        let cli = Cli::parse_from(["settree", "-", "a.txt", "-"]);
        assert!(matches!(cli.validate(), Err(CliError::InvalidArgs(_))));
    }
}
