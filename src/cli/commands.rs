//! Command dispatch: one diagram (or parse error) per input file

use std::path::Path;

use tracing::{debug, instrument};

use crate::application::Outcome;
use crate::cli::args::Cli;
use crate::cli::error::CliError;
use crate::cli::output;
use crate::config::Settings;
use crate::exitcode;
use crate::infrastructure::ServiceContainer;

/// Per-run tally of what happened to the inputs.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub rendered: usize,
    pub rejected: usize,
    pub unreadable: usize,
}

impl RunSummary {
    /// Unreadable input outranks invalid input.
    pub fn exit_code(&self) -> i32 {
        if self.unreadable > 0 {
            exitcode::NOINPUT
        } else if self.rejected > 0 {
            exitcode::DATAERR
        } else {
            exitcode::OK
        }
    }
}

/// Process every file named on the command line.
///
/// A failing file is reported and does not stop the following ones.
#[instrument(skip_all, fields(files = cli.files.len()))]
pub fn execute(cli: &Cli, settings: Settings) -> RunSummary {
    let container = ServiceContainer::new(settings);
    let mut summary = RunSummary::default();

    for path in &cli.files {
        process_file(&container, path, &mut summary);
    }

    debug!(?summary, "run complete");
    summary
}

fn process_file(container: &ServiceContainer, path: &Path, summary: &mut RunSummary) {
    if container.settings.header {
        output::header(&format!("Printing tree for file {}", path.display()));
    }

    match container.transduce_service.transduce_file(path) {
        Ok(Outcome::Rendered(diagram)) => {
            summary.rendered += 1;
            output::diagram(&diagram);
        }
        Ok(Outcome::Rejected(e)) => {
            summary.rejected += 1;
            output::rejected(&e);
        }
        Err(e) => {
            summary.unreadable += 1;
            let e = CliError::from(e);
            debug!(exit_code = e.exit_code(), "input unreadable");
            output::error(&e);
        }
    }
}
