//! Tree transduction service
//!
//! Runs the whole pipeline for one input: build, evaluate, render.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{evaluate, ParseError, Renderer, TreeBuilder};
use crate::infrastructure::traits::InputSource;

/// Result of transducing one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The rendered diagram
    Rendered(String),
    /// The input does not describe a valid tree
    Rejected(ParseError),
}

impl Outcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, Outcome::Rendered(_))
    }
}

/// Build, evaluate and render `lines` with `settings`.
pub fn transduce<I, S>(lines: I, settings: &Settings) -> ApplicationResult<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Ok(render_lines(lines, settings)?)
}

fn render_lines<I, S>(lines: I, settings: &Settings) -> Result<String, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let tree = TreeBuilder::new()
        .skip_blank_lines(settings.skip_blank_lines)
        .build(lines)?;
    let evaluation = evaluate(&tree);
    Ok(Renderer::new(settings.style, settings.order).render(&evaluation))
}

/// Service turning input sources into rendered trees.
pub struct TransduceService {
    input: Arc<dyn InputSource>,
    settings: Arc<Settings>,
}

impl TransduceService {
    /// Create a new transduce service.
    pub fn new(input: Arc<dyn InputSource>, settings: Arc<Settings>) -> Self {
        Self { input, settings }
    }

    /// Transduce in-memory lines. Parse failures are part of the outcome.
    pub fn transduce_lines<S: AsRef<str>>(&self, lines: &[S]) -> Outcome {
        match render_lines(lines, &self.settings) {
            Ok(rendered) => Outcome::Rendered(rendered),
            Err(e) => Outcome::Rejected(e),
        }
    }

    /// Read `path` (`-` for stdin) and transduce its lines.
    ///
    /// Only I/O failures are errors; an invalid tree is an [`Outcome::Rejected`].
    #[instrument(level = "debug", skip(self))]
    pub fn transduce_file(&self, path: &Path) -> ApplicationResult<Outcome> {
        let lines = self.input.read_lines(path).with_input_context("read", path)?;
        debug!(lines = lines.len(), "input read");
        Ok(self.transduce_lines(&lines))
    }
}
