//! Error conversion helpers for reading input sources

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Name the input that failed, `stdin` for `-`.
    ///
    /// # Example
    /// ```ignore
    /// source.read_lines(path).with_input_context("read", path)?;
    /// ```
    fn with_input_context(self, action: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_input_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| {
            let input = if path == Path::new("-") {
                "stdin".to_string()
            } else {
                path.display().to_string()
            };
            ApplicationError::OperationFailed {
                context: format!("{} {}", action, input),
                source: Box::new(e),
            }
        })
    }
}
