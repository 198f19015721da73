//! Tests for TransduceService
//!
//! - Valid input renders to `Outcome::Rendered`
//! - Invalid trees are `Outcome::Rejected`, never an error
//! - Only unreadable input is an `ApplicationError`

use std::collections::HashMap;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::NamedTempFile;

use settree::application::{transduce, ApplicationError, Outcome, TransduceService};
use settree::config::Settings;
use settree::domain::{ElementOrder, ParseError};
use settree::infrastructure::traits::{InputSource, RealInputSource};
use settree::infrastructure::ServiceContainer;

/// In-memory input keyed by path
#[derive(Default)]
struct MemoryInput {
    files: HashMap<PathBuf, Vec<String>>,
}

impl MemoryInput {
    fn with(mut self, path: &str, text: &str) -> Self {
        self.files
            .insert(PathBuf::from(path), text.lines().map(str::to_string).collect());
        self
    }
}

impl InputSource for MemoryInput {
    fn read_lines(&self, path: &Path) -> io::Result<Vec<String>> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such input"))
    }
}

fn service(input: MemoryInput, settings: Settings) -> TransduceService {
    TransduceService::new(Arc::new(input), Arc::new(settings))
}

// ============================================================
// transduce() tests
// ============================================================

#[test]
fn given_valid_lines_when_transducing_then_diagram() {
    let out = transduce(["1,,U", "2,1,1,2", "3,1,2,3"], &Settings::default()).unwrap();

    assert!(out.starts_with("1 : U -> {1, 2, 3}\n"));
}

#[test]
fn given_invalid_lines_when_transducing_then_parse_error() {
    let err = transduce(["1,,U", "garbage"], &Settings::default()).unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Parse(ParseError::MalformedLine { line_no: 2, .. })
    ));
    assert_eq!(err.to_string(), "invalid format in line 2: garbage");
}

// ============================================================
// transduce_lines() tests
// ============================================================

#[test]
fn given_duplicate_id_when_transducing_lines_then_rejected() {
    // Arrange
    let svc = service(MemoryInput::default(), Settings::default());

    // Act
    let outcome = svc.transduce_lines(&["1,,U", "2,1,3", "2,1,4"]);

    // Assert
    assert!(!outcome.is_rendered());
    assert!(matches!(
        outcome,
        Outcome::Rejected(ParseError::DuplicateId { id: 2, line_no: 3, .. })
    ));
}

#[test]
fn given_blank_lines_when_skipping_disabled_then_rejected() {
    let settings = Settings {
        skip_blank_lines: false,
        ..Settings::default()
    };
    let svc = service(MemoryInput::default(), settings);

    let outcome = svc.transduce_lines(&["1,,U", "", "2,1,3"]);

    assert!(matches!(
        outcome,
        Outcome::Rejected(ParseError::MalformedLine { line_no: 2, .. })
    ));
}

#[test]
fn given_blank_lines_by_default_when_transducing_lines_then_ignored() {
    let svc = service(MemoryInput::default(), Settings::default());

    let outcome = svc.transduce_lines(&["1,,U", "", "2,1,3", ""]);

    assert_eq!(
        outcome,
        Outcome::Rendered("1 : U -> {3}\n|\n+- 2 : {3} -> {3}\n".to_string())
    );
}

// ============================================================
// transduce_file() tests
// ============================================================

#[test]
fn given_known_path_when_transducing_file_then_rendered_with_settings() {
    // Arrange
    let input = MemoryInput::default().with("trees/a.txt", "1,,U\n2,1,9,2\n3,1,4");
    let settings = Settings {
        order: ElementOrder::Ascending,
        ..Settings::default()
    };
    let svc = service(input, settings);

    // Act
    let outcome = svc.transduce_file(Path::new("trees/a.txt")).unwrap();

    // Assert
    match outcome {
        Outcome::Rendered(text) => assert!(text.starts_with("1 : U -> {2, 4, 9}\n")),
        Outcome::Rejected(e) => panic!("unexpected rejection: {}", e),
    }
}

#[test]
fn given_missing_path_when_transducing_file_then_operation_failed() {
    let svc = service(MemoryInput::default(), Settings::default());

    let err = svc.transduce_file(Path::new("missing.txt")).unwrap_err();

    assert!(matches!(err, ApplicationError::OperationFailed { .. }));
    assert!(err.to_string().contains("missing.txt"));
}

#[test]
fn given_stdin_path_when_read_fails_then_error_names_stdin() {
    // The in-memory source knows nothing about `-`
    let svc = service(MemoryInput::default(), Settings::default());

    let err = svc.transduce_file(Path::new("-")).unwrap_err();

    assert!(err.to_string().contains("stdin"));
}

#[test]
fn given_file_on_disk_when_transducing_then_rendered() {
    // Arrange
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "1,,I\r\n2,1,10,20,30\r\n3,1,20,30,40\r\n").unwrap();
    let svc = TransduceService::new(Arc::new(RealInputSource), Arc::new(Settings::default()));

    // Act
    let outcome = svc.transduce_file(file.path()).unwrap();

    // Assert
    assert_eq!(
        outcome,
        Outcome::Rendered(
            "1 : I -> {20, 30}\n|\n+- 2 : {10, 20, 30} -> {10, 20, 30}\n|\n+- 3 : {20, 30, 40} -> {20, 30, 40}\n"
                .to_string()
        )
    );
}

#[test]
fn given_invalid_utf8_file_when_transducing_then_malformed_line() {
    // Arrange
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"1,,U\n2,1,\xff\n").unwrap();
    let svc = TransduceService::new(Arc::new(RealInputSource), Arc::new(Settings::default()));

    // Act
    let outcome = svc.transduce_file(file.path()).unwrap();

    // Assert
    assert!(matches!(
        outcome,
        Outcome::Rejected(ParseError::MalformedLine { line_no: 2, .. })
    ));
}

#[test]
fn given_container_with_memory_input_when_transducing_then_uses_it() {
    let input = MemoryInput::default().with("t.txt", "5,,7");
    let container = ServiceContainer::with_deps(Settings::default(), Arc::new(input));

    let outcome = container.transduce_service.transduce_file(Path::new("t.txt")).unwrap();

    assert_eq!(outcome, Outcome::Rendered("5 : {7} -> {7}\n".to_string()));
}
