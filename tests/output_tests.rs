use std::cell::RefCell;
use std::path::{Path, PathBuf};

use speedscope_flamegraph::flamegraph::FlamegraphGenerator;
use speedscope_flamegraph::output::{read_profile, validate_path, write_profile, Viewer};
use speedscope_flamegraph::utils::{SaveError, ViewerError};
use tempfile::NamedTempFile;

/// Viewer that records the paths it was asked to open
#[derive(Default)]
struct RecordingViewer {
    opened: RefCell<Vec<PathBuf>>,
}

impl Viewer for RecordingViewer {
    fn open(&self, path: &Path) -> Result<(), ViewerError> {
        self.opened.borrow_mut().push(path.to_path_buf());
        Ok(())
    }
}

struct FailingViewer;

impl Viewer for FailingViewer {
    fn open(&self, _path: &Path) -> Result<(), ViewerError> {
        Err(ViewerError::ExitStatus {
            command: "speedscope".to_string(),
            status: "exit status: 1".to_string(),
        })
    }
}

fn create_test_generator() -> FlamegraphGenerator {
    let mut generator = FlamegraphGenerator::new();
    generator.add_event("request", 0, 100).unwrap();
    generator.add_event("db_query", 10, 40).unwrap();
    generator
}

#[test]
fn test_write_and_read_profile() {
    let document = create_test_generator().generate();
    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path();

    write_profile(&document, path).unwrap();
    let loaded = read_profile(path).unwrap();

    assert_eq!(loaded, document);
}

#[test]
fn test_validate_output_path_empty() {
    let result = validate_path(Path::new(""));
    assert!(result.is_err());
}

#[test]
fn test_validate_output_path_directory() {
    let temp_dir = tempfile::tempdir().unwrap();
    let result = validate_path(temp_dir.path());
    assert!(result.is_err());
}

#[test]
fn test_write_creates_parent_dirs() {
    let temp_dir = tempfile::tempdir().unwrap();
    let nested_path = temp_dir.path().join("nested/dirs/flamegraph.json");

    let document = create_test_generator().generate();
    write_profile(&document, &nested_path).unwrap();

    assert!(nested_path.exists());
}

#[test]
fn test_save_opens_written_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("flamegraph.json");
    let viewer = RecordingViewer::default();

    create_test_generator().save(&path, Some(&viewer)).unwrap();

    assert!(path.exists());
    assert_eq!(*viewer.opened.borrow(), vec![path.clone()]);

    let loaded = read_profile(&path).unwrap();
    assert_eq!(loaded.shared.frames.len(), 2);
}

#[test]
fn test_save_without_viewer() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("flamegraph.json");

    create_test_generator().save(&path, None).unwrap();

    assert!(path.exists());
}

#[test]
fn test_save_reports_viewer_failure_after_writing() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("flamegraph.json");

    let result = create_test_generator().save(&path, Some(&FailingViewer));

    assert!(matches!(result, Err(SaveError::Viewer(_))));
    assert!(path.exists());
}

#[test]
fn test_save_to_directory_fails_without_opening() {
    let temp_dir = tempfile::tempdir().unwrap();
    let viewer = RecordingViewer::default();

    let result = create_test_generator().save(temp_dir.path(), Some(&viewer));

    assert!(matches!(result, Err(SaveError::Output(_))));
    assert!(viewer.opened.borrow().is_empty());
}

#[test]
fn test_save_empty_generator_writes_empty_document() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("flamegraph.json");

    FlamegraphGenerator::new().save(&path, None).unwrap();

    let loaded = read_profile(&path).unwrap();
    assert!(loaded.is_empty());
    assert!(loaded.shared.frames.is_empty());
}
