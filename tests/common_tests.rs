//! Tests for the common test infrastructure
//! This file runs these tests only once instead of duplicating them in every test binary

mod common;

use common::{list_files, TestWorkspace};

#[test]
fn test_workspace_creation() {
    let workspace = TestWorkspace::new();
    let path = workspace.create_file("nested/test.gmi", "content");

    assert!(path.exists());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "content");
    assert!(!workspace.output_dir().exists());
    assert_eq!(list_files(&workspace.input_dir()), vec!["nested/test.gmi"]);
}
