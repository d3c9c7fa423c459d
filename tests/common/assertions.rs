use std::path::Path;

/// Read a generated file as UTF-8, panicking with the path on failure
pub fn read_output(path: &Path) -> String {
    std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("cannot read {}: {}", path.display(), e))
}

/// Assert that a generated file holds exactly the given lines, each ending in `\n`
pub fn assert_output_lines(path: &Path, expected: &[&str]) {
    let content = read_output(path);
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines, expected, "unexpected content in {}", path.display());
    assert!(
        content.is_empty() || content.ends_with('\n'),
        "{} does not end with a newline",
        path.display()
    );
}

/// All files below `root`, relative and sorted
pub fn list_files(root: &Path) -> Vec<String> {
    fn collect(dir: &Path, root: &Path, files: &mut Vec<String>) {
        for entry in std::fs::read_dir(dir).expect("Failed to read dir").flatten() {
            let path = entry.path();
            if path.is_dir() {
                collect(&path, root, files);
            } else {
                let relative = path.strip_prefix(root).expect("path outside root");
                files.push(relative.to_string_lossy().replace('\\', "/"));
            }
        }
    }

    let mut files = Vec::new();
    collect(root, root, &mut files);
    files.sort();
    files
}
