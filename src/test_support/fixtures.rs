//! Filesystem fixtures for package trees.

use std::fs;
use std::path::{Path, PathBuf};

/// Create `parent/rel` with the given files, each holding a line naming
/// itself. Returns the directory.
pub fn package_dir(parent: &Path, rel: &str, files: &[&str]) -> PathBuf {
    let dir = parent.join(rel);
    fs::create_dir_all(&dir).unwrap();
    for file in files {
        fs::write(dir.join(file), format!("// {}\n", file)).unwrap();
    }
    dir
}
