//! Workspace - the destination GOPATH.
//!
//! A Workspace is the freshly created root every package is copied into,
//! laid out as `<root>/src/<identifier>`.

use std::path::{Path, PathBuf};

use crate::core::PackageId;
use crate::util::errors::{PcpError, PcpResult};
use crate::util::fs::create_dir_all_with_mode;

/// The destination workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    /// Absolute, canonical root directory
    root: PathBuf,
}

impl Workspace {
    /// Create the workspace directory (and parents) at `path`.
    ///
    /// An empty path is a usage error; anything that stops the directory
    /// from being created is an operation error.
    pub fn create(path: &str, dir_mode: u32) -> PcpResult<Self> {
        if path.is_empty() {
            return Err(PcpError::usage(
                "You must provide a workspace path.",
                "path is empty",
            ));
        }

        let abs = std::path::absolute(path).map_err(|e| {
            PcpError::operation(
                format!("Couldn't determine an absolute path for \"{}\".", path),
                e.to_string(),
            )
        })?;

        create_dir_all_with_mode(&abs, dir_mode).map_err(|e| {
            PcpError::operation(
                format!("Couldn't create a directory at \"{}\".", abs.display()),
                e.to_string(),
            )
        })?;

        // Canonical so the walk can recognize it when it shows up inside a
        // source tree.
        let root = abs.canonicalize().map_err(|e| {
            PcpError::internal(
                format!("Couldn't resolve the workspace path \"{}\".", abs.display()),
                e.to_string(),
            )
        })?;

        tracing::debug!("workspace at {}", root.display());
        Ok(Workspace { root })
    }

    /// Wrap an existing directory without creating anything.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Workspace { root: root.into() }
    }

    /// Get the workspace root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the `src` directory.
    pub fn src_dir(&self) -> PathBuf {
        self.root.join("src")
    }

    /// Destination directory for a package.
    pub fn package_dir(&self, id: &PackageId) -> PathBuf {
        self.src_dir().join(id.to_relative_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::errors::ErrorKind;
    use tempfile::TempDir;

    #[test]
    fn test_empty_path_is_usage_error() {
        let err = Workspace::create("", 0o750).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
        assert_eq!(err.message(), "You must provide a workspace path.");
    }

    #[test]
    fn test_invalid_path_is_error() {
        assert!(Workspace::create("\0", 0o750).is_err());
    }

    #[test]
    fn test_create_makes_directory() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("workspace");

        let ws = Workspace::create(path.to_str().unwrap(), 0o750).unwrap();

        assert!(path.is_dir());
        assert!(ws.root().is_absolute());
        assert_eq!(ws.root(), path.canonicalize().unwrap());
    }

    #[test]
    fn test_create_existing_directory_is_fine() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().to_str().unwrap();
        assert!(Workspace::create(path, 0o750).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_mode() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("ws");
        Workspace::create(path.to_str().unwrap(), 0o750).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        // The process umask may only clear bits.
        assert_eq!(mode & !0o750 & 0o777, 0);
        assert_eq!(mode & 0o700, 0o700);
    }

    #[test]
    fn test_package_dir_layout() {
        let ws = Workspace::at("/tmp/ws");
        assert_eq!(
            ws.package_dir(&PackageId::new("example.com/org/name")),
            Path::new("/tmp/ws/src/example.com/org/name")
        );
    }
}
