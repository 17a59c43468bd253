//! Filesystem utilities.
//!
//! The centerpiece is [`TreeCopier`], which copies a package's source tree
//! into the workspace. Copying never stops at the first failure: every entry
//! that can't be read, created, or chmod'ed becomes a [`PcpError`] and the
//! walk carries on.

use std::fs::{self, File, Permissions};
use std::io;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::util::config::DEFAULT_DIR_MODE;
use crate::util::errors::{PcpError, PcpResult};

/// Copies directory trees while preserving permissions.
///
/// Permissions are applied in a second pass, after all directories exist
/// and all contents are written, in reverse creation order. A read-only
/// source directory therefore can't lock us out of its own children.
#[derive(Debug, Clone)]
pub struct TreeCopier {
    include_hidden: bool,
    hidden_marker: String,
    skip_dir: Option<PathBuf>,
    dir_mode: u32,
}

/// A destination path and the permissions it should end up with.
struct PendingChmod {
    path: PathBuf,
    permissions: Permissions,
}

impl TreeCopier {
    pub fn new() -> Self {
        TreeCopier {
            include_hidden: false,
            hidden_marker: ".".to_string(),
            skip_dir: None,
            dir_mode: DEFAULT_DIR_MODE,
        }
    }

    /// Copy entries whose names start with the hidden marker.
    pub fn include_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    pub fn hidden_marker(mut self, marker: impl Into<String>) -> Self {
        self.hidden_marker = marker.into();
        self
    }

    /// Never descend into this directory (the workspace root).
    pub fn skip_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.skip_dir = Some(dir.into());
        self
    }

    /// Mode for directories created before the permission pass.
    pub fn dir_mode(mut self, mode: u32) -> Self {
        self.dir_mode = mode;
        self
    }

    /// Recursively copy `src` into `dst`, returning every error hit on the way.
    pub fn copy_tree(&self, src: &Path, dst: &Path) -> Vec<PcpError> {
        let mut errors = Vec::new();
        let mut pending = Vec::new();

        let walker = WalkDir::new(src)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| self.should_visit(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().unwrap_or(src).to_path_buf();
                    errors.push(PcpError::operation(
                        format!("Couldn't traverse \"{}\": {}.", path.display(), e),
                        format!("error copying file: {}", e),
                    ));
                    continue;
                }
            };

            let rel = match entry.path().strip_prefix(src) {
                Ok(rel) => rel,
                Err(e) => {
                    errors.push(PcpError::internal(
                        format!(
                            "Couldn't determine \"{}\" relative to \"{}\".",
                            entry.path().display(),
                            src.display()
                        ),
                        e.to_string(),
                    ));
                    continue;
                }
            };
            let dst_path = if rel.as_os_str().is_empty() {
                dst.to_path_buf()
            } else {
                dst.join(rel)
            };

            if let Err(e) = self.copy_entry(&entry, &dst_path, &mut pending) {
                errors.push(e);
            }
        }

        for chmod in pending.iter().rev() {
            if let Err(e) = fs::set_permissions(&chmod.path, chmod.permissions.clone()) {
                errors.push(PcpError::operation(
                    format!(
                        "Couldn't set permissions on \"{}\": {}.",
                        chmod.path.display(),
                        e
                    ),
                    format!("couldn't set permissions: {}: {}", chmod.path.display(), e),
                ));
            }
        }

        errors
    }

    fn should_visit(&self, entry: &DirEntry) -> bool {
        if entry.file_type().is_dir() {
            if let Some(ref skip) = self.skip_dir {
                if is_same_dir(entry.path(), skip) {
                    tracing::debug!("skipping workspace at {}", entry.path().display());
                    return false;
                }
            }
        }

        if self.include_hidden || self.hidden_marker.is_empty() {
            return true;
        }

        // A root like `.` or `/` has no name of its own.
        let Some(name) = entry.path().file_name() else {
            return true;
        };
        !name
            .to_string_lossy()
            .starts_with(self.hidden_marker.as_str())
    }

    fn copy_entry(
        &self,
        entry: &DirEntry,
        dst_path: &Path,
        pending: &mut Vec<PendingChmod>,
    ) -> PcpResult<()> {
        let metadata = entry.metadata().map_err(|e| {
            PcpError::operation(
                format!("Couldn't read \"{}\": {}.", entry.path().display(), e),
                format!("error copying file: {}", e),
            )
        })?;
        let file_type = entry.file_type();

        if file_type.is_dir() {
            create_dir_all_with_mode(dst_path, self.dir_mode).map_err(|e| {
                PcpError::operation(
                    format!("Couldn't create directory \"{}\": {}.", dst_path.display(), e),
                    format!("couldn't create dir: {}: {}", dst_path.display(), e),
                )
            })?;
        } else if file_type.is_symlink() {
            // Links keep their own (meaningless) mode, so no chmod for them.
            return copy_symlink(entry.path(), dst_path);
        } else {
            copy_file(entry.path(), dst_path)?;
        }

        pending.push(PendingChmod {
            path: dst_path.to_path_buf(),
            permissions: source_permissions(&metadata),
        });
        Ok(())
    }
}

impl Default for TreeCopier {
    fn default() -> Self {
        Self::new()
    }
}

/// Copy a file's contents. Permissions are not preserved.
///
/// A destination that already exists read-only gets its write bit back
/// first; the caller's permission pass restores the final mode.
pub fn copy_file(src: &Path, dst: &Path) -> PcpResult<()> {
    let mut reader = File::open(src).map_err(|e| {
        PcpError::operation(
            format!("Couldn't read file \"{}\": {}.", src.display(), e),
            format!("couldn't open file for reading: {}: {}", src.display(), e),
        )
    })?;

    let mut writer = create_writable(dst).map_err(|e| {
        PcpError::operation(
            format!("Couldn't create file \"{}\": {}.", dst.display(), e),
            format!("couldn't create file: {}: {}", dst.display(), e),
        )
    })?;

    io::copy(&mut reader, &mut writer).map_err(|e| {
        PcpError::operation(
            format!("Couldn't copy the contents of \"{}\": {}.", src.display(), e),
            format!("couldn't copy file: {}: {}", src.display(), e),
        )
    })?;

    Ok(())
}

fn create_writable(path: &Path) -> io::Result<File> {
    match File::create(path) {
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied && path.is_file() => {
            let mut permissions = fs::metadata(path)?.permissions();
            make_owner_writable(&mut permissions);
            fs::set_permissions(path, permissions)?;
            File::create(path)
        }
        other => other,
    }
}

fn copy_symlink(src: &Path, dst: &Path) -> PcpResult<()> {
    let target = fs::read_link(src).map_err(|e| {
        PcpError::operation(
            format!("Couldn't read link \"{}\": {}.", src.display(), e),
            format!("couldn't read link: {}: {}", src.display(), e),
        )
    })?;

    if dst.symlink_metadata().is_ok() {
        let _ = fs::remove_file(dst);
    }

    symlink(&target, dst).map_err(|e| {
        PcpError::operation(
            format!("Couldn't create link \"{}\": {}.", dst.display(), e),
            format!("couldn't create link: {}: {}", dst.display(), e),
        )
    })
}

/// Create a directory and any missing parents with the given mode.
pub fn create_dir_all_with_mode(path: &Path, mode: u32) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;
    builder.create(path)
}

#[cfg(unix)]
fn source_permissions(metadata: &fs::Metadata) -> Permissions {
    use std::os::unix::fs::PermissionsExt;
    Permissions::from_mode(metadata.permissions().mode() & 0o7777)
}

#[cfg(not(unix))]
fn source_permissions(metadata: &fs::Metadata) -> Permissions {
    metadata.permissions()
}

#[cfg(unix)]
fn make_owner_writable(permissions: &mut Permissions) {
    use std::os::unix::fs::PermissionsExt;
    permissions.set_mode(permissions.mode() | 0o200);
}

#[cfg(not(unix))]
#[allow(clippy::permissions_set_readonly_false)]
fn make_owner_writable(permissions: &mut Permissions) {
    permissions.set_readonly(false);
}

/// Check whether `path` names the directory `dir`, either literally or once
/// symlinks and relative components are resolved.
pub fn is_same_dir(path: &Path, dir: &Path) -> bool {
    if path == dir {
        return true;
    }
    match (path.canonicalize(), dir.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Get the relative path from `base` to `path`.
pub fn relative_path(base: &Path, path: &Path) -> PathBuf {
    pathdiff::diff_paths(path, base).unwrap_or_else(|| path.to_path_buf())
}

/// Create a symlink (platform-aware).
#[cfg(unix)]
pub fn symlink(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

#[cfg(windows)]
pub fn symlink(src: &Path, dst: &Path) -> io::Result<()> {
    if src.is_dir() {
        std::os::windows::fs::symlink_dir(src, dst)
    } else {
        std::os::windows::fs::symlink_file(src, dst)
    }
}
