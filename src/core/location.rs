//! Where to look for a package.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use crate::core::PackageId;

/// A package location: a directory on disk or an identifier looked up on
/// the ambient search path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Directory(PathBuf),
    Identifier(PackageId),
}

impl Location {
    /// Classify a location string.
    ///
    /// Strings that look like paths (`.`, `..`, `./x`, `../x`, `/x`) are
    /// directories; everything else is an identifier.
    pub fn parse(s: &str) -> Location {
        if is_directory_style(s) {
            Location::Directory(PathBuf::from(s))
        } else {
            Location::Identifier(PackageId::new(s))
        }
    }

    pub fn directory(path: impl Into<PathBuf>) -> Location {
        Location::Directory(path.into())
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, Location::Directory(_))
    }

    /// Make a directory location absolute. Identifiers are returned as-is.
    pub fn to_absolute(&self) -> io::Result<Location> {
        match self {
            Location::Directory(dir) if !dir.is_absolute() => {
                Ok(Location::Directory(std::path::absolute(dir)?))
            }
            other => Ok(other.clone()),
        }
    }

    /// Identifier to use when nothing better is known.
    pub fn fallback_id(&self) -> PackageId {
        match self {
            Location::Directory(dir) => PackageId::new(dir.to_string_lossy()),
            Location::Identifier(id) => id.clone(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Directory(dir) => write!(f, "{}", dir.display()),
            Location::Identifier(id) => write!(f, "{}", id),
        }
    }
}

impl From<&Path> for Location {
    fn from(path: &Path) -> Self {
        Location::Directory(path.to_path_buf())
    }
}

fn is_directory_style(s: &str) -> bool {
    s == "."
        || s == ".."
        || s.starts_with("./")
        || s.starts_with("../")
        || s.starts_with('/')
}
