//! Package identification.
//!
//! A `PackageId` is a Go import path such as `github.com/org/name/sub`.
//! Equality is exact string equality; it is the key of the visited set.

use std::borrow::Borrow;
use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A hierarchical package identifier.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageId(String);

impl PackageId {
    pub fn new(id: impl Into<String>) -> Self {
        PackageId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Identifier of a package nested under this one.
    ///
    /// Relative path components are joined with `/` whatever the host
    /// separator, so `a/b` joined with `sub\inner` on Windows gives
    /// `a/b/sub/inner`.
    pub fn join(&self, relative: &Path) -> PackageId {
        let mut id = self.0.clone();
        for component in relative.components() {
            if let Component::Normal(part) = component {
                id.push('/');
                id.push_str(&part.to_string_lossy());
            }
        }
        PackageId(id)
    }

    /// Path segments of the identifier.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    /// Relative filesystem path for this package under a `src` directory.
    pub fn to_relative_path(&self) -> PathBuf {
        self.segments().collect()
    }
}

impl fmt::Debug for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PackageId({:?})", self.0)
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PackageId {
    fn from(s: &str) -> Self {
        PackageId::new(s)
    }
}

impl From<String> for PackageId {
    fn from(s: String) -> Self {
        PackageId(s)
    }
}

impl Borrow<str> for PackageId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PackageId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_join_uses_forward_slashes() {
        let base = PackageId::new("github.com/org/name");
        let sub = base.join(&Path::new("internal").join("util"));
        assert_eq!(sub.as_str(), "github.com/org/name/internal/util");
    }

    #[test]
    fn test_relative_path_layout() {
        let id = PackageId::new("example.com/a/b");
        assert_eq!(
            id.to_relative_path(),
            Path::new("example.com").join("a").join("b")
        );
    }

    #[test]
    fn test_exact_string_equality() {
        let mut set = HashSet::new();
        set.insert(PackageId::new("example.com/a"));
        assert!(set.contains("example.com/a"));
        assert!(!set.contains("example.com/a/"));
        assert!(!set.contains("Example.com/a"));
    }
}
