//! Package metadata as reported by the metadata resolver.

use std::path::PathBuf;

use crate::core::PackageId;

/// What the resolver knows about one package.
///
/// Produced fresh on every lookup; nothing caches it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageMetadata {
    /// Canonical identifier
    pub id: PackageId,

    /// Absolute source directory
    pub dir: PathBuf,

    /// Package name; empty when the directory holds no usable package
    pub name: String,

    /// Part of the standard library
    pub is_standard: bool,

    /// Direct dependencies, in declaration order
    pub imports: Vec<PackageId>,
}

impl PackageMetadata {
    pub fn new(id: impl Into<PackageId>, dir: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        PackageMetadata {
            id: id.into(),
            dir: dir.into(),
            name: name.into(),
            is_standard: false,
            imports: Vec::new(),
        }
    }

    pub fn standard(mut self) -> Self {
        self.is_standard = true;
        self
    }

    pub fn with_imports<I, S>(mut self, imports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PackageId>,
    {
        self.imports = imports.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the metadata names an actual package.
    pub fn is_usable(&self) -> bool {
        !self.name.is_empty()
    }
}
