//! Resolver and fetcher traits - the seams to the package toolchain.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::{Location, PackageId, PackageMetadata, Workspace};

/// Maps a location to package metadata.
///
/// Directory locations are resolved against that directory; identifier
/// locations against the caller's existing workspace search path.
pub trait MetadataResolver {
    fn resolve(&self, location: &Location) -> Result<PackageMetadata, ResolveError>;
}

/// Retrieves a package that couldn't be resolved locally into the workspace.
///
/// The fetcher is trusted to pull the package's own dependencies too.
pub trait Fetcher {
    fn fetch(&self, id: &PackageId, workspace: &Workspace) -> Result<(), FetchError>;
}

/// Why a location couldn't be resolved to a package.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("no such directory: {}", dir.display())]
    NotADirectory { dir: PathBuf },

    #[error("no Go source files in {}", dir.display())]
    NoSources { dir: PathBuf },

    #[error("`{command}` failed: {reason}")]
    Command { command: String, reason: String },

    #[error("couldn't parse metadata for `{location}`: {reason}")]
    Parse { location: String, reason: String },

    #[error("couldn't find package `{location}`: {message}")]
    Package { location: String, message: String },
}

/// Why a fetch failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("couldn't run `{command}`: {reason}")]
    Spawn { command: String, reason: String },

    #[error("`{command}` exited with {status}")]
    Status { command: String, status: String },
}
