//! pcp - copy a Go package and its dependencies into a fresh workspace
//!
//! This crate provides the library behind the `pcp` binary: package
//! lookup, the recursive copy engine, and permission-preserving tree
//! copies.

pub mod core;
pub mod ops;
pub mod sources;
pub mod util;

/// Test utilities and mocks for pcp unit tests.
///
/// This module is only available when compiling with `--cfg test`. It
/// provides mock implementations of the metadata resolver and fetcher.
#[cfg(test)]
pub mod test_support;

pub use core::{Location, PackageId, PackageMetadata, PackageSpec, Workspace};
pub use ops::{copy_roots, CopyContext, CopyOptions};
pub use sources::{Fetcher, GoGetFetcher, GoListResolver, MetadataResolver};
pub use util::{Config, PcpError, Reporter, Shell};
