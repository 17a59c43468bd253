//! Core data structures.
//!
//! This module contains the foundational types used throughout pcp:
//! - Package identifiers and locations
//! - Package metadata and command-line package specs
//! - The destination workspace

pub mod location;
pub mod package;
pub mod package_id;
pub mod package_spec;
pub mod workspace;

pub use location::Location;
pub use package::PackageMetadata;
pub use package_id::PackageId;
pub use package_spec::PackageSpec;
pub use workspace::Workspace;
