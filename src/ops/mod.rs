//! High-level operations.
//!
//! This module contains the copy engine and the root-package driver used by
//! the `pcp` binary.

pub mod copy_pkg;
pub mod find_pkg;
pub mod pcp_copy;
pub mod sub_packages;

pub use copy_pkg::{CopyContext, CopyOptions, CopyStats};
pub use find_pkg::{find_package, Lookup};
pub use pcp_copy::copy_roots;
pub use sub_packages::{find_sub_packages, CopyRequest};
