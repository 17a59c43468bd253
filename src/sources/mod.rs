//! Package sources.
//!
//! Sources answer two questions for the copy engine: where does a package's
//! code live right now, and how do we get it when it isn't anywhere local.

pub mod go;
pub mod source;

pub use go::{GoGetFetcher, GoListResolver};
pub use source::{FetchError, Fetcher, MetadataResolver, ResolveError};
