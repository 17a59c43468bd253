//! Test utilities and mocks for pcp unit tests.
//!
//! This module provides in-memory stand-ins for the toolchain-backed
//! resolver and fetcher, so the copy engine can be tested without Go
//! installed.

pub mod fixtures;

use std::collections::{HashMap, HashSet};
use std::fs;
use std::sync::Mutex;

use crate::core::{Location, PackageId, PackageMetadata, Workspace};
use crate::sources::{FetchError, Fetcher, MetadataResolver, ResolveError};

pub use fixtures::*;

/// Resolver backed by a table of known locations.
///
/// Keys are identifiers or directory paths as displayed. Unknown locations
/// fail with [`ResolveError::NoSources`]. Every lookup is recorded.
#[derive(Debug, Default)]
pub struct MockResolver {
    packages: Mutex<HashMap<String, Result<PackageMetadata, ResolveError>>>,
    calls: Mutex<Vec<String>>,
}

impl MockResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register metadata for an identifier (or any location key).
    pub fn add(&self, key: &str, meta: PackageMetadata) {
        self.packages
            .lock()
            .unwrap()
            .insert(key.to_string(), Ok(meta));
    }

    /// Register metadata for a directory.
    pub fn add_dir(&self, dir: impl AsRef<std::path::Path>, meta: PackageMetadata) {
        self.add(&dir.as_ref().display().to_string(), meta);
    }

    /// Register a location whose lookup fails.
    pub fn add_unresolvable(&self, key: &str) {
        self.packages.lock().unwrap().insert(
            key.to_string(),
            Err(ResolveError::Package {
                location: key.to_string(),
                message: "cannot find package".to_string(),
            }),
        );
    }

    /// All lookups so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of lookups for one key.
    pub fn calls_for(&self, key: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == key).count()
    }
}

impl MetadataResolver for MockResolver {
    fn resolve(&self, location: &Location) -> Result<PackageMetadata, ResolveError> {
        let key = location.to_string();
        self.calls.lock().unwrap().push(key.clone());

        match self.packages.lock().unwrap().get(&key) {
            Some(result) => result.clone(),
            None => Err(ResolveError::NoSources {
                dir: key.into(),
            }),
        }
    }
}

/// Fetcher that records requests and drops a marker file in the workspace.
#[derive(Debug, Default)]
pub struct MockFetcher {
    failing: Mutex<HashSet<PackageId>>,
    calls: Mutex<Vec<PackageId>>,
}

impl MockFetcher {
    /// File written into each successfully fetched package directory.
    pub const MARKER: &'static str = "FETCHED";

    pub fn new() -> Self {
        Self::default()
    }

    /// Make fetches of `id` fail.
    pub fn fail_on(&self, id: &str) {
        self.failing.lock().unwrap().insert(PackageId::new(id));
    }

    /// All fetch requests so far, in order.
    pub fn calls(&self) -> Vec<PackageId> {
        self.calls.lock().unwrap().clone()
    }
}

impl Fetcher for MockFetcher {
    fn fetch(&self, id: &PackageId, workspace: &Workspace) -> Result<(), FetchError> {
        self.calls.lock().unwrap().push(id.clone());

        if self.failing.lock().unwrap().contains(id) {
            return Err(FetchError::Status {
                command: format!("go get -d -t {}", id),
                status: "exit status: 1".to_string(),
            });
        }

        let dir = workspace.package_dir(id);
        fs::create_dir_all(&dir)
            .and_then(|_| fs::write(dir.join(Self::MARKER), id.as_str()))
            .map_err(|e| FetchError::Spawn {
                command: format!("go get -d -t {}", id),
                reason: e.to_string(),
            })
    }
}
