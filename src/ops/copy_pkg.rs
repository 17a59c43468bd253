//! Copying a package and everything it depends on into the workspace.
//!
//! Packages are found, in order: in an explicitly given directory, in the
//! caller's existing workspace, and finally by fetching them. Standard
//! packages are never copied. Each identifier is handled at most once per
//! [`CopyContext`], and a failure in one package never stops its siblings
//! or dependencies from being tried.

use std::collections::HashMap;

use crate::core::{Location, PackageId, PackageMetadata, Workspace};
use crate::ops::find_pkg::find_package;
use crate::ops::sub_packages::find_sub_packages;
use crate::sources::{Fetcher, MetadataResolver, ResolveError};
use crate::util::config::DEFAULT_DIR_MODE;
use crate::util::errors::PcpError;
use crate::util::fs::TreeCopier;
use crate::util::shell::{Shell, Status};

/// Options for a copy run.
#[derive(Debug, Clone)]
pub struct CopyOptions {
    /// Also copy packages nested inside copied packages
    pub recursive: bool,

    /// Copy hidden files and directories
    pub include_hidden: bool,

    /// Prefix that marks an entry as hidden
    pub hidden_marker: String,

    /// Mode for created directories
    pub dir_mode: u32,
}

impl Default for CopyOptions {
    fn default() -> Self {
        CopyOptions {
            recursive: true,
            include_hidden: false,
            hidden_marker: ".".to_string(),
            dir_mode: DEFAULT_DIR_MODE,
        }
    }
}

/// Counters for the end-of-run summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    pub copied: usize,
    pub fetched: usize,
    pub standard: usize,
    pub skipped: usize,
}

/// How a visited identifier was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    /// Copied, fetched, or attempted and failed
    Handled,
    /// Part of the standard library; never copied
    Standard,
}

/// State for one run: the collaborators, options, and the visited set.
pub struct CopyContext<'a, R: ?Sized, F: ?Sized> {
    resolver: &'a R,
    fetcher: &'a F,
    workspace: &'a Workspace,
    shell: &'a Shell,
    copier: TreeCopier,
    recursive: bool,
    /// Marker that hides sub-package directories, unless hidden entries are copied
    hidden_marker: Option<String>,
    visited: HashMap<PackageId, Visit>,
    stats: CopyStats,
}

impl<'a, R, F> CopyContext<'a, R, F>
where
    R: MetadataResolver + ?Sized,
    F: Fetcher + ?Sized,
{
    pub fn new(
        resolver: &'a R,
        fetcher: &'a F,
        workspace: &'a Workspace,
        shell: &'a Shell,
        options: CopyOptions,
    ) -> Self {
        let hidden_marker = (!options.include_hidden && !options.hidden_marker.is_empty())
            .then(|| options.hidden_marker.clone());
        let copier = TreeCopier::new()
            .include_hidden(options.include_hidden)
            .hidden_marker(options.hidden_marker)
            .dir_mode(options.dir_mode)
            .skip_dir(workspace.root());

        CopyContext {
            resolver,
            fetcher,
            workspace,
            shell,
            copier,
            recursive: options.recursive,
            hidden_marker,
            visited: HashMap::new(),
            stats: CopyStats::default(),
        }
    }

    pub fn stats(&self) -> CopyStats {
        self.stats
    }

    pub fn is_visited(&self, id: &PackageId) -> bool {
        self.visited.contains_key(id)
    }

    /// Copy the package at `location` into the workspace, optionally under a
    /// different identifier, along with its dependencies and sub-packages.
    ///
    /// `copy_package(id, None)` behaves like `copy_package(id, Some(id))`.
    /// Returns every error from this package's whole subtree, in the order
    /// they happened.
    pub fn copy_package(&mut self, location: &Location, id: Option<&PackageId>) -> Vec<PcpError> {
        // Skip the lookup entirely when the identifier is known up front.
        let known = id.filter(|id| !id.is_empty()).or(match location {
            Location::Identifier(id) => Some(id),
            Location::Directory(_) => None,
        });
        if let Some(known) = known {
            if self.visited.contains_key(known) {
                return self.already_visited(known);
            }
        }

        let lookup = find_package(self.resolver, location, id);
        if self.visited.contains_key(&lookup.id) {
            return self.already_visited(&lookup.id);
        }

        match lookup.result {
            Ok(meta) if meta.is_usable() && meta.is_standard => {
                tracing::trace!("{} is a standard package", meta.id);
                self.visited.insert(meta.id, Visit::Standard);
                self.stats.standard += 1;
                Vec::new()
            }
            Ok(meta) if meta.is_usable() => self.copy_resolved(meta),
            result => self.fetch_unresolved(location, id, lookup.id, result),
        }
    }

    fn already_visited(&mut self, id: &PackageId) -> Vec<PcpError> {
        if self.visited.get(id) != Some(&Visit::Standard) {
            self.stats.skipped += 1;
            self.shell.verbose(Status::Skipped, format!("{} already copied", id));
        }
        Vec::new()
    }

    fn copy_resolved(&mut self, meta: PackageMetadata) -> Vec<PcpError> {
        // Claim the identifier first so import cycles terminate.
        self.visited.insert(meta.id.clone(), Visit::Handled);

        self.shell.verbose(
            Status::Copying,
            format!("{} from \"{}\"", meta.id, meta.dir.display()),
        );
        let dst = self.workspace.package_dir(&meta.id);
        let mut errors = self.copier.copy_tree(&meta.dir, &dst);
        self.stats.copied += 1;
        if !errors.is_empty() {
            tracing::debug!("{} copied with {} error(s)", meta.id, errors.len());
        }

        for import in &meta.imports {
            let location = Location::parse(import.as_str());
            errors.extend(self.copy_package(&location, None));
        }

        if self.recursive {
            let subs = find_sub_packages(
                self.resolver,
                &meta.dir,
                &meta.id,
                self.workspace.root(),
                self.hidden_marker.as_deref(),
            );
            for sub in subs {
                self.shell
                    .verbose(Status::Found, format!("{} has the subpackage {}", meta.id, sub.id));
                errors.extend(self.copy_package(&sub.location, Some(&sub.id)));
            }
        }

        errors
    }

    fn fetch_unresolved(
        &mut self,
        location: &Location,
        id: Option<&PackageId>,
        pkg_id: PackageId,
        result: Result<PackageMetadata, ResolveError>,
    ) -> Vec<PcpError> {
        if let Err(ref e) = result {
            tracing::debug!("couldn't resolve {}: {}", location, e);
        }
        self.visited.insert(pkg_id.clone(), Visit::Handled);

        // A bare directory has no name to fetch by.
        if location.is_directory() && id.map_or(true, PackageId::is_empty) {
            let reason = match result {
                Err(e) => e.to_string(),
                Ok(_) => "no package name".to_string(),
            };
            return vec![PcpError::operation(
                format!("\"{}\" isn't a valid Go package.", location),
                format!("couldn't find package: {}", reason),
            )];
        }

        self.shell.verbose(Status::Fetching, &pkg_id);
        match self.fetcher.fetch(&pkg_id, self.workspace) {
            Ok(()) => {
                self.stats.fetched += 1;
                Vec::new()
            }
            Err(e) => vec![PcpError::operation(
                format!("Error downloading package \"{}\": {}.", pkg_id, e),
                format!("error downloading package: {}", e),
            )],
        }
    }
}
