//! Sub-package discovery.
//!
//! A package's directory may hold nested packages that nothing imports.
//! Scanning for them is best effort: directories that aren't packages are
//! skipped quietly.

use std::path::Path;

use walkdir::WalkDir;

use crate::core::{Location, PackageId};
use crate::ops::find_pkg::find_package;
use crate::sources::MetadataResolver;
use crate::util::fs::{is_same_dir, relative_path};

/// A package to copy, with the identifier it should be copied under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyRequest {
    pub location: Location,
    pub id: PackageId,
}

/// Find the packages nested below `base_dir`.
///
/// Each subdirectory is tried as a package named `base_id/<relative path>`.
/// The root itself and `workspace_root` (should it sit inside the tree)
/// are never considered. When `hidden_marker` is set, directories whose
/// names start with it are skipped along with everything below them.
///
/// For example, with `base_dir = /src/my/pkgA` and `base_id = my/pkgA`, a
/// package in `/src/my/pkgA/pkgB` comes back as `my/pkgA/pkgB`.
pub fn find_sub_packages<R>(
    resolver: &R,
    base_dir: &Path,
    base_id: &PackageId,
    workspace_root: &Path,
    hidden_marker: Option<&str>,
) -> Vec<CopyRequest>
where
    R: MetadataResolver + ?Sized,
{
    let mut found = Vec::new();

    let walker = WalkDir::new(base_dir)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            let hidden = hidden_marker
                .is_some_and(|marker| entry.file_name().to_string_lossy().starts_with(marker));
            !hidden && !(entry.file_type().is_dir() && is_same_dir(entry.path(), workspace_root))
        });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!("skipping unreadable entry under {}: {}", base_dir.display(), e);
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }

        let candidate = base_id.join(&relative_path(base_dir, entry.path()));
        let lookup = find_package(resolver, &Location::from(entry.path()), Some(&candidate));

        match lookup.usable() {
            Some(meta) => found.push(CopyRequest {
                location: Location::Directory(meta.dir.clone()),
                id: meta.id.clone(),
            }),
            None => tracing::trace!("{} is not a package", entry.path().display()),
        }
    }

    found
}
