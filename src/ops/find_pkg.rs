//! Package lookup with identifier overrides.

use crate::core::{Location, PackageId, PackageMetadata};
use crate::sources::{MetadataResolver, ResolveError};

/// The outcome of looking a location up.
///
/// `id` is always set, even when resolution failed, so the caller can
/// record the package as visited or fetch it by name.
#[derive(Debug, Clone)]
pub struct Lookup {
    pub id: PackageId,
    pub result: Result<PackageMetadata, ResolveError>,
}

impl Lookup {
    /// The metadata, if it names a usable package.
    pub fn usable(&self) -> Option<&PackageMetadata> {
        self.result.as_ref().ok().filter(|meta| meta.is_usable())
    }
}

/// Look up the package at `location`, giving it `id_override` as its
/// identifier when one is supplied.
///
/// Relative directories are made absolute first. Without an override the
/// identifier is whatever the resolver reports, falling back to the
/// location itself when resolution fails.
pub fn find_package<R>(resolver: &R, location: &Location, id_override: Option<&PackageId>) -> Lookup
where
    R: MetadataResolver + ?Sized,
{
    let id_override = id_override.filter(|id| !id.is_empty());

    let result = match location.to_absolute() {
        Ok(abs) => resolver.resolve(&abs),
        Err(_) => Err(ResolveError::NotADirectory {
            dir: location.to_string().into(),
        }),
    };

    match result {
        Ok(mut meta) => {
            if let Some(id) = id_override {
                meta.id = id.clone();
            } else if meta.id.is_empty() {
                meta.id = location.fallback_id();
            }
            Lookup {
                id: meta.id.clone(),
                result: Ok(meta),
            }
        }
        Err(e) => Lookup {
            id: id_override
                .cloned()
                .unwrap_or_else(|| location.fallback_id()),
            result: Err(e),
        },
    }
}
