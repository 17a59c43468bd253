//! Go toolchain sources - `go list` for metadata, `go get` for fetching.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::core::{Location, PackageId, PackageMetadata, Workspace};
use crate::sources::{FetchError, Fetcher, MetadataResolver, ResolveError};
use crate::util::config::{FetchConfig, ResolveConfig};
use crate::util::process::{find_executable, ProcessBuilder};

/// The cgo pseudo-package. It shows up in import lists but is never a
/// real package.
const CGO_PSEUDO_PACKAGE: &str = "C";

/// Resolves package metadata with `go list -e -json`.
#[derive(Debug, Clone)]
pub struct GoListResolver {
    program: String,
    env: BTreeMap<String, String>,
}

impl GoListResolver {
    pub fn new(config: &ResolveConfig) -> Self {
        GoListResolver {
            program: config.program.clone(),
            env: config.env.clone(),
        }
    }

    /// Whether the configured program can be found.
    pub fn is_available(&self) -> bool {
        Path::new(&self.program).is_file() || find_executable(&self.program).is_some()
    }

    /// Build the `go list` invocation for a location.
    pub fn list_command(&self, location: &Location) -> ProcessBuilder {
        let pb = ProcessBuilder::new(&self.program)
            .args(["list", "-e", "-json"])
            .envs(&self.env);

        match location {
            Location::Directory(dir) => pb.arg(".").cwd(dir),
            Location::Identifier(id) => pb.arg(id.as_str()),
        }
    }
}

impl MetadataResolver for GoListResolver {
    fn resolve(&self, location: &Location) -> Result<PackageMetadata, ResolveError> {
        if let Location::Directory(dir) = location {
            if !dir.is_dir() {
                return Err(ResolveError::NotADirectory { dir: dir.clone() });
            }
            // Skip the process spawn for plain directories.
            if !has_go_files(dir) {
                return Err(ResolveError::NoSources { dir: dir.clone() });
            }
        }

        let pb = self.list_command(location);
        let output = pb.exec().map_err(|e| ResolveError::Command {
            command: pb.display_command(),
            reason: format!("{:#}", e),
        })?;

        if !output.status.success() {
            return Err(ResolveError::Command {
                command: pb.display_command(),
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let package = parse_list_output(&output.stdout).map_err(|reason| ResolveError::Parse {
            location: location.to_string(),
            reason,
        })?;

        package.into_metadata(location)
    }
}

/// The subset of `go list -json` output we use.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct GoListPackage {
    dir: String,
    import_path: String,
    name: String,
    goroot: bool,
    standard: bool,
    imports: Vec<String>,
    error: Option<GoListError>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct GoListError {
    err: String,
}

impl GoListPackage {
    fn into_metadata(self, location: &Location) -> Result<PackageMetadata, ResolveError> {
        if let Some(error) = self.error {
            return Err(ResolveError::Package {
                location: location.to_string(),
                message: error.err,
            });
        }

        let dir = match (self.dir.is_empty(), location) {
            (false, _) => PathBuf::from(self.dir),
            (true, Location::Directory(dir)) => dir.clone(),
            (true, Location::Identifier(_)) => {
                return Err(ResolveError::Package {
                    location: location.to_string(),
                    message: "no source directory".to_string(),
                })
            }
        };

        let imports = self
            .imports
            .into_iter()
            .filter(|import| import != CGO_PSEUDO_PACKAGE)
            .map(PackageId::new)
            .collect();

        Ok(PackageMetadata {
            id: PackageId::new(self.import_path),
            dir,
            name: self.name,
            is_standard: self.goroot || self.standard,
            imports,
        })
    }
}

fn parse_list_output(stdout: &[u8]) -> Result<GoListPackage, String> {
    serde_json::Deserializer::from_slice(stdout)
        .into_iter::<GoListPackage>()
        .next()
        .ok_or_else(|| "empty output".to_string())?
        .map_err(|e| e.to_string())
}

fn has_go_files(dir: &Path) -> bool {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return false;
    };

    entries.filter_map(Result::ok).any(|entry| {
        entry.file_type().map(|t| t.is_file()).unwrap_or(false)
            && entry.file_name().to_string_lossy().ends_with(".go")
    })
}

/// Fetches packages with `go get`, pointing GOPATH at the workspace.
#[derive(Debug, Clone)]
pub struct GoGetFetcher {
    program: String,
    args: Vec<String>,
    env: BTreeMap<String, String>,
    search_path_var: String,
}

impl GoGetFetcher {
    pub fn new(config: &FetchConfig) -> Self {
        GoGetFetcher {
            program: config.program.clone(),
            args: config.args.clone(),
            env: config.env.clone(),
            search_path_var: config.search_path_var.clone(),
        }
    }

    /// Build the fetch invocation. The workspace overrides any search path
    /// the caller has set.
    pub fn fetch_command(&self, id: &PackageId, workspace: &Workspace) -> ProcessBuilder {
        ProcessBuilder::new(&self.program)
            .args(&self.args)
            .arg(id.as_str())
            .envs(&self.env)
            .env(&self.search_path_var, workspace.root().to_string_lossy())
    }
}

impl Fetcher for GoGetFetcher {
    fn fetch(&self, id: &PackageId, workspace: &Workspace) -> Result<(), FetchError> {
        let pb = self.fetch_command(id, workspace);
        tracing::debug!("running `{}`", pb.display_command());

        let status = pb.status().map_err(|e| FetchError::Spawn {
            command: pb.display_command(),
            reason: format!("{:#}", e),
        })?;

        if !status.success() {
            return Err(FetchError::Status {
                command: pb.display_command(),
                status: status.to_string(),
            });
        }

        Ok(())
    }
}
