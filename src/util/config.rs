//! Configuration file support.
//!
//! Configuration is looked up in this order:
//! 1. An explicit path (`--config` or `PCP_CONFIG`)
//! 2. The platform config directory (`config.toml`)
//! 3. Built-in defaults
//!
//! The defaults drive the Go toolchain in GOPATH mode.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Default directory permissions for created directories (rwxr-x---).
pub const DEFAULT_DIR_MODE: u32 = 0o750;

/// pcp configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Package metadata lookup
    pub resolve: ResolveConfig,

    /// Remote retrieval of unresolvable packages
    pub fetch: FetchConfig,

    /// Tree copy settings
    pub copy: CopyConfig,
}

/// Settings for the metadata resolver (`go list`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveConfig {
    /// Toolchain program
    pub program: String,

    /// Extra environment for every lookup
    pub env: BTreeMap<String, String>,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        ResolveConfig {
            program: "go".to_string(),
            env: gopath_mode_env(),
        }
    }
}

/// Settings for the fetcher (`go get`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Toolchain program
    pub program: String,

    /// Arguments placed before the package identifier
    pub args: Vec<String>,

    /// Extra environment for every fetch
    pub env: BTreeMap<String, String>,

    /// Variable that points the toolchain at the new workspace
    pub search_path_var: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig {
            program: "go".to_string(),
            args: vec!["get".to_string(), "-d".to_string(), "-t".to_string()],
            env: gopath_mode_env(),
            search_path_var: "GOPATH".to_string(),
        }
    }
}

/// Settings for copying source trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CopyConfig {
    /// Entries whose names start with this are hidden
    pub hidden_marker: String,

    /// Mode for directories created in the workspace
    pub dir_mode: u32,
}

impl Default for CopyConfig {
    fn default() -> Self {
        CopyConfig {
            hidden_marker: ".".to_string(),
            dir_mode: DEFAULT_DIR_MODE,
        }
    }
}

fn gopath_mode_env() -> BTreeMap<String, String> {
    let mut env = BTreeMap::new();
    env.insert("GO111MODULE".to_string(), "off".to_string());
    env
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file doesn't exist
    /// or can't be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Resolve the configuration for a run.
    ///
    /// An explicit path must load; the global file is optional.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => Ok(global_config_path()
                .map(|path| Self::load_or_default(&path))
                .unwrap_or_default()),
        }
    }
}

/// Path of the global config file, if the platform has a config directory.
pub fn global_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "pcp", "pcp").map(|dirs| dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_drive_go_in_gopath_mode() {
        let config = Config::default();
        assert_eq!(config.resolve.program, "go");
        assert_eq!(config.fetch.args, ["get", "-d", "-t"]);
        assert_eq!(config.fetch.search_path_var, "GOPATH");
        assert_eq!(
            config.fetch.env.get("GO111MODULE").map(String::as_str),
            Some("off")
        );
        assert_eq!(config.copy.hidden_marker, ".");
        assert_eq!(config.copy.dir_mode, 0o750);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[fetch]
program = "/usr/local/go/bin/go"

[copy]
hidden_marker = "_"
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.fetch.program, "/usr/local/go/bin/go");
        assert_eq!(config.fetch.args, ["get", "-d", "-t"]);
        assert_eq!(config.copy.hidden_marker, "_");
        assert_eq!(config.resolve, ResolveConfig::default());
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("missing.toml");
        assert!(Config::discover(Some(&missing)).is_err());
    }

    #[test]
    fn test_load_or_default_on_bad_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "this is = = not toml").unwrap();

        assert_eq!(Config::load_or_default(&path), Config::default());
        assert!(Config::load(&path).is_err());
    }
}
