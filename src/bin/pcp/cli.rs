//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{ArgAction, CommandFactory, Parser};

const LONG_ABOUT: &str = "\
pcp copies a Go package, its dependencies, and its sub-packages into a new \
workspace.

Packages are found in the following order:
  1. The directory given after the package identifier (identifier:directory).
  2. The existing GOPATH.
  3. A remote fetch with `go get`, run with GOPATH set to the new workspace.

Standard library packages are never copied.";

const AFTER_HELP: &str = "\
Exit status:
  0  every package was copied
  1  a fatal error stopped the run
  2  invalid arguments
  3  the run finished, but at least one package failed";

/// pcp - copy a Go package and its dependencies into a new workspace
#[derive(Parser)]
#[command(name = "pcp")]
#[command(author, version, about, long_about = LONG_ABOUT, after_long_help = AFTER_HELP)]
pub struct Cli {
    /// Directory to create the new workspace in
    pub workspace: String,

    /// Packages to copy, as `identifier` or `identifier:directory`
    #[arg(required = true)]
    pub packages: Vec<String>,

    /// Copy sub-packages of every copied package
    #[arg(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value_t = true,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    pub recursive: bool,

    /// Copy hidden files and directories
    #[arg(long)]
    pub hidden: bool,

    /// Print the absolute path of the workspace
    #[arg(long)]
    pub abs: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Configuration file to use instead of the global one
    #[arg(long, env = "PCP_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Usage line printed after usage errors.
pub fn usage() -> String {
    Cli::command().render_usage().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_recursive_defaults_on() {
        let cli = Cli::try_parse_from(["pcp", "ws", "example.com/a"]).unwrap();
        assert!(cli.recursive);
        assert!(!cli.hidden);

        let cli = Cli::try_parse_from(["pcp", "--recursive=false", "ws", "example.com/a"]).unwrap();
        assert!(!cli.recursive);
    }

    #[test]
    fn test_packages_are_required() {
        assert!(Cli::try_parse_from(["pcp", "ws"]).is_err());
    }
}
