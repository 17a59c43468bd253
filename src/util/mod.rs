//! Shared utilities

pub mod config;
pub mod diagnostic;
pub mod errors;
pub mod fs;
pub mod process;
pub mod shell;

pub use config::Config;
pub use diagnostic::Reporter;
pub use errors::{ErrorKind, PcpError, PcpResult};
pub use fs::TreeCopier;
pub use shell::Shell;
