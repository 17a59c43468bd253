//! Error reporting and exit status.
//!
//! Errors are printed the moment they are handed to the [`Reporter`], not
//! batched until the end of the run. The reporter remembers the worst
//! severity it has seen so the binary can pick its exit code.

use crate::util::errors::{ErrorKind, PcpError};
use crate::util::shell::Shell;

/// Prints errors as they arrive and tracks the worst one.
pub struct Reporter<'a> {
    shell: &'a Shell,
    /// Usage text printed after usage errors
    usage: String,
    worst: Option<ErrorKind>,
    reported: usize,
}

impl<'a> Reporter<'a> {
    pub fn new(shell: &'a Shell, usage: impl Into<String>) -> Self {
        Reporter {
            shell,
            usage: usage.into(),
            worst: None,
            reported: 0,
        }
    }

    /// Report a batch of errors. Returns true if there was at least one.
    pub fn report<I>(&mut self, errors: I) -> bool
    where
        I: IntoIterator<Item = PcpError>,
    {
        let before = self.reported;
        for err in errors {
            self.report_one(&err);
        }
        self.reported > before
    }

    /// Report a single error.
    pub fn report_one(&mut self, err: &PcpError) {
        tracing::debug!(kind = %err.kind(), "{}", err.diagnostic());
        self.shell.error(err.message());
        if err.kind() == ErrorKind::Usage {
            self.shell.print_block(&self.usage);
        }

        self.reported += 1;
        self.worst = Some(match self.worst {
            Some(worst) => worst.max(err.kind()),
            None => err.kind(),
        });
    }

    /// Report an error that stops the program and return the exit code to use.
    pub fn fatal(&mut self, err: &PcpError) -> i32 {
        self.report_one(err);
        err.kind().exit_code(true)
    }

    /// Number of errors reported so far.
    pub fn error_count(&self) -> usize {
        self.reported
    }

    /// Worst severity reported so far.
    pub fn worst(&self) -> Option<ErrorKind> {
        self.worst
    }

    /// Exit code for a run that reached the end: 0 when clean, otherwise the
    /// non-fatal code of the worst error.
    pub fn exit_code(&self) -> i32 {
        self.worst.map_or(0, |kind| kind.exit_code(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_run_exits_zero() {
        let shell = Shell::quiet();
        let mut reporter = Reporter::new(&shell, "usage");
        assert!(!reporter.report(Vec::new()));
        assert_eq!(reporter.exit_code(), 0);
        assert_eq!(reporter.worst(), None);
    }

    #[test]
    fn test_operation_errors_exit_three() {
        let shell = Shell::quiet();
        let mut reporter = Reporter::new(&shell, "usage");
        assert!(reporter.report(vec![
            PcpError::operation("a", "a"),
            PcpError::internal("b", "b"),
        ]));
        assert_eq!(reporter.error_count(), 2);
        assert_eq!(reporter.exit_code(), 3);
    }

    #[test]
    fn test_usage_error_dominates() {
        let shell = Shell::quiet();
        let mut reporter = Reporter::new(&shell, "usage");
        reporter.report(vec![PcpError::operation("a", "a")]);
        reporter.report(vec![PcpError::usage("bad", "bad")]);
        reporter.report(vec![PcpError::operation("c", "c")]);
        assert_eq!(reporter.worst(), Some(ErrorKind::Usage));
        assert_eq!(reporter.exit_code(), 2);
    }

    #[test]
    fn test_fatal_codes() {
        let shell = Shell::quiet();
        let mut reporter = Reporter::new(&shell, "usage");
        assert_eq!(reporter.fatal(&PcpError::internal("x", "x")), 1);
        assert_eq!(reporter.fatal(&PcpError::usage("x", "x")), 2);
    }
}
