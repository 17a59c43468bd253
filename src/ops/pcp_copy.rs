//! Copying the user's root packages.

use crate::core::{Location, PackageSpec};
use crate::ops::copy_pkg::CopyContext;
use crate::sources::{Fetcher, MetadataResolver};
use crate::util::diagnostic::Reporter;

/// Copy every root named by `specs` (`identifier[:directory]` strings).
///
/// Specs are handled independently and in order. Errors are handed to the
/// reporter as soon as each root finishes; a bad spec is reported and
/// skipped.
pub fn copy_roots<R, F, S>(ctx: &mut CopyContext<'_, R, F>, specs: &[S], reporter: &mut Reporter<'_>)
where
    R: MetadataResolver + ?Sized,
    F: Fetcher + ?Sized,
    S: AsRef<str>,
{
    for raw in specs {
        let spec = match PackageSpec::parse(raw.as_ref()) {
            Ok(spec) => spec,
            Err(e) => {
                reporter.report_one(&e);
                continue;
            }
        };

        tracing::debug!("copying root {}", spec.id);
        let errors = match spec.dir {
            // Use the sources in dir for the identifier.
            Some(dir) => ctx.copy_package(&Location::Directory(dir), Some(&spec.id)),
            None => ctx.copy_package(&Location::Identifier(spec.id), None),
        };
        reporter.report(errors);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PackageMetadata, Workspace};
    use crate::ops::copy_pkg::CopyOptions;
    use crate::test_support::{package_dir, MockFetcher, MockResolver};
    use crate::util::errors::ErrorKind;
    use crate::util::shell::Shell;
    use tempfile::TempDir;

    #[test]
    fn test_roots_with_and_without_directories() {
        let tmp = TempDir::new().unwrap();
        let ws = Workspace::create(tmp.path().join("ws").to_str().unwrap(), 0o750).unwrap();
        let checkout = package_dir(tmp.path(), "checkout", &["pcp.go"]);

        let resolver = MockResolver::new();
        resolver.add_dir(&checkout, PackageMetadata::new("_/checkout", &checkout, "main"));
        let fetcher = MockFetcher::new();
        let shell = Shell::quiet();
        let mut reporter = Reporter::new(&shell, "usage");
        let mut ctx = CopyContext::new(&resolver, &fetcher, &ws, &shell, CopyOptions::default());

        let specs = [
            format!("github.com/gcurtis/go-pcp:{}", checkout.display()),
            "example.com/remote".to_string(),
        ];
        copy_roots(&mut ctx, &specs, &mut reporter);

        assert_eq!(reporter.exit_code(), 0);
        assert!(ws
            .src_dir()
            .join("github.com/gcurtis/go-pcp/pcp.go")
            .is_file());
        assert_eq!(fetcher.calls().len(), 1);
    }

    #[test]
    fn test_bad_specs_are_reported_and_skipped() {
        let tmp = TempDir::new().unwrap();
        let ws = Workspace::create(tmp.path().join("ws").to_str().unwrap(), 0o750).unwrap();

        let resolver = MockResolver::new();
        let fetcher = MockFetcher::new();
        let shell = Shell::quiet();
        let mut reporter = Reporter::new(&shell, "usage");
        let mut ctx = CopyContext::new(&resolver, &fetcher, &ws, &shell, CopyOptions::default());

        copy_roots(
            &mut ctx,
            &[":nothing", "example.com/a:/this/is/not/a/path", "example.com/b"],
            &mut reporter,
        );

        assert_eq!(reporter.error_count(), 2);
        assert_eq!(reporter.worst(), Some(ErrorKind::Usage));
        assert_eq!(fetcher.calls().len(), 1);
    }

    #[test]
    fn test_failed_fetch_marks_run_as_partial() {
        let tmp = TempDir::new().unwrap();
        let ws = Workspace::create(tmp.path().join("ws").to_str().unwrap(), 0o750).unwrap();

        let resolver = MockResolver::new();
        let fetcher = MockFetcher::new();
        fetcher.fail_on("example.com/broken");
        let shell = Shell::quiet();
        let mut reporter = Reporter::new(&shell, "usage");
        let mut ctx = CopyContext::new(&resolver, &fetcher, &ws, &shell, CopyOptions::default());

        copy_roots(&mut ctx, &["example.com/broken", "example.com/ok"], &mut reporter);

        assert_eq!(reporter.exit_code(), 3);
        assert_eq!(fetcher.calls().len(), 2);
    }
}
