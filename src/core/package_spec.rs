//! Package specs given on the command line: `identifier[:directory]`.

use std::path::PathBuf;

use crate::core::PackageId;
use crate::util::errors::{PcpError, PcpResult};

/// A root package requested by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSpec {
    pub id: PackageId,

    /// Absolute directory holding the sources, if one was given
    pub dir: Option<PathBuf>,
}

impl PackageSpec {
    /// Parse `identifier[:directory]`.
    ///
    /// The identifier is everything before the first colon. A given
    /// directory must exist and is made absolute.
    pub fn parse(s: &str) -> PcpResult<Self> {
        let (id, dir) = match s.split_once(':') {
            Some((id, dir)) => (id, dir),
            None => (s, ""),
        };

        if id.is_empty() {
            return Err(PcpError::usage(
                format!("\"{}\" isn't a valid import path.", s),
                "invalid import path",
            ));
        }

        if dir.is_empty() {
            return Ok(PackageSpec {
                id: PackageId::new(id),
                dir: None,
            });
        }

        std::fs::metadata(dir).map_err(|e| {
            PcpError::operation(format!("\"{}\" isn't a valid directory.", dir), e.to_string())
        })?;

        let abs = std::path::absolute(dir).map_err(|e| {
            PcpError::operation(
                format!("Couldn't determine an absolute path for \"{}\".", dir),
                e.to_string(),
            )
        })?;

        Ok(PackageSpec {
            id: PackageId::new(id),
            dir: Some(abs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::errors::ErrorKind;
    use tempfile::TempDir;

    #[test]
    fn test_identifier_only() {
        let spec = PackageSpec::parse("github.com/gcurtis/go-pcp").unwrap();
        assert_eq!(spec.id.as_str(), "github.com/gcurtis/go-pcp");
        assert_eq!(spec.dir, None);
    }

    #[test]
    fn test_trailing_colon_means_no_directory() {
        let spec = PackageSpec::parse("example.com/a:").unwrap();
        assert_eq!(spec.dir, None);
    }

    #[test]
    fn test_identifier_with_directory() {
        let tmp = TempDir::new().unwrap();
        let arg = format!("example.com/a:{}", tmp.path().display());

        let spec = PackageSpec::parse(&arg).unwrap();

        assert_eq!(spec.id.as_str(), "example.com/a");
        let dir = spec.dir.unwrap();
        assert!(dir.is_absolute());
        assert_eq!(dir.canonicalize().unwrap(), tmp.path().canonicalize().unwrap());
    }

    #[test]
    fn test_empty_identifier_is_usage_error() {
        for arg in ["", ":/tmp"] {
            let err = PackageSpec::parse(arg).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Usage, "{:?}", arg);
        }
    }

    #[test]
    fn test_missing_directory_is_operation_error() {
        let err = PackageSpec::parse("example.com/a:/this/is/not/a/path").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Operation);
        assert_eq!(err.message(), "\"/this/is/not/a/path\" isn't a valid directory.");
    }
}
