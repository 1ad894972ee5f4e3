//! URI to filesystem path resolution
//!
//! The single security boundary of the server: every externally supplied
//! identifier passes through [`resolve`] before any file is touched, and the
//! result is guaranteed to stay inside the docs root.

use crate::config::{DocsConfig, DOC_EXTENSION, URI_SCHEME};
use crate::types::{DocsError, Result};
use path_clean::PathClean;
use std::path::PathBuf;

/// Resolve a `docs://` uri (or a raw root-relative path) to an absolute
/// path under the docs root.
///
/// Fails with `AccessDenied` when the normalized path escapes the root.
/// That covers `..` traversal, absolute-path injection, and any identifier
/// that normalizes to the root itself. Purely lexical; no filesystem access.
pub fn resolve(config: &DocsConfig, uri_or_path: &str) -> Result<PathBuf> {
    let rel = uri_or_path.strip_prefix(URI_SCHEME).unwrap_or(uri_or_path);

    // docs://folder/file -> <root>/folder/file.md
    let candidate = config
        .docs_root()
        .join(format!("{}.{}", rel, DOC_EXTENSION))
        .clean();

    if candidate.starts_with(config.docs_root()) && candidate != config.docs_root() {
        Ok(candidate)
    } else {
        Err(DocsError::AccessDenied(uri_or_path.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> DocsConfig {
        DocsConfig::new(PathBuf::from("/srv/docs"))
    }

    #[test]
    fn test_resolves_nested_uri() {
        let path = resolve(&config(), "docs://intro/guide").unwrap();
        assert_eq!(path, PathBuf::from("/srv/docs/intro/guide.md"));
    }

    #[test]
    fn test_resolves_raw_relative_path() {
        let path = resolve(&config(), "intro/guide").unwrap();
        assert_eq!(path, PathBuf::from("/srv/docs/intro/guide.md"));
    }

    #[test]
    fn test_rejects_parent_traversal() {
        let result = resolve(&config(), "docs://../../etc/passwd");
        assert!(matches!(result, Err(DocsError::AccessDenied(_))));
    }

    #[test]
    fn test_rejects_absolute_path_injection() {
        let result = resolve(&config(), "docs:///etc/passwd");
        assert!(matches!(result, Err(DocsError::AccessDenied(_))));
    }

    #[test]
    fn test_rejects_traversal_hidden_in_segments() {
        let result = resolve(&config(), "docs://intro/../../../secrets");
        assert!(matches!(result, Err(DocsError::AccessDenied(_))));
    }

    #[test]
    fn test_dotdot_staying_inside_root_is_allowed() {
        let path = resolve(&config(), "docs://intro/../guide").unwrap();
        assert_eq!(path, PathBuf::from("/srv/docs/guide.md"));
    }
}
