//! Server configuration
//!
//! A single immutable record resolved once at startup. The docs root is the
//! only state the providers share; everything below it is re-read per
//! request.

use path_clean::PathClean;
use std::path::{Path, PathBuf};

/// Canonical extension for served documents.
pub const DOC_EXTENSION: &str = "md";

/// URI scheme prefix for document resources.
pub const URI_SCHEME: &str = "docs://";

/// Mime type reported for every resource.
pub const MARKDOWN_MIME: &str = "text/markdown";

/// Dependency directory never descended into while scanning.
pub const SKIPPED_DIR: &str = "node_modules";

/// Root-relative path of the rules document backing `generate-commit`.
pub const COMMIT_RULES_PATH: &str = "process/workflow/DEVELOPMENT-RULES.md";

/// Root-relative path of the template backing `scaffold-feature`.
pub const FEATURE_TEMPLATE_PATH: &str = "templates/01-FEATURE-DESIGN-TEMPLATE.md";

#[derive(Debug, Clone)]
pub struct DocsConfig {
    docs_root: PathBuf,
}

impl DocsConfig {
    /// Build a config around an absolute docs root. The root is lexically
    /// normalized up front so containment checks compare like with like.
    pub fn new(docs_root: PathBuf) -> Self {
        Self {
            docs_root: docs_root.clean(),
        }
    }

    pub fn docs_root(&self) -> &Path {
        &self.docs_root
    }

    pub fn commit_rules_path(&self) -> PathBuf {
        self.docs_root.join(COMMIT_RULES_PATH)
    }

    pub fn feature_template_path(&self) -> PathBuf {
        self.docs_root.join(FEATURE_TEMPLATE_PATH)
    }
}
