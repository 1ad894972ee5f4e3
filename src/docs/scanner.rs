//! Recursive document discovery
//!
//! Re-walks the docs tree on every call. The corpus is small and scans are
//! infrequent, so there is no caching layer; two consecutive scans of an
//! unchanged tree yield the same uri set.

use crate::config::{DocsConfig, DOC_EXTENSION, SKIPPED_DIR, URI_SCHEME};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A single markdown document discovered under the docs root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocResource {
    pub uri: String,
    pub name: String,
    pub description: String,
    pub file_path: PathBuf,
}

/// Enumerate every eligible document under the root, depth first.
///
/// A missing or unreadable root yields an empty list: "no resources" is a
/// valid outcome, not an error. Entries that fail mid-walk are dropped and
/// the walk continues. Output order is traversal order; callers must not
/// rely on it beyond display.
pub fn scan(config: &DocsConfig) -> Vec<DocResource> {
    let root = config.docs_root();
    let mut results = Vec::new();
    walk(root, root, &mut results);
    results
}

fn walk(dir: &Path, root: &Path, results: &mut Vec<DocResource>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("Skipping unreadable directory {}: {}", dir.display(), e);
            return;
        }
    };

    for entry in entries.filter_map(|e| e.ok()) {
        let path = entry.path();
        let file_type = match entry.file_type() {
            Ok(ft) => ft,
            Err(_) => continue,
        };
        let file_name = entry.file_name();
        let name = file_name.to_string_lossy();

        if file_type.is_dir() {
            // Hidden directories and dependency trees are never descended into
            if !name.starts_with('.') && name != SKIPPED_DIR {
                walk(&path, root, results);
            }
        } else if file_type.is_file() && has_doc_extension(&path) {
            if let Some(resource) = describe(&path, root) {
                results.push(resource);
            }
        }
    }
}

fn has_doc_extension(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(DOC_EXTENSION)
}

fn describe(path: &Path, root: &Path) -> Option<DocResource> {
    let rel = path.strip_prefix(root).ok()?;
    let rel_str = rel.to_string_lossy().replace('\\', "/");
    let uri_path = rel.with_extension("").to_string_lossy().replace('\\', "/");
    let stem = path.file_stem()?.to_string_lossy();

    Some(DocResource {
        uri: format!("{}{}", URI_SCHEME, uri_path),
        name: stem.replace('-', " "),
        description: format!("Documentation for {}", rel_str),
        file_path: path.to_path_buf(),
    })
}
