//! Resource provider: documentation exposed as read-only MCP resources.

use crate::config::{DocsConfig, MARKDOWN_MIME, URI_SCHEME};
use crate::docs::{resolver, scanner};
use crate::mcp::protocol::{ListResourcesResult, ReadResourceResult, Resource, ResourceContents};
use crate::types::{DocsError, Result};

pub fn list_resources(config: &DocsConfig) -> ListResourcesResult {
    let resources = scanner::scan(config)
        .into_iter()
        .map(|doc| Resource {
            uri: doc.uri,
            name: doc.name,
            description: doc.description,
            mime_type: MARKDOWN_MIME.to_string(),
        })
        .collect();

    ListResourcesResult { resources }
}

/// Read one whole document by uri. Foreign schemes and escaping paths are
/// rejected before any I/O; a failed read on a contained path is an
/// internal error carrying the cause.
pub async fn read_resource(config: &DocsConfig, uri: &str) -> Result<ReadResourceResult> {
    if !uri.starts_with(URI_SCHEME) {
        return Err(DocsError::UnknownScheme(uri.to_string()));
    }

    let path = resolver::resolve(config, uri)?;

    let text = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| DocsError::ReadFailed {
            path: path.clone(),
            source,
        })?;

    Ok(ReadResourceResult {
        contents: vec![ResourceContents {
            uri: uri.to_string(),
            mime_type: MARKDOWN_MIME.to_string(),
            text,
        }],
    })
}
