//! MCP tools implementation
//!
//! Defines and implements the callable tools exposed by the server.
//! Currently a single tool: case-insensitive substring search across the
//! documentation tree.

use crate::config::DocsConfig;
use crate::docs::scanner;
use crate::mcp::protocol::{CallToolResult, Tool, ToolContent};
use crate::types::{DocsError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

pub const SEARCH_DOCS: &str = "search_docs";

const SNIPPET_BEFORE: usize = 50;
const SNIPPET_AFTER: usize = 150;

/// A document matching a search query, with a windowed snippet around the
/// first occurrence. Built per call, never cached.
#[derive(Debug, Serialize)]
pub struct SearchMatch {
    pub uri: String,
    pub name: String,
    pub snippet: String,
}

/// Get all tool definitions
pub fn get_tool_definitions() -> Vec<Tool> {
    vec![Tool {
        name: SEARCH_DOCS.to_string(),
        description: "Search documentation for a specific query".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query"
                }
            },
            "required": ["query"]
        }),
    }]
}

/// Call a tool by name. An unknown name is a protocol-level failure, not a
/// tool result; per-call argument and serialization problems stay inside the
/// result with `isError` set.
pub async fn call_tool(
    config: &DocsConfig,
    name: &str,
    arguments: Option<Value>,
) -> Result<CallToolResult> {
    match name {
        SEARCH_DOCS => Ok(handle_search(config, arguments.unwrap_or(Value::Null)).await),
        _ => Err(DocsError::UnknownTool(name.to_string())),
    }
}

#[derive(Debug, Deserialize)]
struct SearchArgs {
    query: String,
}

async fn handle_search(config: &DocsConfig, args: Value) -> CallToolResult {
    let args: SearchArgs = match serde_json::from_value(args) {
        Ok(a) => a,
        Err(e) => return error_result(format!("Invalid arguments: {}", e)),
    };

    let matches = search_docs(config, &args.query).await;

    match serde_json::to_string_pretty(&matches) {
        Ok(text) => CallToolResult {
            content: vec![ToolContent::Text { text }],
            is_error: None,
        },
        Err(e) => error_result(format!("Error: {}", e)),
    }
}

/// Case-insensitive substring scan over every document; first occurrence
/// per document only. Unreadable documents are skipped, not reported.
pub async fn search_docs(config: &DocsConfig, query: &str) -> Vec<SearchMatch> {
    let query = query.to_lowercase();
    let mut matches = Vec::new();

    for doc in scanner::scan(config) {
        let content = match tokio::fs::read_to_string(&doc.file_path).await {
            Ok(content) => content,
            Err(e) => {
                debug!(
                    "Skipping unreadable document {}: {}",
                    doc.file_path.display(),
                    e
                );
                continue;
            }
        };

        if let Some(index) = content.to_lowercase().find(&query) {
            matches.push(SearchMatch {
                uri: doc.uri,
                name: doc.name,
                snippet: snippet_around(&content, index),
            });
        }
    }

    matches
}

/// Window of up to [`SNIPPET_BEFORE`] bytes before and [`SNIPPET_AFTER`]
/// after the match, clamped to the document and to char boundaries, with
/// newlines flattened to spaces and ellipsis markers on both ends.
fn snippet_around(content: &str, index: usize) -> String {
    let index = index.min(content.len());
    let start = floor_char_boundary(content, index.saturating_sub(SNIPPET_BEFORE));
    let end = floor_char_boundary(content, (index + SNIPPET_AFTER).min(content.len()));
    let window = content[start..end].replace('\n', " ");
    format!("...{}...", window)
}

fn floor_char_boundary(s: &str, mut i: usize) -> usize {
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn error_result(text: String) -> CallToolResult {
    CallToolResult {
        content: vec![ToolContent::Text { text }],
        is_error: Some(true),
    }
}
