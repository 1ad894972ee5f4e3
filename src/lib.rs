//! DOCMCP - Documentation server for the Model Context Protocol
//!
//! This crate exposes a markdown documentation tree to MCP clients (like
//! Claude Code) as read-only resources, pre-authored prompts and a search
//! tool, served over stdio.

pub mod config;
pub mod docs;
pub mod mcp;
pub mod types;

pub use config::DocsConfig;
pub use mcp::McpServer;
pub use types::DocsError;
