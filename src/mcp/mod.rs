//! MCP server, protocol types and request handlers

pub mod prompts;
pub mod protocol;
pub mod resources;
pub mod server;
pub mod tools;

pub use server::McpServer;
