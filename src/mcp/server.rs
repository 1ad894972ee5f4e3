//! MCP server implementation
//!
//! Implements the Model Context Protocol server that exposes the
//! documentation tree as resources, prompts and tools via stdio.

use crate::config::DocsConfig;
use crate::mcp::protocol::*;
use crate::mcp::{prompts, resources, tools};
use anyhow::Result;
use serde_json::Value;
use std::io::{BufRead, Write};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Every method the dispatcher understands. Adding a method is a
/// compile-time-checked addition here and in [`McpServer::dispatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RequestKind {
    Initialize,
    ResourcesList,
    ResourcesRead,
    PromptsList,
    PromptsGet,
    ToolsList,
    ToolsCall,
}

impl RequestKind {
    fn parse(method: &str) -> Option<Self> {
        match method {
            "initialize" => Some(Self::Initialize),
            "resources/list" => Some(Self::ResourcesList),
            "resources/read" => Some(Self::ResourcesRead),
            "prompts/list" => Some(Self::PromptsList),
            "prompts/get" => Some(Self::PromptsGet),
            "tools/list" => Some(Self::ToolsList),
            "tools/call" => Some(Self::ToolsCall),
            _ => None,
        }
    }
}

pub struct McpServer {
    config: Arc<DocsConfig>,
}

impl McpServer {
    pub fn new(config: Arc<DocsConfig>) -> Self {
        Self { config }
    }

    /// Run the MCP server (blocking). One newline-delimited JSON request in,
    /// exactly one response out, in order, until the client closes stdin.
    pub async fn run(&self) -> Result<()> {
        info!("MCP server starting on stdio");

        let stdin = std::io::stdin();
        let mut stdin = stdin.lock();
        let mut stdout = std::io::stdout();

        loop {
            // Read newline-delimited JSON
            let mut line = String::new();
            match stdin.read_line(&mut line) {
                Ok(0) => {
                    info!("Client closed connection");
                    return Ok(());
                }
                Ok(_) => {
                    let line = line.trim();

                    // Skip empty lines
                    if line.is_empty() {
                        continue;
                    }

                    debug!("Received request: {}", line);

                    // Handle request
                    let response = self.handle_request(line).await;

                    // Write response as newline-delimited JSON
                    let response_json = serde_json::to_string(&response)?;
                    stdout.write_all(response_json.as_bytes())?;
                    stdout.write_all(b"\n")?;
                    stdout.flush()?;

                    debug!("Sent response");
                }
                Err(e) => {
                    error!("Failed to read line: {}", e);
                    return Err(e.into());
                }
            }
        }
    }

    async fn handle_request(&self, content: &str) -> JsonRpcResponse {
        // Parse request
        let request: JsonRpcRequest = match serde_json::from_str(content) {
            Ok(req) => req,
            Err(e) => {
                return JsonRpcResponse {
                    jsonrpc: "2.0".to_string(),
                    id: Value::Null,
                    result: None,
                    error: Some(JsonRpcError {
                        code: PARSE_ERROR,
                        message: format!("Parse error: {}", e),
                        data: None,
                    }),
                };
            }
        };

        let id = request.id.clone().unwrap_or(Value::Null);

        let result = match RequestKind::parse(&request.method) {
            Some(kind) => self.dispatch(kind, request.params).await,
            None => Err(JsonRpcError {
                code: METHOD_NOT_FOUND,
                message: format!("Method not found: {}", request.method),
                data: None,
            }),
        };

        match result {
            Ok(result) => JsonRpcResponse {
                jsonrpc: "2.0".to_string(),
                id,
                result: Some(result),
                error: None,
            },
            Err(error) => JsonRpcResponse {
                jsonrpc: "2.0".to_string(),
                id,
                result: None,
                error: Some(error),
            },
        }
    }

    async fn dispatch(
        &self,
        kind: RequestKind,
        params: Option<Value>,
    ) -> std::result::Result<Value, JsonRpcError> {
        match kind {
            RequestKind::Initialize => self.handle_initialize(),
            RequestKind::ResourcesList => to_value(resources::list_resources(&self.config)),
            RequestKind::ResourcesRead => {
                let params: ReadResourceParams = parse_params(params)?;
                let result = resources::read_resource(&self.config, &params.uri).await?;
                to_value(result)
            }
            RequestKind::PromptsList => to_value(prompts::list_prompts()),
            RequestKind::PromptsGet => {
                let params: GetPromptParams = parse_params(params)?;
                let result =
                    prompts::get_prompt(&self.config, &params.name, params.arguments.as_ref())
                        .await?;
                to_value(result)
            }
            RequestKind::ToolsList => to_value(ListToolsResult {
                tools: tools::get_tool_definitions(),
            }),
            RequestKind::ToolsCall => {
                let params: CallToolParams = parse_params(params)?;
                let result =
                    tools::call_tool(&self.config, &params.name, params.arguments).await?;
                to_value(result)
            }
        }
    }

    fn handle_initialize(&self) -> std::result::Result<Value, JsonRpcError> {
        let result = InitializeResult {
            protocol_version: "2024-11-05".to_string(),
            capabilities: ServerCapabilities {
                resources: Some(serde_json::json!({})),
                prompts: Some(serde_json::json!({})),
                tools: Some(serde_json::json!({})),
            },
            server_info: ServerInfo {
                name: "docmcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        to_value(result)
    }
}

fn parse_params<T: serde::de::DeserializeOwned>(
    params: Option<Value>,
) -> std::result::Result<T, JsonRpcError> {
    serde_json::from_value(params.unwrap_or(Value::Null)).map_err(|e| JsonRpcError {
        code: INVALID_PARAMS,
        message: format!("Invalid params: {}", e),
        data: None,
    })
}

fn to_value<T: serde::Serialize>(value: T) -> std::result::Result<Value, JsonRpcError> {
    serde_json::to_value(value).map_err(|e| JsonRpcError {
        code: INTERNAL_ERROR,
        message: format!("Failed to serialize result: {}", e),
        data: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn temp_server() -> (TempDir, McpServer) {
        let dir = TempDir::new().unwrap();
        let config = DocsConfig::new(dir.path().canonicalize().unwrap());
        let server = McpServer::new(Arc::new(config));
        (dir, server)
    }

    fn write_doc(server: &McpServer, rel: &str, content: &str) {
        let path = server.config.docs_root().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[tokio::test]
    async fn test_initialize_advertises_all_capabilities() {
        let (_dir, server) = temp_server();
        let response = server
            .handle_request(r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#)
            .await;

        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert!(result["capabilities"]["resources"].is_object());
        assert!(result["capabilities"]["prompts"].is_object());
        assert!(result["capabilities"]["tools"].is_object());
        assert_eq!(result["serverInfo"]["name"], "docmcp");
    }

    #[tokio::test]
    async fn test_malformed_json_is_a_parse_error() {
        let (_dir, server) = temp_server();
        let response = server.handle_request("{not json").await;
        assert_eq!(response.error.unwrap().code, PARSE_ERROR);
    }

    #[tokio::test]
    async fn test_unknown_method_is_method_not_found() {
        let (_dir, server) = temp_server();
        let response = server
            .handle_request(r#"{"jsonrpc":"2.0","id":7,"method":"bogus/method"}"#)
            .await;

        assert_eq!(response.id, Value::from(7));
        assert_eq!(response.error.unwrap().code, METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_resources_roundtrip_through_dispatcher() {
        let (_dir, server) = temp_server();
        write_doc(&server, "intro/guide.md", "# Guide\nbody");

        let list = server
            .handle_request(r#"{"jsonrpc":"2.0","id":1,"method":"resources/list"}"#)
            .await;
        let resources = &list.result.unwrap()["resources"];
        assert_eq!(resources[0]["uri"], "docs://intro/guide");

        let read = server
            .handle_request(
                r#"{"jsonrpc":"2.0","id":2,"method":"resources/read","params":{"uri":"docs://intro/guide"}}"#,
            )
            .await;
        let contents = &read.result.unwrap()["contents"];
        assert_eq!(contents[0]["mimeType"], "text/markdown");
        assert!(contents[0]["text"].as_str().unwrap().contains("body"));
    }

    #[tokio::test]
    async fn test_traversal_uri_is_rejected_at_protocol_level() {
        let (_dir, server) = temp_server();
        let response = server
            .handle_request(
                r#"{"jsonrpc":"2.0","id":3,"method":"resources/read","params":{"uri":"docs://../../etc/passwd"}}"#,
            )
            .await;

        let error = response.error.unwrap();
        assert_eq!(error.code, INVALID_REQUEST);
        assert!(error.message.contains("Access denied"));
    }

    #[tokio::test]
    async fn test_missing_params_are_invalid_params() {
        let (_dir, server) = temp_server();
        let response = server
            .handle_request(r#"{"jsonrpc":"2.0","id":4,"method":"resources/read"}"#)
            .await;
        assert_eq!(response.error.unwrap().code, INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_tools_call_routes_to_search() {
        let (_dir, server) = temp_server();
        write_doc(&server, "guide.md", "the payment flow requires a token");

        let response = server
            .handle_request(
                r#"{"jsonrpc":"2.0","id":5,"method":"tools/call","params":{"name":"search_docs","arguments":{"query":"PAYMENT"}}}"#,
            )
            .await;

        let result = response.result.unwrap();
        let text = result["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("docs://guide"));
        assert!(text.contains("payment flow"));
    }

    #[tokio::test]
    async fn test_unknown_tool_name_is_a_protocol_error() {
        let (_dir, server) = temp_server();
        let response = server
            .handle_request(
                r#"{"jsonrpc":"2.0","id":8,"method":"tools/call","params":{"name":"bogus_tool","arguments":{}}}"#,
            )
            .await;

        assert!(response.result.is_none());
        let error = response.error.unwrap();
        assert_eq!(error.code, INVALID_REQUEST);
        assert!(error.message.contains("bogus_tool"));
    }

    #[tokio::test]
    async fn test_prompts_list_via_dispatcher() {
        let (_dir, server) = temp_server();
        let response = server
            .handle_request(r#"{"jsonrpc":"2.0","id":6,"method":"prompts/list"}"#)
            .await;

        let prompts = &response.result.unwrap()["prompts"];
        assert_eq!(prompts.as_array().unwrap().len(), 2);
        assert_eq!(prompts[0]["name"], "generate-commit");
    }
}
