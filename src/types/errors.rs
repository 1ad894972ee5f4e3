use crate::mcp::protocol::{JsonRpcError, INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocsError {
    #[error("Unknown resource scheme: {0}")]
    UnknownScheme(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Unknown prompt: {0}")]
    UnknownPrompt(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl DocsError {
    /// JSON-RPC error code this failure surfaces as.
    pub fn code(&self) -> i64 {
        match self {
            DocsError::UnknownScheme(_)
            | DocsError::AccessDenied(_)
            | DocsError::UnknownPrompt(_)
            | DocsError::UnknownTool(_) => INVALID_REQUEST,
            DocsError::MissingArgument(_) => INVALID_PARAMS,
            DocsError::ReadFailed { .. } => INTERNAL_ERROR,
        }
    }
}

impl From<DocsError> for JsonRpcError {
    fn from(err: DocsError) -> Self {
        JsonRpcError {
            code: err.code(),
            message: err.to_string(),
            data: None,
        }
    }
}

pub type Result<T> = std::result::Result<T, DocsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_request_family_codes() {
        assert_eq!(
            DocsError::AccessDenied("docs://../x".into()).code(),
            INVALID_REQUEST
        );
        assert_eq!(DocsError::UnknownPrompt("nope".into()).code(), INVALID_REQUEST);
        assert_eq!(DocsError::UnknownTool("nope".into()).code(), INVALID_REQUEST);
        assert_eq!(DocsError::MissingArgument("diff".into()).code(), INVALID_PARAMS);
    }

    #[test]
    fn test_read_failure_is_internal() {
        let err = DocsError::ReadFailed {
            path: PathBuf::from("/srv/docs/missing.md"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.code(), INTERNAL_ERROR);
        let rpc: JsonRpcError = err.into();
        assert!(rpc.message.contains("missing.md"));
    }
}
