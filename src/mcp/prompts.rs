//! Prompt provider: pre-authored workflows rendered on demand.
//!
//! The catalog is fixed at compile time; prompts are not discovered. Each
//! prompt embeds a document loaded from a well-known path under the docs
//! root, so teams can evolve the standards without rebuilding the server.

use crate::config::DocsConfig;
use crate::mcp::protocol::{
    GetPromptResult, ListPromptsResult, MessageContent, Prompt, PromptArgument, PromptMessage,
};
use crate::types::{DocsError, Result};
use serde_json::{Map, Value};
use std::path::PathBuf;

pub const GENERATE_COMMIT: &str = "generate-commit";
pub const SCAFFOLD_FEATURE: &str = "scaffold-feature";

pub fn list_prompts() -> ListPromptsResult {
    ListPromptsResult {
        prompts: vec![
            Prompt {
                name: GENERATE_COMMIT.to_string(),
                description: "Generate a standard-compliant commit message for staged changes"
                    .to_string(),
                arguments: vec![PromptArgument {
                    name: "diff".to_string(),
                    description: "The git diff of staged changes".to_string(),
                    required: true,
                }],
            },
            Prompt {
                name: SCAFFOLD_FEATURE.to_string(),
                description: "Create a plan for a new feature following the standard template"
                    .to_string(),
                arguments: vec![PromptArgument {
                    name: "description".to_string(),
                    description: "Description of the feature to build".to_string(),
                    required: true,
                }],
            },
        ],
    }
}

/// Render a prompt by name. Caller content is embedded verbatim; it is
/// trusted input from the connected client, not escaped.
pub async fn get_prompt(
    config: &DocsConfig,
    name: &str,
    arguments: Option<&Map<String, Value>>,
) -> Result<GetPromptResult> {
    match name {
        GENERATE_COMMIT => {
            let diff = required_arg(arguments, "diff")?;
            let rules = load_document(config.commit_rules_path()).await?;

            Ok(user_message(format!(
                "Please generate a commit message for the following changes.\n\
                 You MUST follow the commit standards defined below:\n\n\
                 {}\n\n\
                 ---\n\
                 CHANGES:\n\
                 {}\n",
                rules, diff
            )))
        }
        SCAFFOLD_FEATURE => {
            let description = required_arg(arguments, "description")?;
            let template = load_document(config.feature_template_path()).await?;

            Ok(user_message(format!(
                "I need to design a new feature: \"{}\".\n\
                 Please create a design document following the strict template below.\n\
                 Do not skip any sections.\n\n\
                 TEMPLATE:\n\
                 {}\n",
                description, template
            )))
        }
        _ => Err(DocsError::UnknownPrompt(name.to_string())),
    }
}

/// Declared-required arguments are enforced before any template I/O.
fn required_arg<'a>(arguments: Option<&'a Map<String, Value>>, key: &str) -> Result<&'a str> {
    arguments
        .and_then(|args| args.get(key))
        .and_then(Value::as_str)
        .ok_or_else(|| DocsError::MissingArgument(key.to_string()))
}

async fn load_document(path: PathBuf) -> Result<String> {
    tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| DocsError::ReadFailed { path, source })
}

fn user_message(text: String) -> GetPromptResult {
    GetPromptResult {
        messages: vec![PromptMessage {
            role: "user".to_string(),
            content: MessageContent::Text { text },
        }],
    }
}
