use crate::chat::{DEFAULT_API_BASE, DEFAULT_MODEL};
use clap::Parser;
use std::path::PathBuf;

/// Study companion sidecar: newline-delimited JSON requests on stdin,
/// one JSON response per line on stdout.
#[derive(Parser, Debug, Clone)]
#[command(name = "sembuddyd")]
#[command(version)]
#[command(about = "SemBuddy attendance, marks and study-assistant sidecar", long_about = None)]
pub struct Cli {
    /// Workspace directory holding the store; without one, state lives in memory only
    #[arg(short, long, value_name = "DIR", env = "SEMBUDDY_WORKSPACE")]
    pub workspace: Option<PathBuf>,

    /// Model identifier used by the study assistant
    #[arg(long, value_name = "MODEL", env = "SEMBUDDY_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// API key for the text-generation service
    #[arg(long, value_name = "KEY", env = "API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the text-generation service
    #[arg(long, value_name = "URL", env = "SEMBUDDY_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    pub model: String,
    pub api_base: String,
    pub api_key: Option<String>,
}

impl Cli {
    pub fn chat_config(&self) -> ChatConfig {
        ChatConfig {
            model: self.model.clone(),
            api_base: self.api_base.clone(),
            api_key: self.api_key.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "sembuddyd",
            "--workspace",
            "/tmp/sb",
            "--model",
            "gemini-test",
            "--api-base",
            "http://127.0.0.1:1/v1",
        ])
        .expect("parse");
        assert_eq!(cli.workspace, Some(PathBuf::from("/tmp/sb")));
        let chat = cli.chat_config();
        assert_eq!(chat.model, "gemini-test");
        assert_eq!(chat.api_base, "http://127.0.0.1:1/v1");
    }
}
