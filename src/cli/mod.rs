use clap::Parser;
use std::error::Error;

use crate::llm::LlmType;
use crate::search::DEFAULT_SEARCH_BASE_URL;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Front end to run (terminal, web)
    #[arg(long, env = "MODE", default_value = "terminal")]
    pub mode: String,

    /// Type of LLM provider for chat completion (gemini, openai)
    #[arg(long, env = "CHAT_LLM_TYPE", default_value = "gemini")]
    pub chat_llm_type: String,

    /// API Key for the chat LLM provider. Falls back to GEMINI_API_KEY or
    /// OPENAI_API_KEY depending on the provider.
    #[arg(long, env = "CHAT_API_KEY", default_value = "")]
    pub chat_api_key: String,

    /// Model name for chat completion (e.g., gemini-1.5-flash, gpt-3.5-turbo)
    #[arg(long, env = "CHAT_MODEL")]
    pub chat_model: Option<String>,

    /// Base URL for the chat LLM provider API
    #[arg(long, env = "CHAT_BASE_URL")]
    pub chat_base_url: Option<String>,

    /// Base URL of the web search provider's HTML endpoint
    #[arg(long, env = "SEARCH_BASE_URL", default_value = DEFAULT_SEARCH_BASE_URL)]
    pub search_base_url: String,

    /// Path to the conversation memory file
    #[arg(long, env = "MEMORY_PATH", default_value = "chatbot_memory.json")]
    pub memory_path: String,

    /// Host address and port for the web server to listen on
    #[arg(long, env = "SERVER_ADDR", default_value = "127.0.0.1:5000")]
    pub server_addr: String,
}

impl Args {
    /// Resolve the API key: the explicit flag/env value first, then the
    /// provider-specific environment variable. Absence is a fatal startup
    /// condition; the error carries the guidance text.
    pub fn resolve_api_key(&self) -> Result<String, Box<dyn Error + Send + Sync>> {
        if !self.chat_api_key.is_empty() {
            return Ok(self.chat_api_key.clone());
        }

        let fallback_var = match self.chat_llm_type.parse::<LlmType>() {
            Ok(LlmType::OpenAI) => "OPENAI_API_KEY",
            _ => "GEMINI_API_KEY",
        };
        match std::env::var(fallback_var) {
            Ok(key) if !key.is_empty() => Ok(key),
            _ =>
                Err(
                    format!(
                        "{var} not found.\n\
                         Please set your API key in one of these ways:\n\
                         1. Create a .env file with: {var}=your_key_here\n\
                         2. Set environment variable: export {var}=your_key_here\n\
                         3. Pass it on the command line: --chat-api-key your_key_here",
                        var = fallback_var
                    ).into()
                ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_with_key(chat_llm_type: &str, chat_api_key: &str) -> Args {
        Args::parse_from([
            "enhanced-chatbot",
            "--chat-llm-type",
            chat_llm_type,
            "--chat-api-key",
            chat_api_key,
        ])
    }

    #[test]
    fn explicit_key_wins() {
        let args = args_with_key("gemini", "abc123");
        assert_eq!(args.resolve_api_key().unwrap(), "abc123");
    }

    #[test]
    fn missing_key_yields_provider_specific_guidance() {
        // Relies on OPENAI_API_KEY being unset in the test environment.
        let args = args_with_key("openai", "");
        if std::env::var("OPENAI_API_KEY").is_ok() {
            return;
        }
        let err = args.resolve_api_key().unwrap_err().to_string();
        assert!(err.contains("OPENAI_API_KEY not found"));
        assert!(err.contains(".env file"));
    }
}
