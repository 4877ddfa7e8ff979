pub mod gemini;
pub mod openai;

use async_trait::async_trait;
use serde::Deserialize;
use std::error::Error as StdError;
use std::sync::Arc;
use super::{ LlmConfig, LlmType };
use crate::models::chat::Conversation;
use self::gemini::GeminiChatClient;
use self::openai::OpenAIChatClient;

#[derive(Deserialize, Debug, Clone)]
pub struct CompletionResponse {
    pub response: String,
}

/// A remote model invocation capability. Both providers receive the full
/// conversation; each projects it into its own wire shape.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn complete(
        &self,
        conversation: &Conversation
    ) -> Result<CompletionResponse, Box<dyn StdError + Send + Sync>>;

    fn get_model(&self) -> String;
}

/// Flatten a conversation into `Role: content` blocks joined by blank
/// lines, the projection used by providers without a structured message
/// list.
pub fn flatten_conversation(conversation: &Conversation) -> String {
    conversation.messages
        .iter()
        .map(|msg| format!("{}: {}", msg.role, msg.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn new_client(
    config: &LlmConfig
) -> Result<Arc<dyn ChatClient>, Box<dyn StdError + Send + Sync>> {
    let client: Arc<dyn ChatClient> = match config.llm_type {
        LlmType::Gemini => {
            let specific_client = GeminiChatClient::from_config(config)?;
            Arc::new(specific_client)
        }
        LlmType::OpenAI => {
            let specific_client = OpenAIChatClient::from_config(config)?;
            Arc::new(specific_client)
        }
    };
    Ok(client)
}
