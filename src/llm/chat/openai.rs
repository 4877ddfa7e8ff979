use async_trait::async_trait;
use log::info;
use reqwest::{ Client as HttpClient, header::AUTHORIZATION };
use serde::{ Deserialize, Serialize };
use std::error::Error as StdError;

use super::{ ChatClient, CompletionResponse };
use crate::llm::LlmConfig;
use crate::models::chat::Conversation;

const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const MAX_TOKENS: u32 = 2000;
const TEMPERATURE: f32 = 0.7;

#[derive(Serialize, Deserialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct OpenAIChatRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
}

pub struct OpenAIChatClient {
    http: HttpClient,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAIChatClient {
    pub fn new(api_key: String, model: Option<String>, base_url: Option<String>) -> Self {
        Self {
            http: HttpClient::new(),
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, Box<dyn StdError + Send + Sync>> {
        let api_key = config.api_key
            .clone()
            .ok_or_else(|| "OpenAI API key is required for OpenAIChatClient".to_string())?;
        Ok(Self::new(api_key, config.completion_model.clone(), config.base_url.clone()))
    }

    fn build_request(&self, conversation: &Conversation) -> OpenAIChatRequest {
        OpenAIChatRequest {
            model: self.model.clone(),
            messages: conversation.messages
                .iter()
                .map(|msg| OpenAIMessage {
                    role: msg.role.as_str().to_string(),
                    content: msg.content.clone(),
                })
                .collect(),
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        }
    }
}

#[async_trait]
impl ChatClient for OpenAIChatClient {
    async fn complete(
        &self,
        conversation: &Conversation
    ) -> Result<CompletionResponse, Box<dyn StdError + Send + Sync>> {
        let payload = self.build_request(conversation);
        let url = format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'));
        info!("OpenAIChatClient::complete() -> model={}", self.model);

        let response = self.http
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&payload)
            .send().await?
            .error_for_status()?
            .json::<OpenAIResponse>().await?;

        let text = response.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| "OpenAI response contained no choices".to_string())?;
        Ok(CompletionResponse { response: text })
    }

    fn get_model(&self) -> String {
        self.model.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chat::Role;

    #[test]
    fn request_carries_role_tagged_messages() {
        let client = OpenAIChatClient::new("sk-test".to_string(), None, None);
        let mut conversation = Conversation::seeded("Be helpful.");
        conversation.push(Role::User, "hi");

        let request = client.build_request(&conversation);
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["model"], "gpt-3.5-turbo");
        assert_eq!(value["max_tokens"], 2000);
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["role"], "user");
        assert_eq!(value["messages"][1]["content"], "hi");
    }

    #[test]
    fn parses_completion_response() {
        let raw = r#"{"choices": [{"message": {"role": "assistant", "content": "hello"}}]}"#;
        let response: OpenAIResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.choices[0].message.content, "hello");
    }
}
