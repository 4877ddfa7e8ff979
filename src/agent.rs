use log::info;
use std::error::Error;
use std::path::{ Path, PathBuf };
use std::sync::Arc;

use crate::cli::Args;
use crate::llm::LlmConfig;
use crate::llm::chat::{ new_client as new_chat_client, ChatClient };
use crate::memory::MemoryStore;
use crate::models::chat::{ Conversation, Role };
use crate::search::SearchClient;
use crate::tools;

pub const SYSTEM_PROMPT: &str = "\
You are an intelligent and helpful AI assistant. You have access to:
1. Web search capabilities for real-time information
2. File reading capabilities to analyze documents
3. Conversation memory to remember previous interactions

Guidelines:
- Provide detailed, accurate, and helpful responses
- Use web search when asked about current events or recent information
- Offer to read files when users mention documents
- Be conversational and engaging
- Remember context from previous messages in the conversation
- If you're unsure about something, say so and offer to search for more information";

/// Closed set of slash-commands recognized at the start of a turn. At most
/// one form matches; everything else passes through unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Read(String),
    ListFiles,
    Passthrough(String),
}

impl Command {
    pub fn parse(input: &str) -> Self {
        if let Some(query) = strip_command(input, "/search ") {
            Command::Search(query.to_string())
        } else if let Some(path) = strip_command(input, "/read ") {
            Command::Read(path.to_string())
        } else if input.eq_ignore_ascii_case("/files") {
            Command::ListFiles
        } else {
            Command::Passthrough(input.to_string())
        }
    }
}

fn strip_command<'a>(input: &'a str, prefix: &str) -> Option<&'a str> {
    match input.get(..prefix.len()) {
        Some(head) if head.eq_ignore_ascii_case(prefix) => Some(&input[prefix.len()..]),
        _ => None,
    }
}

/// Owns the conversation and mediates between front ends, the adapters,
/// and the remote model. Every successful turn persists the whole
/// conversation as a side effect.
pub struct ChatBot {
    chat_client: Arc<dyn ChatClient>,
    search_client: SearchClient,
    memory: MemoryStore,
    conversation: Conversation,
    workdir: PathBuf,
}

impl ChatBot {
    pub fn new(args: &Args) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let llm_type = args.chat_llm_type.parse()?;
        let api_key = args.resolve_api_key()?;
        let config = LlmConfig {
            llm_type,
            api_key: Some(api_key),
            completion_model: args.chat_model.clone(),
            base_url: args.chat_base_url.clone(),
        };
        let chat_client = new_chat_client(&config)?;
        info!(
            "Chat client configured: Type={}, Model={}, BaseURL={:?}",
            args.chat_llm_type,
            chat_client.get_model(),
            config.base_url.as_deref().unwrap_or("adapter default")
        );

        let search_client = SearchClient::new(&args.search_base_url);
        let memory = MemoryStore::new(&args.memory_path, SYSTEM_PROMPT);

        Ok(Self::with_parts(chat_client, search_client, memory, PathBuf::from(".")))
    }

    pub fn with_parts(
        chat_client: Arc<dyn ChatClient>,
        search_client: SearchClient,
        memory: MemoryStore,
        workdir: PathBuf
    ) -> Self {
        let conversation = memory.load();
        Self {
            chat_client,
            search_client,
            memory,
            conversation,
            workdir,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Handle one user turn: rewrite slash-commands into synthesized
    /// instructions, append the user message, call the model, and persist.
    ///
    /// On a model failure the error text is returned to the caller without
    /// being appended as an assistant message and without persisting; the
    /// user message for the failed turn stays in memory only.
    pub async fn get_response(&mut self, user_input: &str) -> String {
        let user_input = self.rewrite_command(user_input).await;
        self.conversation.push(Role::User, user_input);

        match self.chat_client.complete(&self.conversation).await {
            Ok(completion) => {
                self.conversation.push(Role::Assistant, completion.response.clone());
                self.memory.save(&self.conversation);
                completion.response
            }
            Err(e) => format!("Error: {}", e),
        }
    }

    /// Reset the conversation to the single system message and persist.
    pub fn clear(&mut self) {
        self.conversation = self.memory.seeded();
        self.memory.save(&self.conversation);
    }

    async fn rewrite_command(&self, input: &str) -> String {
        match Command::parse(input) {
            Command::Passthrough(text) => text,
            Command::Search(query) => self.rewrite_search(&query).await,
            Command::Read(path) => {
                format!("Please analyze this file content:\n{}", tools::read_file(&path))
            }
            Command::ListFiles => rewrite_file_listing(&self.workdir),
        }
    }

    async fn rewrite_search(&self, query: &str) -> String {
        match self.search_client.search(query).await {
            Ok(results) => {
                let mut search_info = format!("Web search results for '{}':\n", query);
                for (i, result) in results.iter().enumerate() {
                    search_info.push_str(
                        &format!(
                            "{}. {}\n   {}\n   {}\n\n",
                            i + 1,
                            result.title,
                            result.snippet,
                            result.url
                        )
                    );
                }
                format!(
                    "Based on these search results: {}\nPlease provide a comprehensive answer about: {}",
                    search_info,
                    query
                )
            }
            Err(e) => format!("Search failed: {}. Please answer: {}", e, query),
        }
    }
}

fn rewrite_file_listing(workdir: &Path) -> String {
    match tools::list_files(workdir) {
        Ok(files) => {
            let files_info = format!("Available files:\n{}", files.join("\n"));
            format!(
                "Here are the available files:\n{}\n\nYou can use '/read filename' to read any file.",
                files_info
            )
        }
        Err(e) => format!("Error listing files: {}", e),
    }
}
