use chrono::Local;
use log::{ error, info, warn };
use std::fs;
use std::path::PathBuf;

use crate::models::chat::{ ChatMessage, Conversation, MemoryDocument, Role };

/// Persistence for the conversation as one flat JSON document. Load and
/// save are both best-effort: failures are logged and absorbed, never
/// raised. Writes are whole-document overwrites, last writer wins.
pub struct MemoryStore {
    path: PathBuf,
    system_prompt: String,
}

impl MemoryStore {
    pub fn new(path: impl Into<PathBuf>, system_prompt: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            system_prompt: system_prompt.into(),
        }
    }

    /// A fresh conversation holding only the system message.
    pub fn seeded(&self) -> Conversation {
        Conversation::seeded(&self.system_prompt)
    }

    pub fn load(&self) -> Conversation {
        if !self.path.exists() {
            info!("No memory file at {}, starting fresh", self.path.display());
            return self.seeded();
        }

        let document = fs
            ::read_to_string(&self.path)
            .map_err(|e| e.to_string())
            .and_then(|raw| {
                serde_json::from_str::<MemoryDocument>(&raw).map_err(|e| e.to_string())
            });

        match document {
            Ok(document) => {
                if document.conversations.is_empty() {
                    return self.seeded();
                }
                info!("Loaded {} previous messages from memory", document.conversations.len());
                self.with_system_message(document.conversations)
            }
            Err(e) => {
                warn!("Could not load memory from {}: {}", self.path.display(), e);
                self.seeded()
            }
        }
    }

    pub fn save(&self, conversation: &Conversation) {
        let document = MemoryDocument {
            conversations: conversation.messages.clone(),
            last_updated: Local::now().to_rfc3339(),
        };
        let result = serde_json
            ::to_string_pretty(&document)
            .map_err(|e| e.to_string())
            .and_then(|json| fs::write(&self.path, json).map_err(|e| e.to_string()));

        if let Err(e) = result {
            error!("Could not save memory to {}: {}", self.path.display(), e);
        }
    }

    // Loaded histories predating the current prompt may lack the leading
    // system message; re-seed it so the invariant holds.
    fn with_system_message(&self, messages: Vec<ChatMessage>) -> Conversation {
        let mut conversation = Conversation { messages };
        if conversation.messages.first().map(|m| m.role) != Some(Role::System) {
            conversation.messages.insert(0, ChatMessage::new(Role::System, &self.system_prompt));
        }
        conversation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PROMPT: &str = "You are a test assistant.";

    fn store_in(dir: &TempDir) -> MemoryStore {
        MemoryStore::new(dir.path().join("memory.json"), PROMPT)
    }

    #[test]
    fn absent_file_yields_seeded_conversation() {
        let dir = TempDir::new().unwrap();
        let conversation = store_in(&dir).load();
        assert_eq!(conversation, Conversation::seeded(PROMPT));
    }

    #[test]
    fn save_then_load_round_trips_messages() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let mut conversation = store.seeded();
        conversation.push(Role::User, "what is rust?");
        conversation.push(Role::Assistant, "a systems language");
        store.save(&conversation);

        let reloaded = store.load();
        assert_eq!(reloaded, conversation);
    }

    #[test]
    fn saved_document_carries_last_updated_timestamp() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save(&store.seeded());

        let raw = fs::read_to_string(dir.path().join("memory.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value["last_updated"].as_str().unwrap().contains('T'));
        assert_eq!(value["conversations"][0]["role"], "system");
    }

    #[test]
    fn corrupt_file_falls_back_to_seeded_conversation() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("memory.json"), "{not json").unwrap();

        let conversation = store_in(&dir).load();
        assert_eq!(conversation, Conversation::seeded(PROMPT));
    }

    #[test]
    fn loaded_history_without_system_message_is_reseeded() {
        let dir = TempDir::new().unwrap();
        let raw = r#"{
            "conversations": [{"role": "user", "content": "hello"}],
            "last_updated": "2024-01-01T00:00:00"
        }"#;
        fs::write(dir.path().join("memory.json"), raw).unwrap();

        let conversation = store_in(&dir).load();
        assert_eq!(conversation.messages[0].role, Role::System);
        assert_eq!(conversation.messages[1].content, "hello");
    }
}
