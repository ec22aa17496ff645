//! LLM provider trait and chat message type

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One turn of a chat conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Chat completion backend
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Run one completion and return the assistant text
    async fn complete(&self, messages: &[ChatMessage], max_tokens: u32) -> Result<String>;

    /// Probe whether the backend is reachable
    async fn health_check(&self) -> Result<()>;

    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_message_roles() {
        assert_eq!(ChatMessage::system("a").role, "system");
        assert_eq!(ChatMessage::user("b").role, "user");
    }

    #[test]
    fn test_chat_message_serializes_role_and_content() {
        let json = serde_json::to_value(ChatMessage::user("hi")).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["content"], "hi");
    }
}
