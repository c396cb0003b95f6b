use serde::{Deserialize, Serialize};

use crate::artifact::ArtifactList;
use crate::error::UpstreamError;
use crate::fence::{extract, strip_fences};
use crate::preview::{compose, PreviewDocument};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One turn of the conversation, as sent back to the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// What a single assistant reply changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    /// Reply with code blocks removed, for the chat view
    pub display_text: String,
    /// Whether the reply replaced the current artifacts
    pub code_updated: bool,
}

/// State of one generation conversation.
///
/// Each reply that contains code replaces the whole artifact list and
/// preview; a reply without code leaves both untouched.
#[derive(Debug, Clone, Default)]
pub struct Session {
    messages: Vec<ChatMessage>,
    artifacts: ArtifactList,
    preview: Option<PreviewDocument>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.messages.push(ChatMessage {
            role: Role::User,
            content: text.into(),
        });
    }

    /// Record an assistant reply and refresh the project if it has code.
    pub fn apply_response(&mut self, text: &str) -> TurnOutcome {
        self.messages.push(ChatMessage {
            role: Role::Assistant,
            content: text.to_string(),
        });

        let artifacts = extract(text);
        let code_updated = !artifacts.is_empty();
        if code_updated {
            log::info!("Reply produced {} code artifacts", artifacts.len());
            self.preview = Some(compose(&artifacts));
            self.artifacts = artifacts;
        } else {
            log::debug!("Reply has no complete code block; keeping current artifacts");
        }

        let stripped = strip_fences(text);
        let display_text = if stripped.is_empty() {
            text.trim().to_string()
        } else {
            stripped
        };

        TurnOutcome {
            display_text,
            code_updated,
        }
    }

    /// Record a failed request as an assistant turn.
    pub fn apply_failure(&mut self, err: &UpstreamError) -> String {
        log::error!("Assistant request failed: {}", err);
        let text = err.user_message();
        self.messages.push(ChatMessage {
            role: Role::Assistant,
            content: text.clone(),
        });
        text
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Conversation to send with the next request
    pub fn outbound_messages(&self) -> Vec<ChatMessage> {
        self.messages.clone()
    }

    pub fn artifacts(&self) -> &ArtifactList {
        &self.artifacts
    }

    /// Current preview; `None` until a reply has produced code
    pub fn preview(&self) -> Option<&PreviewDocument> {
        self.preview.as_ref()
    }
}
