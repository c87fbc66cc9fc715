//! The seam between the orchestrator and the completion gateway.
//!
//! The request body here is exactly what `POST /completion/{region}`
//! accepts, so the browser transport, the HTTP handler and in-process
//! transports all agree on one shape.

use crate::error::TransportError;
use crate::message::{Message, MessageRole};
use async_trait::async_trait;
use neurochat_core::Difficulty;
use serde::{Deserialize, Serialize};

/// One `{role, content}` entry of a completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Sender role.
    pub role: MessageRole,
    /// Text content.
    pub content: String,
}

impl From<&Message> for ChatTurn {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role,
            content: message.content.clone(),
        }
    }
}

/// Body of a completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// The session history, oldest first.
    pub messages: Vec<ChatTurn>,
    /// Difficulty captured when the round started.
    pub difficulty: Difficulty,
}

impl CompletionRequest {
    /// Builds a request from a session's messages.
    #[must_use]
    pub fn from_history(history: &[Message], difficulty: Difficulty) -> Self {
        Self {
            messages: history.iter().map(ChatTurn::from).collect(),
            difficulty,
        }
    }
}

/// Performs one completion round-trip for a region.
///
/// Futures returned by implementations need not be `Send`; the browser
/// transport runs on the single-threaded WASM executor.
#[async_trait(?Send)]
pub trait CompletionTransport {
    /// Sends `request` on behalf of `region` and returns the reply text.
    ///
    /// # Errors
    ///
    /// Returns an error if the round-trip fails for any reason.
    async fn complete(
        &self,
        region: &str,
        request: &CompletionRequest,
    ) -> Result<String, TransportError>;
}
