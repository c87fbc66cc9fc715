//! Per-region conversation sessions.
//!
//! A session owns one region's message log. The log only grows: messages
//! are appended when a round starts and when its reply arrives, and are
//! never edited or removed. A session serves one round at a time.

use crate::error::SessionError;
use crate::message::Message;
use crate::transport::CompletionRequest;
use chrono::{DateTime, Utc};
use neurochat_core::{Difficulty, Region, SessionId};
use serde::{Deserialize, Serialize};

/// Transport state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No request in flight.
    Idle,
    /// Waiting for the gateway to answer.
    Awaiting,
}

/// A region's conversation session.
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    region: &'static Region,
    state: SessionState,
    messages: Vec<Message>,
    last_error: Option<String>,
    created_at: DateTime<Utc>,
    last_active_at: DateTime<Utc>,
}

impl Session {
    /// Creates an empty, idle session for a region.
    #[must_use]
    pub fn new(region: &'static Region) -> Self {
        let now = Utc::now();
        Self {
            id: SessionId::at(now.into()),
            region,
            state: SessionState::Idle,
            messages: Vec::new(),
            last_error: None,
            created_at: now,
            last_active_at: now,
        }
    }

    /// Session identifier.
    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// The region this session speaks for.
    #[must_use]
    pub fn region(&self) -> &'static Region {
        self.region
    }

    /// Current transport state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Returns true while a request is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.state == SessionState::Awaiting
    }

    /// Messages in append order.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the number of messages.
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Returns true if nothing has been appended yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Returns the last message, if any.
    #[must_use]
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Error from the most recent round, cleared when the next round starts.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// When the session was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When a message was last appended or a round last finished.
    #[must_use]
    pub fn last_active_at(&self) -> DateTime<Utc> {
        self.last_active_at
    }

    /// Appends a user prompt and marks the session as awaiting a reply.
    ///
    /// Returns the request to send, carrying the full history including the
    /// new prompt.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Busy`] without appending if a round is
    /// already in flight.
    pub fn begin_round(
        &mut self,
        prompt: impl Into<String>,
        difficulty: Difficulty,
    ) -> Result<CompletionRequest, SessionError> {
        if self.is_busy() {
            return Err(SessionError::Busy {
                region: self.region.name.to_string(),
            });
        }

        self.push(Message::user(prompt).with_region(self.region.name));
        self.state = SessionState::Awaiting;
        self.last_error = None;

        Ok(CompletionRequest::from_history(&self.messages, difficulty))
    }

    /// Appends the reply and returns the session to idle.
    pub fn complete_round(&mut self, reply: impl Into<String>) -> &Message {
        self.push(Message::assistant(reply).with_region(self.region.name));
        self.state = SessionState::Idle;
        &self.messages[self.messages.len() - 1]
    }

    /// Records a failed round and returns the session to idle.
    ///
    /// The prompt that started the round stays in the log.
    pub fn fail_round(&mut self, reason: impl Into<String>) {
        self.state = SessionState::Idle;
        self.last_error = Some(reason.into());
        self.last_active_at = Utc::now();
    }

    fn push(&mut self, message: Message) {
        self.messages.push(message);
        self.last_active_at = Utc::now();
    }
}
