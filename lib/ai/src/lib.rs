//! AI primitives for neurochat.
//!
//! This crate provides:
//!
//! - **Backend**: the `LlmBackend` abstraction over a hosted chat-completion
//!   provider, plus an OpenAI-compatible implementation
//! - **Gateway**: the stateless adapter that turns a conversation history and
//!   a difficulty level into a single completion

pub mod backend;
pub mod error;
pub mod gateway;
pub mod openai;

pub use backend::{
    LlmBackend, LlmBackendConfig, LlmMessage, LlmProvider, LlmRequest, LlmResponse, MessageRole,
    TokenUsage,
};
pub use error::{GatewayError, LlmError};
pub use gateway::{CompletionGateway, DEFAULT_MODEL, DEFAULT_TEMPERATURE, system_directive};
pub use openai::OpenAiBackend;
