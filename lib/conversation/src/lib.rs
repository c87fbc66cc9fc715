//! Conversation orchestration for neurochat.
//!
//! This crate provides:
//!
//! - **Sessions**: one append-only message log per brain region, with a
//!   busy flag guarding against overlapping requests
//! - **Orchestrator**: fans a single activity out to every region session
//!   and folds the replies into the conversation map
//! - **Transport**: the seam between the orchestrator and the completion
//!   gateway
//! - **Transcript**: the plain-text export used by save and share
//! - **Objectives**: learning objectives and progress tracking

pub mod error;
pub mod message;
pub mod objectives;
pub mod orchestrator;
pub mod prompt;
pub mod session;
pub mod transcript;
pub mod transport;

pub use error::{OrchestratorError, SessionError, TransportError};
pub use message::{Message, MessageRole};
pub use objectives::{LearningObjectives, LearningProgress};
pub use orchestrator::{
    ConversationMap, Orchestrator, PendingRound, RegionTranscript, Round, RoundKind, RoundOutcome,
    RoundReport, dispatch,
};
pub use session::{Session, SessionState};
pub use transcript::{TRANSCRIPT_FILENAME, render_transcript};
pub use transport::{ChatTurn, CompletionRequest, CompletionTransport};
