//! Core domain types and utilities for neurochat.
//!
//! This crate provides the foundational types shared by the gateway, the
//! conversation orchestrator and the web UI: the fixed brain-region
//! catalogue, the difficulty level, strongly-typed IDs and the error
//! handling foundation.

pub mod difficulty;
pub mod error;
pub mod id;
pub mod region;

pub use difficulty::{Difficulty, DifficultyError};
pub use error::Result;
pub use id::{MessageId, ParseIdError, SessionId};
pub use region::{REGIONS, Region};
