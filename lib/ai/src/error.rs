//! Error types for the AI crate.
//!
//! Errors are designed for layered context using rootcause:
//! - `LlmError`: Low-level LLM backend operations
//! - `GatewayError`: What the completion gateway reports to its caller

use std::fmt;

/// Errors from LLM backend operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    /// Provider is unreachable.
    ProviderUnavailable { provider: String, reason: String },
    /// Provider answered with a non-success status.
    RequestFailed { status: Option<u16>, reason: String },
    /// Response parsing failed.
    ResponseParseFailed { reason: String },
    /// Response had no choices or no text.
    EmptyCompletion,
    /// Timeout waiting for response.
    Timeout,
    /// Invalid configuration.
    InvalidConfig { reason: String },
}

impl fmt::Display for LlmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProviderUnavailable { provider, reason } => {
                write!(f, "LLM provider '{provider}' unavailable: {reason}")
            }
            Self::RequestFailed {
                status: Some(status),
                reason,
            } => {
                write!(f, "LLM request failed with HTTP {status}: {reason}")
            }
            Self::RequestFailed {
                status: None,
                reason,
            } => {
                write!(f, "LLM request failed: {reason}")
            }
            Self::ResponseParseFailed { reason } => {
                write!(f, "failed to parse LLM response: {reason}")
            }
            Self::EmptyCompletion => write!(f, "LLM response contained no completion"),
            Self::Timeout => write!(f, "LLM request timed out"),
            Self::InvalidConfig { reason } => {
                write!(f, "invalid LLM configuration: {reason}")
            }
        }
    }
}

impl std::error::Error for LlmError {}

/// Errors from the completion gateway.
///
/// Deliberately coarse: callers only learn that the completion failed.
/// The underlying `LlmError` is logged where it happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The provider call failed for any reason.
    CompletionFailed { model: String },
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CompletionFailed { model } => {
                write!(f, "failed to generate completion with model '{model}'")
            }
        }
    }
}

impl std::error::Error for GatewayError {}
