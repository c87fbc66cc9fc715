//! Error types for the conversation crate.
//!
//! Errors are designed for layered context using rootcause:
//! - `SessionError`: Errors from a single region session
//! - `TransportError`: Errors from a completion round-trip
//! - `OrchestratorError`: Errors from multi-region operations

use std::fmt;

/// Errors from session operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The session is still awaiting a previous response.
    Busy { region: String },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Busy { region } => {
                write!(f, "session for {region} is awaiting a response")
            }
        }
    }
}

impl std::error::Error for SessionError {}

/// Errors from a completion round-trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The request never reached the gateway.
    RequestFailed { reason: String },
    /// The gateway answered with an error status.
    ServerError { status: u16, message: String },
    /// The gateway's answer could not be decoded.
    InvalidResponse { reason: String },
    /// No transport is available in this environment.
    Unavailable,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RequestFailed { reason } => write!(f, "request failed: {reason}"),
            Self::ServerError { status, message } => {
                write!(f, "server returned {status}: {message}")
            }
            Self::InvalidResponse { reason } => write!(f, "invalid response: {reason}"),
            Self::Unavailable => write!(f, "completion transport unavailable"),
        }
    }
}

impl std::error::Error for TransportError {}

/// Errors from orchestrator operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrchestratorError {
    /// The summarizing session is still awaiting a response.
    SummaryBusy { region: String },
    /// The summary round-trip failed.
    SummaryFailed { region: String, reason: String },
}

impl fmt::Display for OrchestratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SummaryBusy { region } => {
                write!(f, "cannot summarize: {region} is awaiting a response")
            }
            Self::SummaryFailed { region, reason } => {
                write!(f, "summary from {region} failed: {reason}")
            }
        }
    }
}

impl std::error::Error for OrchestratorError {}
