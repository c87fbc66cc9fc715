//! Wire types shared by the completion endpoint and the browser transport.

use serde::{Deserialize, Serialize};

/// Successful completion body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub completion: String,
}

/// Error body. The message is user-safe and never carries provider detail.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionErrorBody {
    pub error: String,
}
