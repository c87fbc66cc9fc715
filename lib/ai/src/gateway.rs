//! Completion gateway.
//!
//! The gateway is stateless: every call prepends a difficulty directive to
//! the caller's history, makes exactly one provider call at a fixed
//! temperature, and returns the first choice's text. Failures are logged
//! here with full detail and reported upward as a single opaque variant.

use crate::backend::{LlmBackend, LlmMessage, LlmRequest};
use crate::error::GatewayError;
use neurochat_core::Difficulty;
use rootcause::prelude::Report;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, instrument};

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Sampling temperature used when none is configured.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Builds the system directive for a difficulty level.
#[must_use]
pub fn system_directive(difficulty: Difficulty) -> String {
    format!(
        "You are tasked with responding to a level {} query.",
        difficulty.level()
    )
}

/// Stateless adapter over an [`LlmBackend`].
#[derive(Clone)]
pub struct CompletionGateway {
    backend: Arc<dyn LlmBackend>,
    temperature: f32,
}

impl CompletionGateway {
    /// Creates a gateway using [`DEFAULT_TEMPERATURE`].
    #[must_use]
    pub fn new(backend: Arc<dyn LlmBackend>) -> Self {
        Self {
            backend,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Overrides the sampling temperature.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Model identifier of the underlying backend.
    #[must_use]
    pub fn model(&self) -> &str {
        self.backend.model()
    }

    /// Builds the provider request: directive first, then the history as given.
    #[must_use]
    pub fn build_request(&self, messages: Vec<LlmMessage>, difficulty: Difficulty) -> LlmRequest {
        LlmRequest::new(messages)
            .with_system(system_directive(difficulty))
            .with_temperature(self.temperature)
    }

    /// Requests one completion for `messages` at `difficulty`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::CompletionFailed`] if the provider call fails
    /// for any reason. No retry is attempted.
    #[instrument(skip(self, messages), fields(model = %self.backend.model(), history = messages.len()))]
    pub async fn complete(
        &self,
        messages: Vec<LlmMessage>,
        difficulty: Difficulty,
    ) -> Result<String, Report<GatewayError>> {
        let request = self.build_request(messages, difficulty);
        let started = Instant::now();

        let response = self.backend.generate(&request).await.map_err(|e| {
            error!(error = %e, %difficulty, "completion provider call failed");
            GatewayError::CompletionFailed {
                model: self.backend.model().to_string(),
            }
        })?;

        info!(
            %difficulty,
            latency_ms = started.elapsed().as_millis() as u64,
            tokens = response.usage.total(),
            "completion generated"
        );

        Ok(response.content)
    }
}

impl std::fmt::Debug for CompletionGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionGateway")
            .field("provider", &self.backend.provider())
            .field("model", &self.backend.model())
            .field("temperature", &self.temperature)
            .finish()
    }
}
