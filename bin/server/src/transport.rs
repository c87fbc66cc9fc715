//! Browser transport to the completion endpoint.

use async_trait::async_trait;
use neurochat_conversation::{CompletionRequest, CompletionTransport, TransportError};

/// Posts completion requests to `/completion/{region}` on the serving origin.
///
/// Only functional in the hydrated client. During server rendering every
/// call fails with [`TransportError::Unavailable`].
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpTransport;

#[async_trait(?Send)]
impl CompletionTransport for HttpTransport {
    #[cfg(feature = "hydrate")]
    async fn complete(
        &self,
        region: &str,
        request: &CompletionRequest,
    ) -> Result<String, TransportError> {
        use crate::types::{CompletionErrorBody, CompletionResponse};

        let segment = String::from(js_sys::encode_uri_component(region));
        let url = format!("/completion/{}", segment);

        let response = gloo_net::http::Request::post(&url)
            .json(request)
            .map_err(|e| TransportError::RequestFailed {
                reason: e.to_string(),
            })?
            .send()
            .await
            .map_err(|e| TransportError::RequestFailed {
                reason: e.to_string(),
            })?;

        if !response.ok() {
            let message = match response.json::<CompletionErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => response.status_text(),
            };
            return Err(TransportError::ServerError {
                status: response.status(),
                message,
            });
        }

        response
            .json::<CompletionResponse>()
            .await
            .map(|body| body.completion)
            .map_err(|e| TransportError::InvalidResponse {
                reason: e.to_string(),
            })
    }

    #[cfg(not(feature = "hydrate"))]
    async fn complete(
        &self,
        _region: &str,
        _request: &CompletionRequest,
    ) -> Result<String, TransportError> {
        Err(TransportError::Unavailable)
    }
}

#[cfg(all(test, not(feature = "hydrate")))]
mod tests {
    use super::*;
    use neurochat_core::Difficulty;

    #[tokio::test]
    async fn unavailable_outside_the_browser() {
        let request = CompletionRequest::from_history(&[], Difficulty::default());
        let result = HttpTransport.complete("Amygdala", &request).await;
        assert_eq!(result, Err(TransportError::Unavailable));
    }
}
