//! `OpenRouter` adapter: builds requests and parses responses

use serde_json::Value;

use super::{Operation, ProviderAdapter, ProviderKind, decode_lenient};
use crate::error::AdapterError;
use crate::protocol::openrouter::{OpenRouterRequest, OpenRouterResponse};
use crate::types::{CanonicalRequest, CanonicalResponse};

/// Shared registry instance
pub(super) static ADAPTER: OpenRouterAdapter = OpenRouterAdapter;

/// Adapter for the `OpenRouter` / `OpenAI` chat completion format
///
/// Used as the generation target: requests go out, responses come back.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenRouterAdapter;

/// Typed request build
pub fn build_request(request: &CanonicalRequest) -> OpenRouterRequest {
    request.into()
}

/// Typed response parse
pub fn parse_response(response: OpenRouterResponse) -> CanonicalResponse {
    response.into()
}

impl ProviderAdapter for OpenRouterAdapter {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenRouter
    }

    fn parse_request(&self, _body: &Value) -> Result<CanonicalRequest, AdapterError> {
        Err(AdapterError::unimplemented(self.kind(), Operation::ParseRequest))
    }

    fn build_request(&self, request: &CanonicalRequest) -> Result<Value, AdapterError> {
        let payload = build_request(request);

        tracing::debug!(
            adapter = self.name(),
            operation = %Operation::BuildRequest,
            canonical_messages = request.messages.len(),
            native_messages = payload.messages.len(),
            model = %payload.model,
            "built native request"
        );

        Ok(serde_json::to_value(payload)?)
    }

    fn parse_response(&self, body: &Value) -> Result<CanonicalResponse, AdapterError> {
        let response = parse_response(decode_lenient(body));

        tracing::debug!(
            adapter = self.name(),
            operation = %Operation::ParseResponse,
            choices = response.choices.len(),
            has_usage = response.usage.is_some(),
            "converted response to canonical"
        );

        Ok(response)
    }

    fn build_response(&self, _response: &CanonicalResponse) -> Result<Value, AdapterError> {
        Err(AdapterError::unimplemented(self.kind(), Operation::BuildResponse))
    }
}
