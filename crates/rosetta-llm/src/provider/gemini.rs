//! Gemini adapter: builds requests and parses responses

use serde_json::Value;

use super::{Operation, ProviderAdapter, ProviderKind, decode_lenient};
use crate::convert::gemini::response_to_canonical;
use crate::entropy::{ResponseEntropy, SystemEntropy};
use crate::error::AdapterError;
use crate::protocol::gemini::{GeminiRequest, GeminiResponse};
use crate::types::{CanonicalRequest, CanonicalResponse};

/// Shared registry instance
pub(super) static ADAPTER: GeminiAdapter = GeminiAdapter::new();

/// Adapter for the Gemini `generateContent` format
///
/// Response parsing synthesizes ids and a timestamp; `S` supplies them.
#[derive(Debug, Clone, Default)]
pub struct GeminiAdapter<S = SystemEntropy> {
    entropy: S,
}

impl GeminiAdapter {
    /// Adapter using random ids and the wall clock
    pub const fn new() -> Self {
        Self { entropy: SystemEntropy }
    }
}

impl<S: ResponseEntropy> GeminiAdapter<S> {
    /// Adapter using the given id and clock source
    pub const fn with_entropy(entropy: S) -> Self {
        Self { entropy }
    }

    /// Typed response parse
    pub fn parse_native_response(&self, response: GeminiResponse) -> CanonicalResponse {
        response_to_canonical(response, &self.entropy)
    }
}

/// Typed request build
pub fn build_request(request: &CanonicalRequest) -> GeminiRequest {
    request.into()
}

impl<S: ResponseEntropy> ProviderAdapter for GeminiAdapter<S> {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    fn parse_request(&self, _body: &Value) -> Result<CanonicalRequest, AdapterError> {
        Err(AdapterError::unimplemented(self.kind(), Operation::ParseRequest))
    }

    fn build_request(&self, request: &CanonicalRequest) -> Result<Value, AdapterError> {
        let payload = build_request(request);

        tracing::debug!(
            adapter = self.name(),
            operation = %Operation::BuildRequest,
            contents = payload.contents.len(),
            has_system_instruction = payload.system_instruction.is_some(),
            model = %payload.model,
            "built native request"
        );

        Ok(serde_json::to_value(payload)?)
    }

    fn parse_response(&self, body: &Value) -> Result<CanonicalResponse, AdapterError> {
        let response = self.parse_native_response(decode_lenient(body));

        tracing::debug!(
            adapter = self.name(),
            operation = %Operation::ParseResponse,
            id = %response.id,
            "converted response to canonical"
        );

        Ok(response)
    }

    fn build_response(&self, _response: &CanonicalResponse) -> Result<Value, AdapterError> {
        Err(AdapterError::unimplemented(self.kind(), Operation::BuildResponse))
    }
}
