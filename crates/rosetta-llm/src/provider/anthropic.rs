//! Anthropic adapter: parses requests and builds responses

use serde_json::Value;

use super::{Operation, ProviderAdapter, ProviderKind, decode_lenient};
use crate::error::AdapterError;
use crate::protocol::anthropic::{AnthropicRequest, AnthropicResponse};
use crate::types::{CanonicalRequest, CanonicalResponse};

/// Shared registry instance
pub(super) static ADAPTER: AnthropicAdapter = AnthropicAdapter;

/// Adapter for the Anthropic Messages format
///
/// Used as the client-facing side: requests come in, responses go out.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnthropicAdapter;

/// Typed request parse
pub fn parse_request(request: AnthropicRequest) -> CanonicalRequest {
    request.into()
}

/// Typed response build
pub fn build_response(response: &CanonicalResponse) -> AnthropicResponse {
    response.into()
}

impl ProviderAdapter for AnthropicAdapter {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Anthropic
    }

    fn parse_request(&self, body: &Value) -> Result<CanonicalRequest, AdapterError> {
        let request = parse_request(decode_lenient(body));

        tracing::debug!(
            adapter = self.name(),
            operation = %Operation::ParseRequest,
            messages = request.messages.len(),
            tools = request.tools.as_ref().map_or(0, Vec::len),
            "converted request to canonical"
        );

        Ok(request)
    }

    fn build_request(&self, _request: &CanonicalRequest) -> Result<Value, AdapterError> {
        Err(AdapterError::unimplemented(self.kind(), Operation::BuildRequest))
    }

    fn parse_response(&self, _body: &Value) -> Result<CanonicalResponse, AdapterError> {
        Err(AdapterError::unimplemented(self.kind(), Operation::ParseResponse))
    }

    fn build_response(&self, response: &CanonicalResponse) -> Result<Value, AdapterError> {
        tracing::debug!(
            adapter = self.name(),
            operation = %Operation::BuildResponse,
            choices = response.choices.len(),
            "building native response"
        );

        Ok(serde_json::to_value(build_response(response))?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn build_request_is_unimplemented() {
        let err = AnthropicAdapter
            .build_request(&CanonicalRequest::default())
            .unwrap_err();
        assert!(err.is_unimplemented());
        assert_eq!(err.to_string(), "anthropic adapter does not implement build_request");
    }

    #[test]
    fn parse_response_is_unimplemented() {
        for body in [json!(null), json!({}), json!({"content": "hi"})] {
            assert!(AnthropicAdapter.parse_response(&body).unwrap_err().is_unimplemented());
        }
    }

    #[test]
    fn parse_request_tags_provider() {
        let request = AnthropicAdapter
            .parse_request(&json!({"messages": [{"role": "user", "content": "hi"}]}))
            .unwrap();
        assert_eq!(request.provider, "anthropic");
        assert_eq!(request.messages.len(), 1);
    }

    #[test]
    fn parse_request_tolerates_non_object_body() {
        let request = AnthropicAdapter.parse_request(&json!(42)).unwrap();
        assert!(request.messages.is_empty());
    }

    #[test]
    fn build_response_with_no_choices_is_well_formed() {
        let out = AnthropicAdapter
            .build_response(&CanonicalResponse::default())
            .unwrap();
        assert_eq!(out["content"], "");
        assert!(out["stop_reason"].is_null());
        assert_eq!(out["usage"], json!({"input_tokens": 0, "output_tokens": 0}));
    }
}
