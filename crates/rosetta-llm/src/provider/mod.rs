//! Adapter trait and the per-vendor implementations

pub mod anthropic;
pub mod gemini;
pub mod openrouter;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::AdapterError;
use crate::types::{CanonicalRequest, CanonicalResponse, Content};

pub use anthropic::AnthropicAdapter;
pub use gemini::GeminiAdapter;
pub use openrouter::OpenRouterAdapter;

/// Vendor wire formats known to this crate
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum ProviderKind {
    /// Message/content-block format
    #[strum(to_string = "anthropic", serialize = "claude")]
    Anthropic,
    /// Choices/`tool_calls` chat completion format
    #[strum(to_string = "openrouter", serialize = "openai")]
    OpenRouter,
    /// Contents/parts format
    #[strum(to_string = "gemini", serialize = "google")]
    Gemini,
}

impl ProviderKind {
    /// Shared stateless adapter for this vendor
    pub fn adapter(self) -> &'static dyn ProviderAdapter {
        match self {
            Self::Anthropic => &anthropic::ADAPTER,
            Self::OpenRouter => &openrouter::ADAPTER,
            Self::Gemini => &gemini::ADAPTER,
        }
    }
}

/// The four conversions an adapter may perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Operation {
    /// Native request to canonical
    ParseRequest,
    /// Canonical request to native
    BuildRequest,
    /// Native response to canonical
    ParseResponse,
    /// Canonical response to native
    BuildResponse,
}

/// Conversion contract implemented by every vendor adapter
///
/// Native payloads are exchanged as JSON values; the caller owns byte-level
/// encoding and transport. Operations outside an adapter's role return
/// [`AdapterError::Unimplemented`] for every input.
pub trait ProviderAdapter: Send + Sync {
    /// Vendor this adapter speaks
    fn kind(&self) -> ProviderKind;

    /// Stable adapter name, also written into parsed requests
    fn name(&self) -> &'static str {
        self.kind().into()
    }

    /// Native request to canonical
    fn parse_request(&self, body: &Value) -> Result<CanonicalRequest, AdapterError>;

    /// Canonical request to native
    fn build_request(&self, request: &CanonicalRequest) -> Result<Value, AdapterError>;

    /// Native response to canonical
    fn parse_response(&self, body: &Value) -> Result<CanonicalResponse, AdapterError>;

    /// Canonical response to native
    fn build_response(&self, response: &CanonicalResponse) -> Result<Value, AdapterError>;

    /// Whether any message of the request carries an image
    fn has_images(&self, request: &CanonicalRequest) -> bool {
        crate::utils::has_images(request)
    }

    /// Newline-joined text of some content
    fn extract_text(&self, content: &Content) -> String {
        crate::utils::extract_text(content)
    }
}

/// Nesting depth past which native bodies are cut before decoding
///
/// Matches the recursion limit `serde_json` applies when parsing text.
const MAX_BODY_DEPTH: usize = 128;

/// Decode a native body, falling back to defaults when it is not an object
///
/// Values nested deeper than [`MAX_BODY_DEPTH`] are replaced with `null`
/// first, so decoding never recurses without bound.
pub(crate) fn decode_lenient<T>(body: &Value) -> T
where
    T: DeserializeOwned + Default,
{
    let decoded = if exceeds_depth(body, MAX_BODY_DEPTH) {
        tracing::debug!(limit = MAX_BODY_DEPTH, "native body nests too deeply, truncating");
        T::deserialize(truncate_depth(body, MAX_BODY_DEPTH))
    } else {
        T::deserialize(body)
    };

    decoded.unwrap_or_else(|e| {
        tracing::debug!(error = %e, "native body has an unexpected shape, using defaults");
        T::default()
    })
}

/// Whether a non-empty array or object sits at `limit` or below
fn exceeds_depth(body: &Value, limit: usize) -> bool {
    let mut pending = vec![(body, 0)];

    while let Some((value, depth)) = pending.pop() {
        match value {
            Value::Array(items) if depth >= limit && !items.is_empty() => return true,
            Value::Object(map) if depth >= limit && !map.is_empty() => return true,
            Value::Array(items) => pending.extend(items.iter().map(|item| (item, depth + 1))),
            Value::Object(map) => pending.extend(map.values().map(|item| (item, depth + 1))),
            _ => {}
        }
    }

    false
}

/// Copy of `value` with every container at depth `remaining` replaced by `null`
fn truncate_depth(value: &Value, remaining: usize) -> Value {
    match value {
        Value::Array(_) | Value::Object(_) if remaining == 0 => Value::Null,
        Value::Array(items) => Value::Array(items.iter().map(|item| truncate_depth(item, remaining - 1)).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, item)| (key.clone(), truncate_depth(item, remaining - 1)))
                .collect(),
        ),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use serde_json::json;
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn kinds_parse_with_aliases() {
        assert_eq!(ProviderKind::from_str("anthropic").unwrap(), ProviderKind::Anthropic);
        assert_eq!(ProviderKind::from_str("Claude").unwrap(), ProviderKind::Anthropic);
        assert_eq!(ProviderKind::from_str("openai").unwrap(), ProviderKind::OpenRouter);
        assert_eq!(ProviderKind::from_str("GOOGLE").unwrap(), ProviderKind::Gemini);
        assert!(ProviderKind::from_str("bedrock").is_err());
    }

    #[test]
    fn kinds_display_canonical_names() {
        assert_eq!(ProviderKind::Anthropic.to_string(), "anthropic");
        assert_eq!(ProviderKind::OpenRouter.to_string(), "openrouter");
        assert_eq!(ProviderKind::Gemini.to_string(), "gemini");
    }

    #[test]
    fn registry_adapters_report_their_kind() {
        for kind in ProviderKind::iter() {
            let adapter = kind.adapter();
            assert_eq!(adapter.kind(), kind);
            assert_eq!(adapter.name(), kind.to_string());
        }
    }

    #[test]
    fn operations_display_snake_case() {
        assert_eq!(Operation::ParseRequest.to_string(), "parse_request");
        assert_eq!(Operation::BuildResponse.to_string(), "build_response");
    }

    #[test]
    fn non_object_bodies_decode_to_defaults() {
        let request: crate::protocol::anthropic::AnthropicRequest = decode_lenient(&json!("nope"));
        assert!(request.messages.is_empty());

        let response: crate::protocol::openrouter::OpenRouterResponse = decode_lenient(&Value::Null);
        assert!(response.choices.is_empty());
    }

    #[test]
    fn shallow_bodies_are_not_flagged() {
        let body = json!({"a": [{"b": []}]});
        assert!(!exceeds_depth(&body, 3));
        assert!(exceeds_depth(&body, 2));
        assert!(!exceeds_depth(&json!("scalar"), 0));
    }

    #[test]
    fn truncation_nulls_containers_past_the_limit() {
        let body = json!({"a": {"b": {"c": 1}}, "d": 2});
        assert_eq!(truncate_depth(&body, 2), json!({"a": {"b": null}, "d": 2}));
    }

    #[test]
    fn deep_response_bodies_decode() {
        let mut nested = json!("deep");
        for _ in 0..5000 {
            nested = Value::Array(vec![nested]);
        }
        let mut body = json!({"id": "gen-1", "choices": [{"index": 0, "message": {"role": "assistant"}}]});
        body["choices"][0]["message"]["content"] = nested;

        let response: crate::protocol::openrouter::OpenRouterResponse = decode_lenient(&body);
        assert_eq!(response.id.as_deref(), Some("gen-1"));
        assert_eq!(response.choices.len(), 1);

        // Dismantle iteratively to keep the drop shallow
        let mut pending = vec![body];
        while let Some(mut value) = pending.pop() {
            match &mut value {
                Value::Array(items) => pending.append(items),
                Value::Object(map) => pending.extend(std::mem::take(map).into_iter().map(|(_, v)| v)),
                _ => {}
            }
        }
    }

    #[test]
    fn utility_queries_are_available_on_every_adapter() {
        let content = Content::Parts(vec![
            crate::types::ContentPart::text("a"),
            crate::types::ContentPart::text("b"),
        ]);
        for kind in ProviderKind::iter() {
            assert_eq!(kind.adapter().extract_text(&content), "a\nb");
            assert!(!kind.adapter().has_images(&CanonicalRequest::default()));
        }
    }
}
