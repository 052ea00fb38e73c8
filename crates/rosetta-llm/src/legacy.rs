//! Legacy Anthropic-in, `OpenRouter`-out composition
//!
//! These helpers predate the adapter trait and pair the Anthropic and
//! `OpenRouter` adapters for the common proxy flow: accept an Anthropic
//! request, call an `OpenRouter`-compatible upstream, answer in Anthropic form.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AdapterError;
use crate::protocol::openrouter::OpenRouterResponse;
use crate::provider::{anthropic, decode_lenient, openrouter};

/// Field overrides applied between parsing and building
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyOverrides {
    /// Pre-converted native messages that replace the built ones verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<Value>>,
    /// Sampling temperature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Whether to stream the response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    /// Model identifier; ignored when empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Build an `OpenRouter` payload from an Anthropic request body
///
/// When `overrides.messages` is set, the message list of the built payload
/// is replaced wholesale with those raw values.
pub fn build_legacy_payload(body: &Value, overrides: Option<&LegacyOverrides>) -> Result<Value, AdapterError> {
    let mut request = anthropic::parse_request(decode_lenient(body));

    if let Some(overrides) = overrides {
        if let Some(model) = overrides.model.as_ref().filter(|m| !m.is_empty()) {
            request.model = Some(model.clone());
        }
        if overrides.temperature.is_some() {
            request.temperature = overrides.temperature;
        }
        if overrides.max_tokens.is_some() {
            request.max_tokens = overrides.max_tokens;
        }
        if overrides.stream.is_some() {
            request.stream = overrides.stream;
        }
    }

    let mut payload = serde_json::to_value(openrouter::build_request(&request))?;

    if let Some(messages) = overrides.and_then(|o| o.messages.as_ref())
        && let Some(object) = payload.as_object_mut()
    {
        tracing::debug!(count = messages.len(), "splicing pre-converted messages into payload");
        object.insert("messages".to_owned(), Value::Array(messages.clone()));
    }

    Ok(payload)
}

/// Convert an `OpenRouter` response body into an Anthropic response
///
/// `model_used` fills in the model when the upstream omitted it.
pub fn convert_to_anthropic_response(response: &Value, model_used: Option<&str>) -> Result<Value, AdapterError> {
    let mut canonical = openrouter::parse_response(decode_lenient::<OpenRouterResponse>(response));

    if canonical.model.is_empty()
        && let Some(model) = model_used.filter(|m| !m.is_empty())
    {
        canonical.model = model.to_owned();
    }

    Ok(serde_json::to_value(anthropic::build_response(&canonical))?)
}

/// `OpenAI`-named alias of [`build_legacy_payload`] without overrides
pub fn build_openai_payload(body: &Value) -> Result<Value, AdapterError> {
    build_legacy_payload(body, None)
}

/// `OpenAI`-named alias of [`convert_to_anthropic_response`]
pub fn convert_openai_response(response: &Value, model_used: Option<&str>) -> Result<Value, AdapterError> {
    convert_to_anthropic_response(response, model_used)
}

/// Trimmed text of the first choice, or empty when it has none
pub fn extract_text_from_choices_response(response: &Value) -> String {
    response
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(Value::as_str)
        .map(|content| content.trim().to_owned())
        .unwrap_or_default()
}

/// The `tools` array of a request body, if it has one
pub fn body_tools(body: &Value) -> Option<&Vec<Value>> {
    body.get("tools").and_then(Value::as_array)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn anthropic_body() -> Value {
        json!({
            "model": "claude-3-5-sonnet",
            "max_tokens": 512,
            "system": "be terse",
            "messages": [{"role": "user", "content": "hello"}],
            "tool_choice": {"type": "any"}
        })
    }

    #[test]
    fn builds_payload_without_overrides() {
        let payload = build_legacy_payload(&anthropic_body(), None).unwrap();

        assert_eq!(
            payload,
            json!({
                "model": "claude-3-5-sonnet",
                "messages": [
                    {"role": "system", "content": "be terse"},
                    {"role": "user", "content": "hello"}
                ],
                "max_tokens": 512,
                "tool_choice": "required"
            })
        );
    }

    #[test]
    fn scalar_overrides_replace_fields() {
        let overrides = LegacyOverrides {
            model: Some("openai/gpt-4o".to_owned()),
            temperature: Some(0.0),
            max_tokens: Some(64),
            stream: Some(false),
            messages: None,
        };

        let payload = build_legacy_payload(&anthropic_body(), Some(&overrides)).unwrap();
        assert_eq!(payload["model"], "openai/gpt-4o");
        assert_eq!(payload["temperature"], 0.0);
        assert_eq!(payload["max_tokens"], 64);
        assert_eq!(payload["stream"], false);
    }

    #[test]
    fn empty_model_override_is_ignored() {
        let overrides = LegacyOverrides {
            model: Some(String::new()),
            ..LegacyOverrides::default()
        };

        let payload = build_legacy_payload(&anthropic_body(), Some(&overrides)).unwrap();
        assert_eq!(payload["model"], "claude-3-5-sonnet");
    }

    #[test]
    fn message_override_is_spliced_verbatim() {
        let raw = vec![json!({"role": "user", "content": [{"type": "text", "text": "raw"}], "extra": 1})];
        let overrides = LegacyOverrides {
            messages: Some(raw.clone()),
            ..LegacyOverrides::default()
        };

        let payload = build_legacy_payload(&anthropic_body(), Some(&overrides)).unwrap();
        assert_eq!(payload["messages"], Value::Array(raw));
        assert_eq!(payload["tool_choice"], "required");
    }

    #[test]
    fn overrides_use_camel_case_keys() {
        let overrides: LegacyOverrides = serde_json::from_value(json!({"maxTokens": 10, "stream": true})).unwrap();
        assert_eq!(overrides.max_tokens, Some(10));
        assert_eq!(overrides.stream, Some(true));
    }

    #[test]
    fn converts_response_and_fills_missing_model() {
        let upstream = json!({
            "id": "gen-1",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "hi"}, "finish_reason": "length"}],
            "usage": {"prompt_tokens": 2, "completion_tokens": 1, "total_tokens": 3}
        });

        let out = convert_to_anthropic_response(&upstream, Some("openai/gpt-4o")).unwrap();
        assert_eq!(
            out,
            json!({
                "id": "gen-1",
                "type": "message",
                "role": "assistant",
                "model": "openai/gpt-4o",
                "content": "hi",
                "stop_reason": "max_tokens",
                "stop_sequence": null,
                "usage": {"input_tokens": 2, "output_tokens": 1}
            })
        );
    }

    #[test]
    fn upstream_model_wins_over_fallback() {
        let upstream = json!({"model": "anthropic/claude-3", "choices": []});
        let out = convert_openai_response(&upstream, Some("fallback")).unwrap();
        assert_eq!(out["model"], "anthropic/claude-3");
    }

    #[test]
    fn openai_payload_alias_matches_legacy_payload() {
        let body = anthropic_body();
        assert_eq!(build_openai_payload(&body).unwrap(), build_legacy_payload(&body, None).unwrap());
    }

    #[test]
    fn extracts_trimmed_first_choice_text() {
        let response = json!({"choices": [{"message": {"content": "  answer \n"}}, {"message": {"content": "other"}}]});
        assert_eq!(extract_text_from_choices_response(&response), "answer");

        assert_eq!(extract_text_from_choices_response(&json!({"choices": []})), "");
        assert_eq!(
            extract_text_from_choices_response(&json!({"choices": [{"message": {"content": null}}]})),
            ""
        );
        assert_eq!(extract_text_from_choices_response(&json!("text")), "");
    }

    #[test]
    fn body_tools_requires_an_array() {
        let body = json!({"tools": [{"name": "lookup"}]});
        assert_eq!(body_tools(&body).map(Vec::len), Some(1));
        assert_eq!(body_tools(&json!({"tools": {"name": "lookup"}})), None);
        assert_eq!(body_tools(&json!([1, 2])), None);
    }
}
