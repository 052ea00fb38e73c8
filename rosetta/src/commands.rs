//! Conversions behind each subcommand

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use rosetta_config::OverridesConfig;
use rosetta_llm::legacy::{LegacyOverrides, build_legacy_payload};
use rosetta_llm::{CanonicalRequest, ProviderKind};
use serde_json::{Value, json};

/// Read a JSON document from `path`, or stdin when absent
pub fn read_input(path: Option<&Path>) -> anyhow::Result<Value> {
    let raw = match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("failed to read input file {}", path.display()))?
        }
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("failed to read input from stdin")?;
            raw
        }
    };

    serde_json::from_str(&raw).context("input is not valid JSON")
}

/// Read a JSON array of pre-converted messages
pub fn read_messages(path: &Path) -> anyhow::Result<Vec<Value>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read messages file {}", path.display()))?;

    serde_json::from_str(&raw).with_context(|| format!("{} must hold a JSON array of messages", path.display()))
}

/// Force configured fields onto a parsed request
pub fn apply_overrides(request: &mut CanonicalRequest, overrides: &OverridesConfig) {
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

/// Parse a request with `from` and build it with `to`
pub fn convert_request(
    body: &Value,
    from: ProviderKind,
    to: ProviderKind,
    overrides: &OverridesConfig,
) -> anyhow::Result<Value> {
    let mut request = from.adapter().parse_request(body)?;
    apply_overrides(&mut request, overrides);

    tracing::info!(%from, %to, messages = request.messages.len(), "converting request");

    Ok(to.adapter().build_request(&request)?)
}

/// Parse a response with `from` and build it with `to`
pub fn convert_response(
    body: &Value,
    from: ProviderKind,
    to: ProviderKind,
    fallback_model: Option<&str>,
) -> anyhow::Result<Value> {
    let mut response = from.adapter().parse_response(body)?;

    if response.model.is_empty()
        && let Some(model) = fallback_model
    {
        response.model = model.to_owned();
    }

    tracing::info!(%from, %to, choices = response.choices.len(), "converting response");

    Ok(to.adapter().build_response(&response)?)
}

/// Canonical summary of a request
pub fn inspect(body: &Value, from: ProviderKind) -> anyhow::Result<Value> {
    let adapter = from.adapter();
    let request = adapter.parse_request(body)?;

    let messages: Vec<Value> = request
        .messages
        .iter()
        .map(|msg| json!({"role": msg.role.as_str(), "text": adapter.extract_text(&msg.content)}))
        .collect();

    Ok(json!({
        "provider": request.provider,
        "model": request.model,
        "messages": messages,
        "has_images": adapter.has_images(&request),
        "tool_count": request.tools.as_ref().map_or(0, Vec::len),
    }))
}

/// Legacy payload build with merged overrides
pub fn legacy_payload(body: &Value, overrides: &OverridesConfig, messages: Option<Vec<Value>>) -> anyhow::Result<Value> {
    let overrides = LegacyOverrides {
        messages,
        temperature: overrides.temperature,
        max_tokens: overrides.max_tokens,
        stream: overrides.stream,
        model: overrides.model.clone(),
    };

    Ok(build_legacy_payload(body, Some(&overrides))?)
}
