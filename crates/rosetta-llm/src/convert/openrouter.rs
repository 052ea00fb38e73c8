//! Conversion between canonical types and the `OpenRouter` / `OpenAI` chat format

use serde_json::{Value, json};

use crate::protocol::openrouter::{
    OpenRouterChoice, OpenRouterContent, OpenRouterContentPart, OpenRouterFunction, OpenRouterFunctionCall,
    OpenRouterImageUrl, OpenRouterMessage, OpenRouterRequest, OpenRouterResponse, OpenRouterResponseToolCall,
    OpenRouterTool, OpenRouterToolCall,
};
use crate::types::{
    CanonicalRequest, CanonicalResponse, Choice, Content, ContentPart, FinishReason, Message, Role, ToolChoice,
    ToolChoiceMode, ToolDefinition, Usage,
};

/// Model used when the canonical request names none
pub const DEFAULT_MODEL: &str = "openai/gpt-3.5-turbo";

// -- Outbound: canonical request -> OpenRouter request --

impl From<&CanonicalRequest> for OpenRouterRequest {
    fn from(req: &CanonicalRequest) -> Self {
        Self {
            model: req.model.clone().unwrap_or_else(|| DEFAULT_MODEL.to_owned()),
            messages: req.messages.iter().flat_map(message_to_openrouter).collect(),
            temperature: req.temperature,
            max_tokens: req.max_tokens,
            stream: req.stream,
            tools: req
                .tools
                .as_ref()
                .map(|tools| tools.iter().map(Into::into).collect()),
            tool_choice: tool_choice_to_value(&req.tool_choice),
        }
    }
}

impl From<&ToolDefinition> for OpenRouterTool {
    fn from(tool: &ToolDefinition) -> Self {
        Self {
            tool_type: "function".to_owned(),
            function: OpenRouterFunction {
                name: tool.name.clone(),
                description: tool.description.clone(),
                parameters: tool.parameters.clone(),
            },
        }
    }
}

/// Native form of a canonical tool choice
pub fn tool_choice_to_value(choice: &ToolChoice) -> Value {
    match choice {
        ToolChoice::Mode(ToolChoiceMode::None) => json!("none"),
        ToolChoice::Mode(ToolChoiceMode::Auto) => json!("auto"),
        ToolChoice::Mode(ToolChoiceMode::Required) => json!("required"),
        ToolChoice::Function(f) => json!({
            "type": f.tool_type,
            "function": {"name": f.function.name},
        }),
    }
}

/// Convert one canonical message into zero or more native messages
///
/// Shapes are tried in order: plain text, tool calls, tool results, then a
/// standard part list.
fn message_to_openrouter(msg: &Message) -> Vec<OpenRouterMessage> {
    let role = msg.role.as_str().to_owned();

    let parts = match &msg.content {
        Content::Text(text) => {
            return vec![OpenRouterMessage {
                role,
                content: Some(OpenRouterContent::Text(text.clone())),
                tool_calls: None,
                tool_call_id: None,
            }];
        }
        Content::Parts(parts) => parts,
    };

    if parts.iter().any(ContentPart::is_tool_use) {
        return vec![tool_calls_message(role, parts)];
    }

    if parts.iter().any(ContentPart::is_tool_result) {
        return parts.iter().filter_map(tool_result_message).collect();
    }

    let standard: Vec<OpenRouterContentPart> = parts.iter().filter_map(standard_part).collect();
    if standard.is_empty() {
        return Vec::new();
    }

    vec![OpenRouterMessage {
        role,
        content: Some(OpenRouterContent::Parts(standard)),
        tool_calls: None,
        tool_call_id: None,
    }]
}

/// Assistant turn carrying tool calls and any co-occurring text
fn tool_calls_message(role: String, parts: &[ContentPart]) -> OpenRouterMessage {
    let tool_calls = parts
        .iter()
        .filter_map(|part| match part {
            ContentPart::ToolUse { id, name, input } => Some(OpenRouterToolCall {
                id: id.clone(),
                tool_type: "function".to_owned(),
                function: OpenRouterFunctionCall {
                    name: name.clone(),
                    arguments: encode_arguments(input.as_ref()),
                },
            }),
            _ => None,
        })
        .collect();

    let text = parts
        .iter()
        .filter_map(|part| match part {
            ContentPart::Text { text } => Some(text.as_deref().unwrap_or_default()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n");

    OpenRouterMessage {
        role,
        content: (!text.is_empty()).then_some(OpenRouterContent::Text(text)),
        tool_calls: Some(tool_calls),
        tool_call_id: None,
    }
}

/// JSON-encoded tool arguments; a missing input encodes as an empty object
fn encode_arguments(input: Option<&Value>) -> String {
    match input {
        Some(value) if !value.is_null() => value.to_string(),
        _ => "{}".to_owned(),
    }
}

/// One `tool` role message per tool result, content flattened to text
fn tool_result_message(part: &ContentPart) -> Option<OpenRouterMessage> {
    let ContentPart::ToolResult {
        tool_use_id, content, ..
    } = part
    else {
        return None;
    };

    let text = content.as_ref().map(Content::extract_text).unwrap_or_default();

    Some(OpenRouterMessage {
        role: Role::Tool.as_str().to_owned(),
        content: Some(OpenRouterContent::Text(text)),
        tool_calls: None,
        tool_call_id: tool_use_id.clone(),
    })
}

/// Native part for text and images; anything else is dropped
fn standard_part(part: &ContentPart) -> Option<OpenRouterContentPart> {
    match part {
        ContentPart::Text { text } => Some(OpenRouterContentPart::Text { text: text.clone() }),
        ContentPart::Image { source: Some(source), .. } if source.is_base64() => Some(OpenRouterContentPart::ImageUrl {
            image_url: OpenRouterImageUrl {
                url: format!("data:{};base64,{}", source.media_type, source.data),
                detail: None,
            },
        }),
        ContentPart::Image {
            image_url: Some(image_url),
            ..
        } => Some(OpenRouterContentPart::ImageUrl {
            image_url: OpenRouterImageUrl {
                url: image_url.url.clone(),
                detail: image_url.detail.clone(),
            },
        }),
        ContentPart::Image { .. } | ContentPart::ToolUse { .. } | ContentPart::ToolResult { .. } => None,
    }
}

// -- Inbound: OpenRouter response -> canonical --

impl From<OpenRouterResponse> for CanonicalResponse {
    fn from(resp: OpenRouterResponse) -> Self {
        Self {
            id: resp.id.unwrap_or_default(),
            created: resp.created.unwrap_or_default(),
            model: resp.model.unwrap_or_default(),
            choices: resp
                .choices
                .into_iter()
                .enumerate()
                .map(|(i, choice)| choice_to_canonical(i, choice))
                .collect(),
            usage: resp.usage.map(|usage| Usage {
                input_tokens: usage.prompt_tokens,
                output_tokens: usage.completion_tokens,
                total_tokens: usage.total_tokens,
            }),
            error: None,
        }
    }
}

fn choice_to_canonical(position: usize, choice: OpenRouterChoice) -> Choice {
    let msg = choice.message.unwrap_or_default();
    let text = msg.content.unwrap_or_default();

    // Any tool_calls array, even an empty one, upgrades content to parts
    let content = match msg.tool_calls {
        Some(calls) => {
            let mut parts = Vec::with_capacity(calls.len() + 1);
            if !text.trim().is_empty() {
                parts.push(ContentPart::text(text));
            }
            parts.extend(calls.into_iter().map(tool_call_to_canonical));
            Content::Parts(parts)
        }
        None => Content::Text(text),
    };

    Choice {
        index: choice
            .index
            .unwrap_or_else(|| u32::try_from(position).unwrap_or(u32::MAX)),
        message: Message {
            role: msg.role.as_deref().map_or(Role::Assistant, Role::from_native),
            content,
            name: None,
        },
        finish_reason: choice.finish_reason.as_deref().and_then(FinishReason::from_canonical),
    }
}

fn tool_call_to_canonical(call: OpenRouterResponseToolCall) -> ContentPart {
    let (name, arguments) = call
        .function
        .map(|f| (f.name, f.arguments))
        .unwrap_or_default();

    ContentPart::ToolUse {
        id: call.id,
        name,
        input: Some(decode_arguments(arguments)),
    }
}

/// Decode tool-call arguments, degrading to an empty object
///
/// Arguments normally arrive JSON-encoded in a string; some upstreams send
/// the object itself.
pub fn decode_arguments(arguments: Option<Value>) -> Value {
    match arguments {
        Some(Value::String(encoded)) => serde_json::from_str(&encoded).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "tool call arguments are not valid JSON, using empty object");
            Value::Object(serde_json::Map::new())
        }),
        Some(Value::Null) | None => Value::Object(serde_json::Map::new()),
        Some(other) => other,
    }
}
