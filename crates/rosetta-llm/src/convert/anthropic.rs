//! Conversion between canonical types and the Anthropic Messages wire format

use serde::Deserialize;

use crate::protocol::anthropic::{
    AnthropicContent, AnthropicContentBlock, AnthropicContentItem, AnthropicRequest, AnthropicResponse,
    AnthropicResponseBlock, AnthropicResponseContent, AnthropicTool, AnthropicToolChoice, AnthropicUsage,
};
use crate::provider::ProviderKind;
use crate::types::{
    CanonicalRequest, CanonicalResponse, Content, ContentPart, FinishReason, ImageSource, Message, Role,
    ToolChoice, ToolChoiceMode, ToolDefinition,
};

/// Text substituted for images that are not inline base64 data
pub const IMAGE_PLACEHOLDER: &str = "[Image]";

/// Tool-use id emitted when the canonical part has none
pub const UNKNOWN_CALL_ID: &str = "call_unknown";

/// Tool name emitted when the canonical part has none
pub const UNKNOWN_TOOL_NAME: &str = "unknown";

/// Nesting depth past which nested tool-result content is dropped
const MAX_CONTENT_DEPTH: usize = 32;

// -- Inbound: Anthropic request -> canonical --

impl From<AnthropicRequest> for CanonicalRequest {
    fn from(req: AnthropicRequest) -> Self {
        let mut messages = Vec::with_capacity(req.messages.len() + 1);

        // System prompt is top-level in Anthropic; it becomes the leading message
        if let Some(system) = req.system
            && !matches!(&system, AnthropicContent::Text(text) if text.is_empty())
        {
            messages.push(Message {
                role: Role::System,
                content: content_to_canonical(system, 0),
                name: None,
            });
        }

        for msg in req.messages {
            messages.push(Message {
                role: msg.role.as_deref().map_or(Role::User, Role::from_native),
                content: msg
                    .content
                    .map_or_else(Content::default, |content| content_to_canonical(content, 0)),
                name: None,
            });
        }

        Self {
            provider: ProviderKind::Anthropic.to_string(),
            model: req.model,
            messages,
            tools: req.tools.map(|tools| tools.into_iter().map(Into::into).collect()),
            tool_choice: tool_choice_to_canonical(req.tool_choice.as_ref()),
            temperature: req.temperature,
            max_tokens: req.max_tokens,
            top_p: req.top_p,
            stop: req.stop_sequences,
            stream: req.stream,
            user_id: None,
        }
    }
}

impl From<AnthropicTool> for ToolDefinition {
    fn from(tool: AnthropicTool) -> Self {
        Self {
            name: tool.name,
            description: tool.description,
            parameters: tool.input_schema,
        }
    }
}

/// Map Anthropic tool choice; anything unrecognized means "auto"
fn tool_choice_to_canonical(choice: Option<&AnthropicToolChoice>) -> ToolChoice {
    let Some(choice) = choice else {
        return ToolChoice::default();
    };

    match (choice.choice_type.as_deref(), choice.name.as_deref()) {
        (Some("any"), _) => ToolChoice::Mode(ToolChoiceMode::Required),
        (Some("tool"), Some(name)) if !name.is_empty() => ToolChoice::function(name),
        _ => ToolChoice::default(),
    }
}

/// Convert message, system or nested tool-result content
fn content_to_canonical(content: AnthropicContent, depth: usize) -> Content {
    match content {
        AnthropicContent::Text(text) => Content::Text(text),
        AnthropicContent::Blocks(items) => Content::Parts(
            items
                .into_iter()
                .map(|item| item_to_canonical(item, depth))
                .collect(),
        ),
    }
}

/// Convert a single content item to a canonical part
fn item_to_canonical(item: AnthropicContentItem, depth: usize) -> ContentPart {
    match item {
        AnthropicContentItem::Text(text) => ContentPart::text(text),
        AnthropicContentItem::Block(block) => block_to_canonical(block, depth),
        AnthropicContentItem::Other(_) => ContentPart::text(""),
    }
}

fn block_to_canonical(block: AnthropicContentBlock, depth: usize) -> ContentPart {
    match block.block_type.as_deref() {
        Some("text") => ContentPart::Text { text: block.text },
        Some("image") => match block.source {
            Some(source) if source.source_type.as_deref() == Some("base64") => ContentPart::Image {
                image_url: None,
                source: Some(ImageSource::base64(
                    source.media_type.unwrap_or_default(),
                    source.data.unwrap_or_default(),
                )),
            },
            _ => ContentPart::text(IMAGE_PLACEHOLDER),
        },
        Some("tool_use") => ContentPart::ToolUse {
            id: block.id,
            name: block.name,
            input: block.input,
        },
        Some("tool_result") => {
            // Each level is decoded only once the cap admits it
            let content = block
                .content
                .filter(|_| depth < MAX_CONTENT_DEPTH)
                .and_then(|nested| AnthropicContent::deserialize(nested).ok())
                .map_or_else(Content::default, |nested| content_to_canonical(nested, depth + 1));

            ContentPart::ToolResult {
                tool_use_id: block.tool_use_id,
                content: Some(content),
                is_error: block.is_error,
                name: None,
            }
        }
        _ => ContentPart::text(""),
    }
}

// -- Outbound: canonical response -> Anthropic response --

impl From<&CanonicalResponse> for AnthropicResponse {
    fn from(resp: &CanonicalResponse) -> Self {
        // Only the first choice is representable
        let choice = resp.choices.first();

        let content = choice.map_or_else(
            || AnthropicResponseContent::Text(String::new()),
            |c| content_to_anthropic(&c.message.content),
        );

        let stop_reason = choice
            .and_then(|c| c.finish_reason)
            .and_then(stop_reason_for)
            .map(str::to_owned);

        let usage = resp.usage.unwrap_or_default();

        Self {
            id: resp.id.clone(),
            response_type: "message".to_owned(),
            role: "assistant".to_owned(),
            model: resp.model.clone(),
            content,
            stop_reason,
            // The canonical model has no stop-sequence field
            stop_sequence: None,
            usage: AnthropicUsage {
                input_tokens: usage.input_tokens,
                output_tokens: usage.output_tokens,
            },
        }
    }
}

/// Convert canonical content to response content
fn content_to_anthropic(content: &Content) -> AnthropicResponseContent {
    match content {
        Content::Text(text) => AnthropicResponseContent::Text(text.clone()),
        Content::Parts(parts) => AnthropicResponseContent::Blocks(parts.iter().map(part_to_anthropic).collect()),
    }
}

/// Convert a canonical part to a response block; only text and tool use survive
fn part_to_anthropic(part: &ContentPart) -> AnthropicResponseBlock {
    match part {
        ContentPart::Text { text } => AnthropicResponseBlock::Text {
            text: text.clone().unwrap_or_default(),
        },
        ContentPart::ToolUse { id, name, input } => AnthropicResponseBlock::ToolUse {
            id: id.clone().unwrap_or_else(|| UNKNOWN_CALL_ID.to_owned()),
            name: name.clone().unwrap_or_else(|| UNKNOWN_TOOL_NAME.to_owned()),
            input: input
                .clone()
                .filter(|v| !v.is_null())
                .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new())),
        },
        ContentPart::Image { .. } | ContentPart::ToolResult { .. } => AnthropicResponseBlock::Text { text: String::new() },
    }
}

/// Anthropic stop reason for a canonical finish reason
pub const fn stop_reason_for(reason: FinishReason) -> Option<&'static str> {
    match reason {
        FinishReason::Stop => Some("end_turn"),
        FinishReason::Length => Some("max_tokens"),
        FinishReason::ToolCalls => Some("tool_use"),
        FinishReason::ContentFilter | FinishReason::Error => None,
    }
}

/// Whether a JSON value looks like an Anthropic message
pub fn is_anthropic_message(value: &serde_json::Value) -> bool {
    value.get("role").is_some_and(serde_json::Value::is_string)
        && value
            .get("content")
            .is_some_and(|content| content.is_string() || content.is_array())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::types::{Choice, Stop, Usage};

    fn parse(body: serde_json::Value) -> CanonicalRequest {
        let request: AnthropicRequest = serde_json::from_value(body).unwrap();
        request.into()
    }

    fn response_with(content: Content, finish_reason: Option<FinishReason>) -> CanonicalResponse {
        CanonicalResponse {
            id: "resp_1".to_owned(),
            created: 0,
            model: "m".to_owned(),
            choices: vec![Choice {
                index: 0,
                message: Message {
                    role: Role::Assistant,
                    content,
                    name: None,
                },
                finish_reason,
            }],
            usage: None,
            error: None,
        }
    }

    #[test]
    fn system_string_becomes_leading_message() {
        let req = parse(json!({
            "model": "claude-3",
            "max_tokens": 100,
            "system": "be terse",
            "messages": [{"role": "user", "content": "hi"}]
        }));

        assert_eq!(req.provider, "anthropic");
        assert_eq!(req.messages.len(), 2);
        assert_eq!(req.messages[0], Message::text(Role::System, "be terse"));
        assert_eq!(req.messages[1], Message::text(Role::User, "hi"));
    }

    #[test]
    fn system_blocks_are_converted_element_wise() {
        let req = parse(json!({
            "system": [{"type": "text", "text": "a"}, {"type": "text", "text": "b"}],
            "messages": []
        }));

        assert_eq!(
            req.messages[0],
            Message::parts(Role::System, vec![ContentPart::text("a"), ContentPart::text("b")])
        );
    }

    #[test]
    fn empty_system_string_is_skipped() {
        let req = parse(json!({"system": "", "messages": [{"role": "user", "content": "hi"}]}));
        assert_eq!(req.messages.len(), 1);
    }

    #[test]
    fn unknown_role_passes_through() {
        let req = parse(json!({"messages": [{"role": "critic", "content": "meh"}]}));
        assert_eq!(req.messages[0].role, Role::Other("critic".to_owned()));
    }

    #[test]
    fn tools_rename_input_schema_to_parameters() {
        let req = parse(json!({
            "messages": [],
            "tools": [{"name": "lookup", "description": "find", "input_schema": {"type": "object"}}]
        }));

        assert_eq!(
            req.tools.unwrap(),
            vec![ToolDefinition {
                name: "lookup".to_owned(),
                description: Some("find".to_owned()),
                parameters: Some(json!({"type": "object"})),
            }]
        );
    }

    #[test]
    fn tool_choice_mapping() {
        let tool = parse(json!({"messages": [], "tool_choice": {"type": "tool", "name": "foo"}}));
        assert_eq!(tool.tool_choice, ToolChoice::function("foo"));

        let any = parse(json!({"messages": [], "tool_choice": {"type": "any"}}));
        assert_eq!(any.tool_choice, ToolChoice::Mode(ToolChoiceMode::Required));

        let auto = parse(json!({"messages": [], "tool_choice": {"type": "auto"}}));
        assert_eq!(auto.tool_choice, ToolChoice::Mode(ToolChoiceMode::Auto));

        let absent = parse(json!({"messages": []}));
        assert_eq!(absent.tool_choice, ToolChoice::Mode(ToolChoiceMode::Auto));

        let nameless = parse(json!({"messages": [], "tool_choice": {"type": "tool"}}));
        assert_eq!(nameless.tool_choice, ToolChoice::Mode(ToolChoiceMode::Auto));
    }

    #[test]
    fn scalar_fields_are_remapped() {
        let req = parse(json!({
            "model": "claude-3",
            "max_tokens": 256,
            "temperature": 0.5,
            "top_p": 0.9,
            "stop_sequences": ["END"],
            "stream": true,
            "messages": []
        }));

        assert_eq!(req.model.as_deref(), Some("claude-3"));
        assert_eq!(req.max_tokens, Some(256));
        assert_eq!(req.temperature, Some(0.5));
        assert_eq!(req.top_p, Some(0.9));
        assert_eq!(req.stop, Some(Stop::Many(vec!["END".to_owned()])));
        assert_eq!(req.stream, Some(true));
    }

    #[test]
    fn non_base64_image_degrades_to_placeholder() {
        let req = parse(json!({"messages": [{"role": "user", "content": [
            {"type": "image", "source": {"type": "url", "url": "https://x/y.png"}},
            {"type": "image", "source": {"type": "base64", "media_type": "image/png", "data": "AAAA"}}
        ]}]}));

        assert_eq!(
            req.messages[0].content,
            Content::Parts(vec![
                ContentPart::text(IMAGE_PLACEHOLDER),
                ContentPart::Image {
                    image_url: None,
                    source: Some(ImageSource::base64("image/png", "AAAA")),
                },
            ])
        );
    }

    #[test]
    fn nested_tool_results_convert_recursively() {
        let req = parse(json!({"messages": [{"role": "user", "content": [{
            "type": "tool_result",
            "tool_use_id": "toolu_1",
            "is_error": true,
            "content": [
                {"type": "text", "text": "outer"},
                {"type": "tool_result", "tool_use_id": "toolu_2", "content": "inner"}
            ]
        }]}]}));

        let expected = ContentPart::ToolResult {
            tool_use_id: Some("toolu_1".to_owned()),
            content: Some(Content::Parts(vec![
                ContentPart::text("outer"),
                ContentPart::ToolResult {
                    tool_use_id: Some("toolu_2".to_owned()),
                    content: Some(Content::Text("inner".to_owned())),
                    is_error: None,
                    name: None,
                },
            ])),
            is_error: Some(true),
            name: None,
        };
        assert_eq!(req.messages[0].content, Content::Parts(vec![expected]));
    }

    /// Tear a value down without recursing through its nesting
    fn drop_flat(value: serde_json::Value) {
        let mut pending = vec![value];
        while let Some(mut value) = pending.pop() {
            match &mut value {
                serde_json::Value::Array(items) => pending.append(items),
                serde_json::Value::Object(map) => pending.extend(std::mem::take(map).into_iter().map(|(_, v)| v)),
                _ => {}
            }
        }
    }

    #[test]
    fn deeply_nested_tool_results_are_truncated() {
        let mut content = json!("leaf");
        for i in 0..2000 {
            let mut block = serde_json::Map::new();
            block.insert("type".to_owned(), json!("tool_result"));
            block.insert("tool_use_id".to_owned(), json!(format!("t{i}")));
            block.insert("content".to_owned(), content);
            content = serde_json::Value::Array(vec![serde_json::Value::Object(block)]);
        }
        let mut body = json!({"messages": [{"role": "user"}]});
        body["messages"][0]["content"] = content;

        let req = ProviderKind::Anthropic.adapter().parse_request(&body).unwrap();
        drop_flat(body);

        let mut depth = 0;
        let mut current = &req.messages[0].content;
        while let Content::Parts(parts) = current {
            let Some(ContentPart::ToolResult { content: Some(inner), .. }) = parts.first() else {
                break;
            };
            depth += 1;
            current = inner;
        }
        assert_eq!(depth, MAX_CONTENT_DEPTH + 1);
        assert_eq!(current, &Content::default());
    }

    #[test]
    fn single_stop_sequence_is_kept() {
        let req = parse(json!({"messages": [], "stop_sequences": "END"}));
        assert_eq!(req.stop, Some(Stop::One("END".to_owned())));

        let garbled = parse(json!({"messages": [], "stop_sequences": 7}));
        assert_eq!(garbled.stop, None);
    }

    #[test]
    fn malformed_fields_degrade_instead_of_failing() {
        let req = parse(json!({
            "model": 42,
            "max_tokens": "lots",
            "messages": [
                {"role": "user", "content": [17, "bare", {"type": "mystery"}]},
                "not a message"
            ],
            "tool_choice": "any"
        }));

        assert_eq!(req.model, None);
        assert_eq!(req.max_tokens, None);
        assert_eq!(req.messages.len(), 1);
        assert_eq!(
            req.messages[0].content,
            Content::Parts(vec![ContentPart::text(""), ContentPart::text("bare"), ContentPart::text("")])
        );
        assert_eq!(req.tool_choice, ToolChoice::Mode(ToolChoiceMode::Auto));
    }

    #[test]
    fn tool_use_defaults_are_substituted() {
        let resp = response_with(
            Content::Parts(vec![ContentPart::ToolUse {
                id: None,
                name: None,
                input: None,
            }]),
            Some(FinishReason::ToolCalls),
        );

        let out = serde_json::to_value(AnthropicResponse::from(&resp)).unwrap();
        assert_eq!(
            out["content"],
            json!([{"type": "tool_use", "id": "call_unknown", "name": "unknown", "input": {}}])
        );
        assert_eq!(out["stop_reason"], "tool_use");
    }

    #[test]
    fn build_response_shape() {
        let mut resp = response_with(Content::Text("hello".to_owned()), Some(FinishReason::Stop));
        resp.usage = Some(Usage {
            input_tokens: 3,
            output_tokens: 5,
            total_tokens: 99,
        });

        let out = serde_json::to_value(AnthropicResponse::from(&resp)).unwrap();
        assert_eq!(
            out,
            json!({
                "id": "resp_1",
                "type": "message",
                "role": "assistant",
                "model": "m",
                "content": "hello",
                "stop_reason": "end_turn",
                "stop_sequence": null,
                "usage": {"input_tokens": 3, "output_tokens": 5}
            })
        );
    }

    #[test]
    fn unsupported_parts_degrade_to_empty_text() {
        let resp = response_with(
            Content::Parts(vec![
                ContentPart::text("a"),
                ContentPart::Image {
                    image_url: None,
                    source: Some(ImageSource::base64("image/png", "AAAA")),
                },
                ContentPart::Text { text: None },
            ]),
            None,
        );

        let out = AnthropicResponse::from(&resp);
        assert_eq!(
            out.content,
            AnthropicResponseContent::Blocks(vec![
                AnthropicResponseBlock::Text { text: "a".to_owned() },
                AnthropicResponseBlock::Text { text: String::new() },
                AnthropicResponseBlock::Text { text: String::new() },
            ])
        );
    }

    #[test]
    fn finish_reason_lookup() {
        let cases = [
            (Some(FinishReason::Stop), Some("end_turn")),
            (Some(FinishReason::Length), Some("max_tokens")),
            (Some(FinishReason::ToolCalls), Some("tool_use")),
            (Some(FinishReason::ContentFilter), None),
            (Some(FinishReason::Error), None),
            (None, None),
        ];

        for (finish_reason, expected) in cases {
            let resp = response_with(Content::Text(String::new()), finish_reason);
            let out = AnthropicResponse::from(&resp);
            assert_eq!(out.stop_reason.as_deref(), expected, "{finish_reason:?}");
        }
    }

    #[test]
    fn missing_usage_defaults_to_zero() {
        let resp = response_with(Content::Text(String::new()), None);
        assert_eq!(AnthropicResponse::from(&resp).usage, AnthropicUsage::default());
    }

    #[test]
    fn detects_anthropic_messages() {
        assert!(is_anthropic_message(&json!({"role": "user", "content": "hi"})));
        assert!(is_anthropic_message(&json!({"role": "assistant", "content": []})));
        assert!(!is_anthropic_message(&json!({"role": "user"})));
        assert!(!is_anthropic_message(&json!({"role": 1, "content": "hi"})));
        assert!(!is_anthropic_message(&json!("hi")));
    }
}
