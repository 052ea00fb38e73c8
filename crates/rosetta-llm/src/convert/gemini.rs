//! Conversion between canonical types and the Gemini `generateContent` format

use crate::entropy::ResponseEntropy;
use crate::protocol::gemini::{
    GeminiContent, GeminiFunctionCall, GeminiFunctionDeclaration, GeminiFunctionResponse, GeminiFunctionResult,
    GeminiGenerationConfig, GeminiPart, GeminiRequest, GeminiResponse, GeminiTool,
};
use crate::types::{
    CanonicalRequest, CanonicalResponse, Choice, Content, ContentPart, FinishReason, Message, Role, Stop, Usage,
};

/// Model used when the canonical request names none
pub const DEFAULT_MODEL: &str = "gemini-1.5-pro";

/// Function name used for responses whose originating call name is unknown
pub const UNKNOWN_FUNCTION_NAME: &str = "unknown_tool";

/// Model reported on parsed responses; Gemini does not echo it back
pub const RESPONSE_MODEL: &str = "gemini";

/// How content parts are mapped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PartMode {
    Normal,
    /// Non-text, non-call parts all become function responses
    FunctionResponse,
}

// -- Outbound: canonical request -> Gemini request --

impl From<&CanonicalRequest> for GeminiRequest {
    fn from(req: &CanonicalRequest) -> Self {
        let system_instruction = req
            .messages
            .iter()
            .find(|msg| msg.role == Role::System)
            .map(|msg| GeminiContent {
                role: Some("system".to_owned()),
                parts: content_to_parts(&msg.content, PartMode::Normal),
            });

        let contents = req
            .messages
            .iter()
            .filter(|msg| msg.role != Role::System)
            .map(message_to_content)
            .collect();

        let tools = req.tools.as_ref().filter(|tools| !tools.is_empty()).map(|tools| {
            vec![GeminiTool {
                function_declarations: tools
                    .iter()
                    .map(|tool| GeminiFunctionDeclaration {
                        name: tool.name.clone(),
                        description: tool.description.clone(),
                        parameters: tool.parameters.clone(),
                    })
                    .collect(),
            }]
        });

        Self {
            model: req
                .model
                .clone()
                .filter(|model| !model.is_empty())
                .unwrap_or_else(|| DEFAULT_MODEL.to_owned()),
            config: GeminiGenerationConfig {
                temperature: req.temperature,
                max_output_tokens: req.max_tokens,
                top_p: req.top_p,
                stop_sequences: req.stop.as_ref().and_then(Stop::to_sequences),
            },
            system_instruction,
            contents,
            tools,
        }
    }
}

fn message_to_content(msg: &Message) -> GeminiContent {
    let (role, mode) = match msg.role {
        Role::Assistant => ("model", PartMode::Normal),
        Role::Tool => ("function", PartMode::FunctionResponse),
        Role::System | Role::User | Role::Other(_) => ("user", PartMode::Normal),
    };

    GeminiContent {
        role: Some(role.to_owned()),
        parts: content_to_parts(&msg.content, mode),
    }
}

fn content_to_parts(content: &Content, mode: PartMode) -> Vec<GeminiPart> {
    match content {
        Content::Text(text) => vec![GeminiPart::text(Some(text.clone()))],
        Content::Parts(parts) => parts.iter().map(|part| part_to_gemini(part, mode)).collect(),
    }
}

fn part_to_gemini(part: &ContentPart, mode: PartMode) -> GeminiPart {
    match part {
        ContentPart::Text { text } => GeminiPart::text(text.clone()),
        ContentPart::ToolUse { name, input, .. } => GeminiPart {
            function_call: Some(GeminiFunctionCall {
                name: name.clone(),
                args: input.clone(),
            }),
            ..GeminiPart::default()
        },
        ContentPart::ToolResult { content, name, .. } => function_response(name.as_deref(), content.clone()),
        ContentPart::Image { .. } if mode == PartMode::FunctionResponse => function_response(None, None),
        ContentPart::Image { .. } => GeminiPart::text(Some(String::new())),
    }
}

/// Function-response part
///
/// The canonical tool result only carries the call id, so the name falls back
/// to [`UNKNOWN_FUNCTION_NAME`] unless the caller filled it in.
fn function_response(name: Option<&str>, result: Option<Content>) -> GeminiPart {
    let name = name
        .filter(|name| !name.is_empty())
        .unwrap_or(UNKNOWN_FUNCTION_NAME);

    GeminiPart {
        function_response: Some(GeminiFunctionResponse {
            name: name.to_owned(),
            response: GeminiFunctionResult { result },
        }),
        ..GeminiPart::default()
    }
}

// -- Inbound: Gemini response -> canonical --

/// Convert a Gemini response, synthesizing ids and timestamp from `entropy`
///
/// Only the first candidate is read. A response without candidates yields a
/// single empty assistant choice.
pub fn response_to_canonical(resp: GeminiResponse, entropy: &impl ResponseEntropy) -> CanonicalResponse {
    let candidate = resp.candidates.into_iter().next().unwrap_or_default();

    let mut finish_reason = match candidate.finish_reason.as_deref() {
        Some("MAX_TOKENS") => FinishReason::Length,
        _ => FinishReason::Stop,
    };

    let mut parts = Vec::new();
    for part in candidate.content.map(|c| c.parts).unwrap_or_default() {
        if let Some(text) = part.text
            && !text.is_empty()
        {
            parts.push(ContentPart::text(text));
        }
        if let Some(call) = part.function_call {
            finish_reason = FinishReason::ToolCalls;
            parts.push(ContentPart::ToolUse {
                id: Some(entropy.call_id()),
                name: call.name,
                input: call.args,
            });
        }
    }

    let usage = resp.usage_metadata.unwrap_or_default();

    CanonicalResponse {
        id: entropy.response_id(),
        created: entropy.now_millis(),
        model: RESPONSE_MODEL.to_owned(),
        choices: vec![Choice {
            index: 0,
            message: Message::parts(Role::Assistant, parts),
            finish_reason: Some(finish_reason),
        }],
        usage: Some(Usage {
            input_tokens: usage.prompt_token_count,
            output_tokens: usage.candidates_token_count,
            total_tokens: usage.total_token_count,
        }),
        error: None,
    }
}
