//! Anthropic Messages API wire format types

use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnError, VecSkipError, serde_as};

use crate::types::Stop;

// -- Request types --

/// Anthropic messages API request
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnthropicRequest {
    /// Model identifier
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Maximum tokens to generate
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// System prompt (top-level, not in messages)
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<AnthropicContent>,
    /// Conversation messages
    #[serde_as(deserialize_as = "DefaultOnError<VecSkipError<_>>")]
    #[serde(default)]
    pub messages: Vec<AnthropicMessage>,
    /// Sampling temperature
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Nucleus sampling threshold
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    /// Top-k sampling, accepted but not carried into the canonical form
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    /// Stop sequences, a single string or a list
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_sequences: Option<Stop>,
    /// Whether to stream the response
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    /// Tool definitions
    #[serde_as(deserialize_as = "DefaultOnError<Option<VecSkipError<_>>>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<AnthropicTool>>,
    /// Tool choice configuration
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<AnthropicToolChoice>,
}

/// Anthropic message
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnthropicMessage {
    /// Role ("user" or "assistant")
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Content blocks
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<AnthropicContent>,
}

/// Anthropic content can be a string or array of content blocks
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnthropicContent {
    /// Plain text (shorthand)
    Text(String),
    /// Array of content items
    Blocks(Vec<AnthropicContentItem>),
}

/// Element of a content array
///
/// Clients occasionally send bare strings in place of text blocks; anything
/// else that is not an object lands in `Other`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnthropicContentItem {
    /// Bare string shorthand for a text block
    Text(String),
    /// Typed content block
    Block(AnthropicContentBlock),
    /// Unrecognized JSON value
    Other(serde_json::Value),
}

/// Content block in an Anthropic message
///
/// Kept flat rather than as a tagged enum so that blocks with an unknown or
/// missing `type` still decode.
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnthropicContentBlock {
    /// Block type ("text", "image", "tool_use", "tool_result")
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub block_type: Option<String>,
    /// Text of a text block
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Image source
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<AnthropicImageSource>,
    /// Tool use identifier
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Tool name
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Tool input as JSON
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<serde_json::Value>,
    /// Tool use ID a result responds to
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_use_id: Option<String>,
    /// Nested result content, left undecoded until it is converted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<serde_json::Value>,
    /// Whether the tool call errored
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

/// Anthropic image source
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnthropicImageSource {
    /// Source type (e.g. "base64", "url")
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,
    /// Media type (e.g. "image/png")
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    /// Image data (base64 encoded)
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

/// Anthropic tool definition
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnthropicTool {
    /// Tool name
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub name: String,
    /// Human-readable description
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON Schema for input parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_schema: Option<serde_json::Value>,
}

/// Anthropic tool choice
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnthropicToolChoice {
    /// Choice type: "auto", "any", or "tool"
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub choice_type: Option<String>,
    /// Specific tool name (when type is "tool")
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

// -- Response types --

/// Anthropic messages API response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnthropicResponse {
    /// Response identifier
    pub id: String,
    /// Object type (always "message")
    #[serde(rename = "type")]
    pub response_type: String,
    /// Role (always "assistant")
    pub role: String,
    /// Model used
    pub model: String,
    /// Response content
    pub content: AnthropicResponseContent,
    /// Stop reason
    pub stop_reason: Option<String>,
    /// Stop sequence that triggered the stop
    pub stop_sequence: Option<String>,
    /// Token usage
    pub usage: AnthropicUsage,
}

/// Response content, plain text or a list of blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnthropicResponseContent {
    /// Plain text
    Text(String),
    /// Content blocks
    Blocks(Vec<AnthropicResponseBlock>),
}

/// Content block in an Anthropic response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnthropicResponseBlock {
    /// Text response
    Text {
        /// The text string
        text: String,
    },
    /// Tool use request
    ToolUse {
        /// Tool use identifier
        id: String,
        /// Tool name
        name: String,
        /// Tool input as JSON
        input: serde_json::Value,
    },
}

/// Anthropic token usage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnthropicUsage {
    /// Input tokens
    pub input_tokens: u64,
    /// Output tokens
    pub output_tokens: u64,
}
