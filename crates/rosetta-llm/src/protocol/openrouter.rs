//! `OpenRouter` / `OpenAI` chat completion wire format types

use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnError, VecSkipError, serde_as};

// -- Request types --

/// Chat completion request payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenRouterRequest {
    /// Model identifier
    pub model: String,
    /// Conversation messages
    pub messages: Vec<OpenRouterMessage>,
    /// Sampling temperature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Whether to stream the response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    /// Tool definitions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<OpenRouterTool>>,
    /// Tool choice configuration
    pub tool_choice: serde_json::Value,
}

/// Message within a request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenRouterMessage {
    /// Message role
    pub role: String,
    /// Content; serialized as `null` for tool-calling turns without text
    pub content: Option<OpenRouterContent>,
    /// Tool calls made by the assistant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<OpenRouterToolCall>>,
    /// Tool call ID this message responds to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

/// Content can be a string or array of content parts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OpenRouterContent {
    /// Plain text content
    Text(String),
    /// Array of content parts
    Parts(Vec<OpenRouterContentPart>),
}

/// Individual content part in a message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OpenRouterContentPart {
    /// Text content
    Text {
        /// The text string
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
    },
    /// Image content via URL
    ImageUrl {
        /// Image URL specification
        image_url: OpenRouterImageUrl,
    },
}

/// Image URL specification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenRouterImageUrl {
    /// Image URL or base64 data URI
    pub url: String,
    /// Detail level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Tool definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenRouterTool {
    /// Tool type (always "function")
    #[serde(rename = "type")]
    pub tool_type: String,
    /// Function specification
    pub function: OpenRouterFunction,
}

/// Function specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenRouterFunction {
    /// Function name
    pub name: String,
    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON Schema for parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
}

/// Tool call within an outgoing message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenRouterToolCall {
    /// Tool call identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Tool type (always "function")
    #[serde(rename = "type")]
    pub tool_type: String,
    /// Function call details
    pub function: OpenRouterFunctionCall,
}

/// Function call details within a tool call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenRouterFunctionCall {
    /// Function name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// JSON-encoded arguments
    pub arguments: String,
}

// -- Response types --

/// Chat completion response
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenRouterResponse {
    /// Response identifier
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub id: Option<String>,
    /// Creation timestamp
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub created: Option<u64>,
    /// Model used
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub model: Option<String>,
    /// Generated choices
    #[serde_as(deserialize_as = "DefaultOnError<VecSkipError<_>>")]
    #[serde(default)]
    pub choices: Vec<OpenRouterChoice>,
    /// Token usage
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<OpenRouterUsage>,
}

/// Choice within a response
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenRouterChoice {
    /// Choice index
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub index: Option<u32>,
    /// Generated message
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub message: Option<OpenRouterResponseMessage>,
    /// Why generation stopped
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Message within a response choice
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenRouterResponseMessage {
    /// Role (normally "assistant")
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub role: Option<String>,
    /// Text content
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub content: Option<String>,
    /// Tool calls
    #[serde_as(deserialize_as = "DefaultOnError<Option<VecSkipError<_>>>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<OpenRouterResponseToolCall>>,
}

/// Tool call within a response message
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenRouterResponseToolCall {
    /// Tool call identifier
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub id: Option<String>,
    /// Function call details
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub function: Option<OpenRouterResponseFunction>,
}

/// Function call within a response tool call
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenRouterResponseFunction {
    /// Function name
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub name: Option<String>,
    /// Arguments, normally a JSON-encoded string but sometimes an object
    #[serde(default)]
    pub arguments: Option<serde_json::Value>,
}

/// Token usage in a response
#[serde_as]
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct OpenRouterUsage {
    /// Prompt tokens
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub prompt_tokens: u64,
    /// Completion tokens
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub completion_tokens: u64,
    /// Total tokens
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub total_tokens: u64,
}
