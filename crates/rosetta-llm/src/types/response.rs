use serde::{Deserialize, Serialize};

use super::message::Message;

/// Reason the model stopped generating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Natural end of generation
    Stop,
    /// Hit the `max_tokens` limit
    Length,
    /// Model decided to call a tool
    ToolCalls,
    /// Content was filtered by safety systems
    ContentFilter,
    /// Generation failed
    Error,
}

impl FinishReason {
    /// Parse a finish reason already in the canonical vocabulary
    ///
    /// Values outside the vocabulary have no canonical equivalent and
    /// yield `None`; vendor reasons such as `function_call` are dropped.
    pub fn from_canonical(reason: &str) -> Option<Self> {
        match reason {
            "stop" => Some(Self::Stop),
            "length" => Some(Self::Length),
            "tool_calls" => Some(Self::ToolCalls),
            "content_filter" => Some(Self::ContentFilter),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

/// Token usage statistics
///
/// `total_tokens` is whatever the source supplied; it is not recomputed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Tokens consumed by the prompt
    pub input_tokens: u64,
    /// Tokens generated in the completion
    pub output_tokens: u64,
    /// Total tokens as reported by the source
    pub total_tokens: u64,
}

/// A single completion choice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    /// Index of this choice
    #[serde(default)]
    pub index: u32,
    /// Generated message
    pub message: Message,
    /// Why generation stopped
    #[serde(default)]
    pub finish_reason: Option<FinishReason>,
}

/// Error reported alongside a response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseError {
    /// Machine-readable code
    pub code: String,
    /// Human-readable description
    pub message: String,
}

/// Vendor-neutral completion response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanonicalResponse {
    /// Response identifier
    #[serde(default)]
    pub id: String,
    /// Creation time as an epoch timestamp
    #[serde(default)]
    pub created: u64,
    /// Model used for generation, empty when the source omitted it
    #[serde(default)]
    pub model: String,
    /// Generated choices
    #[serde(default)]
    pub choices: Vec<Choice>,
    /// Token usage statistics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
    /// Error details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ResponseError>,
}
