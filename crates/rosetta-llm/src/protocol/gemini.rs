//! Gemini `generateContent` wire format types

use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnError, VecSkipError, serde_as};

use crate::types::Content;

// -- Request types --

/// `generateContent` request payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    /// Model identifier
    pub model: String,
    /// Generation configuration
    pub config: GeminiGenerationConfig,
    /// System instruction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<GeminiContent>,
    /// Conversation contents
    pub contents: Vec<GeminiContent>,
    /// Tool definitions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<GeminiTool>>,
}

/// Content object containing role and parts
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeminiContent {
    /// Role ("user", "model", "function", "system")
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Content parts
    #[serde_as(deserialize_as = "DefaultOnError<VecSkipError<_>>")]
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

/// Part within a content object
///
/// A part is a bag of optional fields; a response part may carry text and a
/// function call at the same time.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiPart {
    /// Text content
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Function call from the model
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<GeminiFunctionCall>,
    /// Function response from the caller
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_response: Option<GeminiFunctionResponse>,
}

impl GeminiPart {
    /// Text part
    pub fn text(text: Option<String>) -> Self {
        Self {
            text,
            ..Self::default()
        }
    }
}

/// Function call from the model
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeminiFunctionCall {
    /// Function name
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Function arguments as JSON
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<serde_json::Value>,
}

/// Function response supplied by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeminiFunctionResponse {
    /// Function name
    pub name: String,
    /// Response payload
    pub response: GeminiFunctionResult,
}

/// Payload of a function response, the tool result content as-is
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeminiFunctionResult {
    /// Tool result content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Content>,
}

/// Generation configuration parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiGenerationConfig {
    /// Sampling temperature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Maximum output tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    /// Nucleus sampling threshold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    /// Stop sequences
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_sequences: Option<Vec<String>>,
}

/// Tool definition wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiTool {
    /// Function declarations
    pub function_declarations: Vec<GeminiFunctionDeclaration>,
}

/// Function declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeminiFunctionDeclaration {
    /// Function name
    pub name: String,
    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON Schema for parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
}

// -- Response types --

/// `generateContent` response
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiResponse {
    /// Generated candidates
    #[serde_as(deserialize_as = "DefaultOnError<VecSkipError<_>>")]
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
    /// Token usage metadata
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub usage_metadata: Option<GeminiUsageMetadata>,
}

/// Generated candidate
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiCandidate {
    /// Generated content
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub content: Option<GeminiContent>,
    /// Finish reason
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Token usage metadata
#[serde_as]
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiUsageMetadata {
    /// Prompt token count
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub prompt_token_count: u64,
    /// Candidates token count
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub candidates_token_count: u64,
    /// Total token count
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub total_token_count: u64,
}
