use serde::{Deserialize, Serialize};

use super::message::Message;
use super::tool::{ToolChoice, ToolDefinition};

/// Stop sequences, given as a single string or a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Stop {
    /// Single stop sequence
    One(String),
    /// Several stop sequences
    Many(Vec<String>),
}

impl Stop {
    /// Normalize to a list, treating an empty single sequence as unset
    pub fn to_sequences(&self) -> Option<Vec<String>> {
        match self {
            Self::One(sequence) if sequence.is_empty() => None,
            Self::One(sequence) => Some(vec![sequence.clone()]),
            Self::Many(sequences) => Some(sequences.clone()),
        }
    }
}

/// Vendor-neutral completion request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRequest {
    /// Name of the adapter that produced this request
    #[serde(default)]
    pub provider: String,
    /// Model identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Conversation messages, in order
    #[serde(default)]
    pub messages: Vec<Message>,
    /// Tool definitions available to the model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDefinition>>,
    /// How the model should select tools
    #[serde(default)]
    pub tool_choice: ToolChoice,
    /// Sampling temperature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Nucleus sampling threshold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    /// Stop sequences
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<Stop>,
    /// Whether to stream the response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    /// End-user identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl CanonicalRequest {
    /// Whether any message carries an image part
    pub fn has_images(&self) -> bool {
        crate::utils::has_images(self)
    }
}
