use serde::{Deserialize, Serialize};

/// Definition of a tool the model can call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Function name
    pub name: String,
    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON Schema for the parameters, never interpreted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
}

/// How the model should select tools
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolChoice {
    /// Simple mode: "none", "auto", or "required"
    Mode(ToolChoiceMode),
    /// Force a specific function
    Function(ToolChoiceFunction),
}

impl Default for ToolChoice {
    fn default() -> Self {
        Self::Mode(ToolChoiceMode::Auto)
    }
}

impl ToolChoice {
    /// Force the named function
    pub fn function(name: impl Into<String>) -> Self {
        Self::Function(ToolChoiceFunction {
            tool_type: "function".to_owned(),
            function: ToolChoiceFunctionName { name: name.into() },
        })
    }
}

/// Tool selection mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolChoiceMode {
    /// Model will not call any tools
    None,
    /// Model decides whether to call tools
    Auto,
    /// Model must call at least one tool
    Required,
}

/// Force the model to call a specific function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolChoiceFunction {
    /// Must be "function"
    #[serde(rename = "type")]
    pub tool_type: String,
    /// Function to call
    pub function: ToolChoiceFunctionName,
}

/// Function name reference within a forced tool choice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolChoiceFunctionName {
    /// Name of the function to call
    pub name: String,
}
