use serde::Deserialize;

/// Values forced onto every converted request
///
/// Unset fields leave the parsed request untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OverridesConfig {
    /// Target model identifier
    #[serde(default)]
    pub model: Option<String>,
    /// Sampling temperature
    #[serde(default)]
    pub temperature: Option<f64>,
    /// Maximum tokens to generate
    #[serde(default)]
    pub max_tokens: Option<u32>,
    /// Whether to stream the response
    #[serde(default)]
    pub stream: Option<bool>,
}

impl OverridesConfig {
    /// Whether no override is set
    pub const fn is_empty(&self) -> bool {
        self.model.is_none() && self.temperature.is_none() && self.max_tokens.is_none() && self.stream.is_none()
    }

    /// Layer `other` on top of `self`; fields set in `other` win
    #[must_use]
    pub fn merged_with(&self, other: &Self) -> Self {
        Self {
            model: other.model.clone().or_else(|| self.model.clone()),
            temperature: other.temperature.or(self.temperature),
            max_tokens: other.max_tokens.or(self.max_tokens),
            stream: other.stream.or(self.stream),
        }
    }
}

/// Response conversion defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResponseConfig {
    /// Model reported when the upstream response omits one
    #[serde(default)]
    pub model: Option<String>,
}
