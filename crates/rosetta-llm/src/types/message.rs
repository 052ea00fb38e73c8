use serde::{Deserialize, Serialize};

/// Role of a message participant
///
/// Roles outside the canonical four are carried through verbatim so that
/// parsers never reject a message because of its role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instruction
    System,
    /// User message
    User,
    /// Assistant response
    Assistant,
    /// Tool/function result
    Tool,
    /// Any other role string
    #[serde(untagged)]
    Other(String),
}

impl Role {
    /// Map a native role string, keeping unknown values as-is
    pub fn from_native(role: &str) -> Self {
        match role {
            "system" => Self::System,
            "user" => Self::User,
            "assistant" => Self::Assistant,
            "tool" => Self::Tool,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Wire representation of the role
    pub fn as_str(&self) -> &str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Tool => "tool",
            Self::Other(role) => role,
        }
    }
}

/// Message in a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message author
    pub role: Role,
    /// Message content
    #[serde(default)]
    pub content: Content,
    /// Optional participant name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Message {
    /// Create a plain-text message
    pub fn text(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            content: Content::Text(text.into()),
            name: None,
        }
    }

    /// Create a message from structured parts
    pub fn parts(role: Role, parts: Vec<ContentPart>) -> Self {
        Self {
            role,
            content: Content::Parts(parts),
            name: None,
        }
    }
}

/// Message content, either plain text or an ordered list of parts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    /// Plain text content
    Text(String),
    /// Ordered content parts
    Parts(Vec<ContentPart>),
}

impl Default for Content {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl Content {
    /// Newline-joined text of this content, skipping non-text parts
    pub fn extract_text(&self) -> String {
        crate::utils::extract_text(self)
    }
}

/// Individual typed fragment of a message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Text fragment
    Text {
        /// The text string
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
    },
    /// Image, either by URL or inline base64 source
    Image {
        /// URL reference (including `data:` URIs)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        image_url: Option<ImageUrl>,
        /// Inline base64 source
        #[serde(default, skip_serializing_if = "Option::is_none")]
        source: Option<ImageSource>,
    },
    /// Assistant request to invoke a tool
    ToolUse {
        /// Call identifier
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        /// Function name
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        /// Arguments, opaque to the core
        #[serde(default, skip_serializing_if = "Option::is_none")]
        input: Option<serde_json::Value>,
    },
    /// Outcome of a previous tool invocation
    ToolResult {
        /// Identifier of the originating `tool_use` part
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tool_use_id: Option<String>,
        /// Result payload
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<Content>,
        /// Whether the invocation failed
        #[serde(default, skip_serializing_if = "Option::is_none")]
        is_error: Option<bool>,
        /// Function name, when the caller supplies it out-of-band
        ///
        /// No parser in this crate populates it; only a caller can.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
}

impl ContentPart {
    /// Text part with the given content
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: Some(text.into()),
        }
    }

    /// Whether this is a text part
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text { .. })
    }

    /// Whether this is an image part
    pub const fn is_image(&self) -> bool {
        matches!(self, Self::Image { .. })
    }

    /// Whether this is a tool invocation
    pub const fn is_tool_use(&self) -> bool {
        matches!(self, Self::ToolUse { .. })
    }

    /// Whether this is a tool result
    pub const fn is_tool_result(&self) -> bool {
        matches!(self, Self::ToolResult { .. })
    }
}

/// Image referenced by URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUrl {
    /// Image URL or data URI
    pub url: String,
    /// Detail level hint ("auto", "low", "high")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Inline image data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSource {
    /// Source encoding, always "base64" when produced by this crate
    #[serde(rename = "type")]
    pub source_type: String,
    /// MIME type (e.g. "image/png")
    #[serde(default)]
    pub media_type: String,
    /// Base64-encoded bytes
    #[serde(default)]
    pub data: String,
}

impl ImageSource {
    /// Build a base64 source
    pub fn base64(media_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            source_type: "base64".to_owned(),
            media_type: media_type.into(),
            data: data.into(),
        }
    }

    /// Whether the bytes are carried inline as base64
    pub fn is_base64(&self) -> bool {
        self.source_type == "base64"
    }
}
