//! Pure helpers over the canonical model

use crate::types::{CanonicalRequest, Content, ContentPart};

/// Flatten content to plain text
///
/// Plain text is returned unchanged. For part sequences, the text of every
/// text part is joined with newlines in order; other parts are skipped
/// without leaving a placeholder.
pub fn extract_text(content: &Content) -> String {
    match content {
        Content::Text(text) => text.clone(),
        Content::Parts(parts) => parts
            .iter()
            .filter_map(|part| match part {
                ContentPart::Text { text } => Some(text.as_deref().unwrap_or_default()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Whether any message of the request carries an image part
pub fn has_images(request: &CanonicalRequest) -> bool {
    request.messages.iter().any(|msg| match &msg.content {
        Content::Parts(parts) => parts.iter().any(ContentPart::is_image),
        Content::Text(_) => false,
    })
}
