//! Bidirectional translation between LLM vendor wire formats
//!
//! Every vendor payload is converted to and from a vendor-neutral canonical
//! form ([`types`]). Adapters for the Anthropic Messages, `OpenRouter` /
//! `OpenAI` chat completion and Gemini `generateContent` formats implement
//! [`ProviderAdapter`], each covering the directions its vendor plays in a
//! proxy: Anthropic is parsed as a request and built as a response, the
//! other two are built as requests and parsed as responses.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod convert;
pub mod entropy;
pub mod error;
pub mod legacy;
pub mod protocol;
pub mod provider;
pub mod types;
pub mod utils;

pub use entropy::{ResponseEntropy, SystemEntropy};
pub use error::AdapterError;
pub use provider::{AnthropicAdapter, GeminiAdapter, Operation, OpenRouterAdapter, ProviderAdapter, ProviderKind};
pub use types::{CanonicalRequest, CanonicalResponse, Content, ContentPart, Message, Role};
pub use utils::{extract_text, has_images};
