//! Canonical types for LLM request/response representation
//!
//! These types are vendor-neutral and serve as the intermediate representation
//! that every wire format converts to and from.

pub mod message;
pub mod request;
pub mod response;
pub mod tool;

pub use message::{Content, ContentPart, ImageSource, ImageUrl, Message, Role};
pub use request::{CanonicalRequest, Stop};
pub use response::{CanonicalResponse, Choice, FinishReason, ResponseError, Usage};
pub use tool::{ToolChoice, ToolChoiceFunction, ToolChoiceFunctionName, ToolChoiceMode, ToolDefinition};
