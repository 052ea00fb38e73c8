//! Conversion between the canonical types and each vendor's wire format
//!
//! Each submodule handles the directions its vendor supports. Conversions are
//! infallible: malformed or missing data degrades to defaults.

pub mod anthropic;
pub mod gemini;
pub mod openrouter;
