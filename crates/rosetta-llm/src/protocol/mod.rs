//! Wire format types for vendor-specific API protocols
//!
//! Each module contains serde structs matching the respective vendor's JSON
//! format. Inbound types decode leniently: a field with the wrong shape falls
//! back to its default rather than failing the whole payload.

pub mod anthropic;
pub mod gemini;
pub mod openrouter;
