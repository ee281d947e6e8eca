//! Dialect parsers and the string helpers they share.
//!
//! - [`json`] handles well-formed exports (array or single object).
//! - [`raw_text`] recovers conversations from text that only resembles JSON.
//! - [`unescape`] decodes backslash escapes lifted out of raw text.

pub mod json;
pub mod raw_text;
mod unescape;

pub use json::{JsonParser, conversation_from_value};
pub use raw_text::{RawTextParser, extract_messages, parse_block, split_blocks};
pub use unescape::unescape;
