//! RTF Text - flattens Rich Text Format content to plain text
//!
//! Editor fields that originate from RTF documents are passed through this
//! crate before display. All markup is removed and escaped or special
//! characters are translated to their Unicode equivalents.
//!
//! # Modules
//!
//! - `tokenizer`: Single-pass RTF scanner
//! - `extractor`: Group-aware plain text extraction
//! - `config`: Extraction options
//!
//! # Example
//!
//! ```rust
//! use rtf_text::rtf_to_text;
//!
//! let text = rtf_to_text(r"{\rtf1\ansi{\fonttbl\f0 Arial;}Hello\par World}").unwrap();
//! assert_eq!(text, "Hello\nWorld");
//! ```

mod config;
mod error;
mod extractor;
mod tables;
pub mod tokenizer;

pub use config::{ExtractorConfig, GroupPolicy, HexCharset};
pub use error::{RtfError, RtfResult};
pub use extractor::RtfExtractor;
pub use tables::{is_destination, special_char};
pub use tokenizer::{RtfToken, RtfTokenizer};

/// Strip RTF markup from `input` using the default configuration
///
/// # Errors
///
/// Returns `RtfError::UnbalancedGroup` on a `}` without a matching `{`.
pub fn rtf_to_text(input: &str) -> RtfResult<String> {
    RtfExtractor::new().extract(input)
}

/// Check whether text looks like an RTF document
pub fn looks_like_rtf(text: &str) -> bool {
    text.trim_start().starts_with("{\\rtf")
}
