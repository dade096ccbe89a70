//! Text Value - immutable text wrappers for editor collaborators
//!
//! This crate provides two immutable string types sharing one operation
//! surface, plus small text utilities used for resource identifiers and
//! diagnostics.
//!
//! # Modules
//!
//! - `text`: `TextValue`, compares exactly like `String`
//! - `folded`: `CaseFoldedTextValue`, case-insensitive matching with case-preserving results
//! - `ops`: The `TextOps` operation surface shared by both
//! - `text_like`: The `TextLike` argument capability and dynamic `Value`s
//! - `ireplace`: Literal case-insensitive replace
//! - `diff`: Caret-marked diff rendering
//!
//! # Example
//!
//! ```rust
//! use text_value::{CaseFoldedTextValue, TextOps, UNLIMITED};
//!
//! let resref = CaseFoldedTextValue::new("Foo::Bar::Baz");
//! assert_eq!(resref, CaseFoldedTextValue::new("foo::bar::baz"));
//!
//! let parts = resref.split(Some(&"::"), UNLIMITED).unwrap();
//! assert_eq!(parts[1].as_str(), "Bar");
//! ```

mod error;
mod folded;
mod ireplace;
mod ops;
mod text;
mod text_like;
pub mod diff;

pub use error::{Result, TextError};
pub use folded::CaseFoldedTextValue;
pub use ireplace::ireplace;
pub use ops::{make_translation_table, TextChars, TextOps, TranslationTable, UNLIMITED};
pub use text::TextValue;
pub use text_like::{TextLike, Value};

// Re-export commonly used diff helpers
pub use diff::{compare_and_format, first_char_diff_index, generate_diff_marker_line};
