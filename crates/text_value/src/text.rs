//! Case-sensitive immutable text value

use std::borrow::Borrow;
use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ops::{TextChars, TextOps};
use crate::text_like::TextLike;

/// An immutable string whose equality, ordering and hashing match `String`
///
/// A `TextValue` can be used interchangeably with plain strings as a map
/// key (it borrows as `str`) and compares equal to `str`/`String` with the
/// same content.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextValue(String);

impl TextValue {
    /// Create a new text value
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Create a text value from any text-like argument
    ///
    /// # Errors
    ///
    /// Fails with `TextError::ExpectedStringLike` for non-text values.
    pub fn try_new(value: &dyn TextLike) -> Result<Self> {
        Ok(Self(value.to_text()?.to_string()))
    }

    /// Unwrap into the underlying string
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TextOps for TextValue {
    fn as_str(&self) -> &str {
        &self.0
    }

    fn from_text(text: String) -> Self {
        Self(text)
    }
}

impl TextLike for TextValue {
    fn to_text(&self) -> Result<&str> {
        Ok(&self.0)
    }
}

impl fmt::Display for TextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TextValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for TextValue {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<String> for TextValue {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for TextValue {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl From<TextValue> for String {
    fn from(value: TextValue) -> Self {
        value.0
    }
}

impl PartialEq<str> for TextValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TextValue {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl PartialEq<String> for TextValue {
    fn eq(&self, other: &String) -> bool {
        &self.0 == other
    }
}

impl PartialEq<TextValue> for str {
    fn eq(&self, other: &TextValue) -> bool {
        self == other.0
    }
}

impl PartialEq<TextValue> for &str {
    fn eq(&self, other: &TextValue) -> bool {
        *self == other.0
    }
}

impl<'a> IntoIterator for &'a TextValue {
    type Item = TextValue;
    type IntoIter = TextChars<'a, TextValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Add<&str> for &TextValue {
    type Output = TextValue;

    fn add(self, rhs: &str) -> TextValue {
        TextValue(format!("{}{}", self.0, rhs))
    }
}

impl Add<&TextValue> for &TextValue {
    type Output = TextValue;

    fn add(self, rhs: &TextValue) -> TextValue {
        TextValue(format!("{}{}", self.0, rhs.0))
    }
}
