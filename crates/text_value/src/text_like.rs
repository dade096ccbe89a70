//! The text-like capability and dynamic collaborator values

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TextError};

/// Anything that can stand in for text in a text operation
///
/// Primitive strings and the text value wrappers always succeed. Dynamic
/// [`Value`]s succeed only when they hold text.
pub trait TextLike {
    /// Borrow the text, or fail with `TextError::ExpectedStringLike`
    fn to_text(&self) -> Result<&str>;

    /// Whether this argument means "not given" for optional parameters
    fn is_absent(&self) -> bool {
        false
    }
}

impl TextLike for str {
    fn to_text(&self) -> Result<&str> {
        Ok(self)
    }
}

impl TextLike for String {
    fn to_text(&self) -> Result<&str> {
        Ok(self)
    }
}

impl TextLike for Cow<'_, str> {
    fn to_text(&self) -> Result<&str> {
        Ok(self)
    }
}

impl<T: TextLike + ?Sized> TextLike for &T {
    fn to_text(&self) -> Result<&str> {
        (**self).to_text()
    }

    fn is_absent(&self) -> bool {
        (**self).is_absent()
    }
}

/// Resolve an optional text argument; `None` and absent values both mean "not given"
pub(crate) fn optional_text<'a>(arg: Option<&'a dyn TextLike>) -> Result<Option<&'a str>> {
    match arg {
        Some(arg) if !arg.is_absent() => arg.to_text().map(Some),
        _ => Ok(None),
    }
}

/// A dynamically typed value handed over by editor collaborators
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Text/string value
    Text(String),
    /// Numeric value
    Number(f64),
    /// Boolean value
    Boolean(bool),
    /// Null/missing value
    #[default]
    Null,
}

impl Value {
    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Name of the value's type, as shown in type errors
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Text(_) => "str",
            Value::Number(_) => "number",
            Value::Boolean(_) => "bool",
            Value::Null => "null",
        }
    }

    /// Convert to string representation
    pub fn to_string_value(&self) -> String {
        match self {
            Value::Text(s) => s.clone(),
            Value::Number(n) => {
                // Format integers without decimal places
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            Value::Boolean(b) => if *b { "true" } else { "false" }.to_string(),
            Value::Null => "null".to_string(),
        }
    }

    /// Try to get as text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl TextLike for Value {
    fn to_text(&self) -> Result<&str> {
        match self {
            Value::Text(s) => Ok(s),
            other => Err(TextError::expected_string_like(
                other.to_string_value(),
                other.type_name(),
            )),
        }
    }

    fn is_absent(&self) -> bool {
        self.is_null()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_value())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_text_is_text_like() {
        assert_eq!("abc".to_text().unwrap(), "abc");
        assert_eq!(String::from("abc").to_text().unwrap(), "abc");
        assert_eq!(Cow::Borrowed("abc").to_text().unwrap(), "abc");
    }

    #[test]
    fn test_value_text_is_text_like() {
        let value = Value::from("hello");
        assert_eq!(value.to_text().unwrap(), "hello");
    }

    #[test]
    fn test_value_number_is_rejected() {
        let err = Value::from(42i64).to_text().unwrap_err();
        assert_eq!(
            err,
            TextError::ExpectedStringLike {
                value: "42".to_string(),
                type_name: "number",
            }
        );
        assert!(err.to_string().contains("number"));
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text(None).unwrap(), None);
        assert_eq!(optional_text(Some(&Value::Null)).unwrap(), None);
        assert_eq!(optional_text(Some(&"x")).unwrap(), Some("x"));
        assert!(optional_text(Some(&Value::Boolean(true))).is_err());
    }

    #[test]
    fn test_value_serde_untagged() {
        let values: Vec<Value> = serde_json::from_str(r#"["a", 1.5, true, null]"#).unwrap();
        assert_eq!(
            values,
            vec![
                Value::Text("a".to_string()),
                Value::Number(1.5),
                Value::Boolean(true),
                Value::Null,
            ]
        );
    }
}
