//! Extractor configuration

use serde::{Deserialize, Serialize};

/// What to do with a `}` that closes a group that was never opened
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupPolicy {
    /// Fail with `RtfError::UnbalancedGroup`
    #[default]
    Strict,
    /// Log the stray brace and keep going
    Lenient,
}

/// Character set used to decode `\'hh` escapes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HexCharset {
    /// Byte value is the code point
    #[default]
    Latin1,
    /// Windows ANSI code page, used by most RTF producers
    Windows1252,
}

impl HexCharset {
    /// Decode one escaped byte
    pub fn decode(self, byte: u8) -> char {
        match self {
            HexCharset::Latin1 => char::from(byte),
            HexCharset::Windows1252 => crate::tables::cp1252_char(byte),
        }
    }
}

/// RTF extractor configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Initial number of fallback characters skipped after `\u` (the `\uc` value)
    pub unicode_skip: u32,
    /// Handling of unbalanced closing braces
    pub group_policy: GroupPolicy,
    /// Decoding of hex escapes
    pub hex_charset: HexCharset,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            unicode_skip: 1,
            group_policy: GroupPolicy::Strict,
            hex_charset: HexCharset::Latin1,
        }
    }
}

impl ExtractorConfig {
    /// Create a config that tolerates stray closing braces
    pub fn lenient() -> Self {
        Self {
            group_policy: GroupPolicy::Lenient,
            ..Default::default()
        }
    }

    /// Set the initial unicode skip count
    pub fn with_unicode_skip(mut self, unicode_skip: u32) -> Self {
        self.unicode_skip = unicode_skip;
        self
    }

    /// Set the group policy
    pub fn with_group_policy(mut self, group_policy: GroupPolicy) -> Self {
        self.group_policy = group_policy;
        self
    }

    /// Set the hex escape charset
    pub fn with_hex_charset(mut self, hex_charset: HexCharset) -> Self {
        self.hex_charset = hex_charset;
        self
    }
}
