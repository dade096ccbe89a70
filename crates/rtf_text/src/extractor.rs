//! RTF extractor - flattens an RTF token stream into plain text
//!
//! The extractor walks the tokens once, tracking which groups are ignorable
//! and how many fallback characters remain to be skipped after a `\u`
//! escape. Unknown control words are dropped silently.

use crate::config::{ExtractorConfig, GroupPolicy};
use crate::error::{RtfError, RtfResult};
use crate::tables::{is_destination, special_char};
use crate::tokenizer::{RtfToken, RtfTokenizer};

/// State saved on `{` and restored on `}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GroupState {
    unicode_skip: u32,
    ignorable: bool,
}

/// Mutable state for one extraction run
struct ExtractState<'c> {
    config: &'c ExtractorConfig,
    current: GroupState,
    /// Fallback characters still to skip after a `\u`
    cur_skip: u32,
    stack: Vec<GroupState>,
    /// High half of a UTF-16 pair waiting for its low half
    pending_surrogate: Option<u32>,
    out: String,
}

impl<'c> ExtractState<'c> {
    fn new(config: &'c ExtractorConfig, capacity: usize) -> Self {
        Self {
            config,
            current: GroupState {
                unicode_skip: config.unicode_skip,
                ignorable: false,
            },
            cur_skip: 0,
            stack: Vec::new(),
            pending_surrogate: None,
            out: String::with_capacity(capacity),
        }
    }

    fn flush_surrogate(&mut self) {
        if self.pending_surrogate.take().is_some() {
            self.out.push(char::REPLACEMENT_CHARACTER);
        }
    }

    fn emit_str(&mut self, text: &str) {
        self.flush_surrogate();
        self.out.push_str(text);
    }

    fn emit(&mut self, ch: char) {
        self.flush_surrogate();
        self.out.push(ch);
    }

    fn apply(&mut self, position: usize, token: RtfToken<'_>) -> RtfResult<()> {
        match token {
            RtfToken::GroupStart => {
                self.cur_skip = 0;
                self.stack.push(self.current);
            }
            RtfToken::GroupEnd => {
                self.cur_skip = 0;
                match self.stack.pop() {
                    Some(state) => self.current = state,
                    None => match self.config.group_policy {
                        GroupPolicy::Strict => return Err(RtfError::unbalanced_group(position)),
                        GroupPolicy::Lenient => {
                            tracing::warn!(position, "Ignoring unbalanced '}}' in RTF input");
                        }
                    },
                }
            }
            RtfToken::ControlSymbol(symbol) => {
                self.cur_skip = 0;
                self.control_symbol(symbol);
            }
            RtfToken::ControlWord { name, param } => {
                self.cur_skip = 0;
                self.control_word(name, param);
            }
            RtfToken::HexEscape(byte) => {
                if self.cur_skip > 0 {
                    self.cur_skip -= 1;
                } else if !self.current.ignorable {
                    let ch = self.config.hex_charset.decode(byte);
                    self.emit(ch);
                }
            }
            RtfToken::Literal(ch) => {
                if self.cur_skip > 0 {
                    self.cur_skip -= 1;
                } else if !self.current.ignorable {
                    self.emit(ch);
                }
            }
        }
        Ok(())
    }

    fn control_symbol(&mut self, symbol: char) {
        if symbol == '*' {
            self.current.ignorable = true;
            return;
        }
        if self.current.ignorable {
            return;
        }
        match symbol {
            '~' => self.emit('\u{00A0}'),
            '{' | '}' | '\\' => self.emit(symbol),
            '\r' | '\n' => self.emit('\n'),
            '-' => self.emit('\u{00AD}'),
            '_' => self.emit('\u{2011}'),
            _ => {}
        }
    }

    fn control_word(&mut self, name: &str, param: Option<i64>) {
        if is_destination(name) {
            self.current.ignorable = true;
        } else if self.current.ignorable {
            // Content of ignorable groups is dropped
        } else if let Some(text) = special_char(name) {
            self.emit_str(text);
        } else if name == "uc" {
            self.current.unicode_skip = match param {
                Some(n) => u32::try_from(n.max(0)).unwrap_or(u32::MAX),
                None => 1,
            };
        } else if name == "u" {
            if let Some(value) = param {
                self.unicode_escape(value);
                self.cur_skip = self.current.unicode_skip;
            }
        } else {
            tracing::trace!(name, ?param, "Dropping unhandled RTF control word");
        }
    }

    fn unicode_escape(&mut self, value: i64) {
        let code = if value < 0 { value + 0x10000 } else { value };
        let Ok(code) = u32::try_from(code) else {
            self.emit(char::REPLACEMENT_CHARACTER);
            return;
        };

        match code {
            0xD800..=0xDBFF => {
                self.flush_surrogate();
                self.pending_surrogate = Some(code);
            }
            0xDC00..=0xDFFF => match self.pending_surrogate.take() {
                Some(high) => {
                    let combined = 0x10000 + ((high - 0xD800) << 10) + (code - 0xDC00);
                    self.emit(char::from_u32(combined).unwrap_or(char::REPLACEMENT_CHARACTER));
                }
                None => self.emit(char::REPLACEMENT_CHARACTER),
            },
            _ => self.emit(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)),
        }
    }

    fn finish(mut self) -> String {
        self.flush_surrogate();
        if !self.stack.is_empty() {
            tracing::debug!(open_groups = self.stack.len(), "RTF input ended with unclosed groups");
        }
        self.out
    }
}

/// RTF to plain text extractor
#[derive(Debug, Clone, Default)]
pub struct RtfExtractor {
    config: ExtractorConfig,
}

impl RtfExtractor {
    /// Create an extractor with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with custom configuration
    pub fn with_config(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Strip all RTF markup from `input` and return the plain text
    ///
    /// # Errors
    ///
    /// Returns `RtfError::UnbalancedGroup` when a `}` has no matching `{`
    /// and the group policy is `Strict`.
    pub fn extract(&self, input: &str) -> RtfResult<String> {
        let mut state = ExtractState::new(&self.config, input.len());
        for (position, token) in RtfTokenizer::new(input) {
            state.apply(position, token)?;
        }
        Ok(state.finish())
    }
}
