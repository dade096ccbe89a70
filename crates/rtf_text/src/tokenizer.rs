//! RTF tokenizer - splits RTF text into control words, symbols, groups and literals
//!
//! The scanner makes a single forward pass and never backtracks. At every
//! position it tries, in order:
//! - a control word (`\` + 1-32 lowercase letters, optional signed argument, optional space)
//! - a hex escape (`\'` + two hex digits)
//! - a control symbol (`\` + any other character)
//! - a group brace
//! - any other single character
//!
//! Raw line breaks are not significant in RTF and are skipped.

/// Longest control word name the scanner accepts
pub const MAX_CONTROL_WORD_LEN: usize = 32;

/// Longest numeric argument (in digits) the scanner accepts
pub const MAX_PARAM_DIGITS: usize = 10;

/// Token types in RTF
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RtfToken<'a> {
    /// Start of a group '{'
    GroupStart,
    /// End of a group '}'
    GroupEnd,
    /// Control word with optional numeric parameter
    ControlWord {
        name: &'a str,
        param: Option<i64>,
    },
    /// Control symbol (e.g., \~ \* \\)
    ControlSymbol(char),
    /// Hex character escape (\'XX)
    HexEscape(u8),
    /// Any other character
    Literal(char),
}

/// RTF tokenizer - converts RTF text into tokens
///
/// Each token is yielded together with the byte offset where it starts.
#[derive(Debug, Clone)]
pub struct RtfTokenizer<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> RtfTokenizer<'a> {
    /// Create a new tokenizer for the given input
    pub fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    /// Get the current position
    pub fn position(&self) -> usize {
        self.position
    }

    /// Check if we've reached the end
    pub fn is_eof(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Peek at the byte `offset` bytes ahead without advancing
    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.as_bytes().get(self.position + offset).copied()
    }

    fn peek(&self) -> Option<u8> {
        self.peek_at(0)
    }

    /// Decode the character at the current position
    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn skip_line_breaks(&mut self) {
        while matches!(self.peek(), Some(b'\r') | Some(b'\n')) {
            self.position += 1;
        }
    }

    /// Read the next token
    pub fn next_token(&mut self) -> Option<(usize, RtfToken<'a>)> {
        self.skip_line_breaks();

        let start = self.position;
        let byte = self.peek()?;

        let token = match byte {
            b'\\' => self.read_control(),
            b'{' => {
                self.position += 1;
                RtfToken::GroupStart
            }
            b'}' => {
                self.position += 1;
                RtfToken::GroupEnd
            }
            _ => self.read_literal(),
        };

        Some((start, token))
    }

    /// Read whatever follows a backslash
    fn read_control(&mut self) -> RtfToken<'a> {
        match self.peek_at(1) {
            Some(b) if b.is_ascii_lowercase() => {
                self.position += 1;
                self.read_control_word()
            }
            Some(b'\'') => {
                if let Some(value) = self.read_hex_escape() {
                    return RtfToken::HexEscape(value);
                }
                self.position += 2;
                RtfToken::ControlSymbol('\'')
            }
            Some(_) => {
                self.position += 1;
                match self.peek_char() {
                    Some(symbol) => {
                        self.position += symbol.len_utf8();
                        RtfToken::ControlSymbol(symbol)
                    }
                    None => RtfToken::Literal('\\'),
                }
            }
            None => {
                // Lone backslash at end of input
                self.position += 1;
                RtfToken::Literal('\\')
            }
        }
    }

    /// Read a control word name, its optional parameter and delimiter
    fn read_control_word(&mut self) -> RtfToken<'a> {
        let name_start = self.position;
        while self.position - name_start < MAX_CONTROL_WORD_LEN
            && self.peek().is_some_and(|b| b.is_ascii_lowercase())
        {
            self.position += 1;
        }
        let name = &self.input[name_start..self.position];

        let param = self.read_number();

        // Skip delimiter (single space after control word)
        if self.peek() == Some(b' ') {
            self.position += 1;
        }

        RtfToken::ControlWord { name, param }
    }

    /// Read a numeric parameter (possibly negative)
    fn read_number(&mut self) -> Option<i64> {
        let negative = self.peek() == Some(b'-');
        let digits_start = self.position + usize::from(negative);

        let mut len = 0;
        while len < MAX_PARAM_DIGITS
            && self
                .input
                .as_bytes()
                .get(digits_start + len)
                .is_some_and(u8::is_ascii_digit)
        {
            len += 1;
        }
        if len == 0 {
            return None;
        }

        let end = digits_start + len;
        // At most ten ASCII digits always fit in an i64
        let value = self.input[self.position..end].parse::<i64>().ok()?;
        self.position = end;
        Some(value)
    }

    /// Read a hex byte (\'XX format), leaving the position untouched on failure
    fn read_hex_escape(&mut self) -> Option<u8> {
        let hi = hex_value(self.peek_at(2)?)?;
        let lo = hex_value(self.peek_at(3)?)?;
        self.position += 4;
        Some(hi << 4 | lo)
    }

    fn read_literal(&mut self) -> RtfToken<'a> {
        match self.peek_char() {
            Some(ch) => {
                self.position += ch.len_utf8();
                RtfToken::Literal(ch)
            }
            None => {
                // Unreachable for valid UTF-8 input; treat as end of input
                self.position = self.input.len();
                RtfToken::Literal(char::REPLACEMENT_CHARACTER)
            }
        }
    }
}

impl<'a> Iterator for RtfTokenizer<'a> {
    type Item = (usize, RtfToken<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
