//! The shared text operation surface
//!
//! [`TextOps`] provides every operation in terms of two required methods,
//! `as_str` and `from_text`. Derived values are built with `from_text`, so
//! a `TextValue` yields `TextValue`s and a `CaseFoldedTextValue` yields
//! `CaseFoldedTextValue`s. Indices count chars, and negative indices count
//! from the end.

use std::collections::HashMap;
use std::marker::PhantomData;

use crate::error::{Result, TextError};
use crate::text_like::{optional_text, TextLike, Value};

/// Character translation map used by [`TextOps::translate`]; `None` deletes
pub type TranslationTable = HashMap<char, Option<String>>;

/// `maxsplit`/`count` value meaning "no limit"
pub const UNLIMITED: isize = -1;

/// Build a translation table mapping each char of `from` to the char at the
/// same position in `to`, and deleting every char of `delete`
///
/// # Errors
///
/// Fails when an argument is not text-like or `from` and `to` differ in length.
pub fn make_translation_table(
    from: &dyn TextLike,
    to: &dyn TextLike,
    delete: Option<&dyn TextLike>,
) -> Result<TranslationTable> {
    let from = from.to_text()?;
    let to = to.to_text()?;
    if from.chars().count() != to.chars().count() {
        return Err(TextError::TranslationTable(
            "the first two arguments must have equal length".to_string(),
        ));
    }

    let mut table: TranslationTable = from
        .chars()
        .zip(to.chars())
        .map(|(f, t)| (f, Some(t.to_string())))
        .collect();
    if let Some(delete) = optional_text(delete)? {
        for ch in delete.chars() {
            table.insert(ch, None);
        }
    }
    Ok(table)
}

/// Convert a char index to a byte offset, clamping to the end
pub(crate) fn byte_offset(s: &str, char_index: usize) -> usize {
    s.char_indices()
        .nth(char_index)
        .map_or(s.len(), |(offset, _)| offset)
}

/// Convert a byte offset to a char index
pub(crate) fn char_index(s: &str, byte_offset: usize) -> usize {
    s[..byte_offset].chars().count()
}

/// Convert a non-negative `maxsplit`/`count` to a limit; negative means none
pub(crate) fn limit(value: isize) -> Option<usize> {
    usize::try_from(value).ok()
}

/// Clamp slice bounds the way sequence slicing does
fn resolve_bounds(start: Option<isize>, end: Option<isize>, len: usize) -> (usize, usize) {
    let clamp = |index: isize| -> usize {
        if index < 0 {
            len.saturating_sub(index.unsigned_abs())
        } else {
            index.unsigned_abs().min(len)
        }
    };
    let start = start.map_or(0, clamp);
    let end = end.map_or(len, clamp);
    (start, end.max(start))
}

/// Split on runs of whitespace, dropping empty pieces
pub(crate) fn split_whitespace(s: &str, maxsplit: Option<usize>) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut rest = s.trim_start();
    while !rest.is_empty() {
        if maxsplit.is_some_and(|max| parts.len() >= max) {
            parts.push(rest);
            break;
        }
        match rest.find(char::is_whitespace) {
            Some(i) => {
                parts.push(&rest[..i]);
                rest = rest[i..].trim_start();
            }
            None => {
                parts.push(rest);
                break;
            }
        }
    }
    parts
}

/// Split on runs of whitespace from the right, dropping empty pieces
pub(crate) fn rsplit_whitespace(s: &str, maxsplit: Option<usize>) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut rest = s.trim_end();
    while !rest.is_empty() {
        if maxsplit.is_some_and(|max| parts.len() >= max) {
            parts.push(rest);
            break;
        }
        match rest.char_indices().rev().find(|(_, c)| c.is_whitespace()) {
            Some((i, ws)) => {
                parts.push(&rest[i + ws.len_utf8()..]);
                rest = rest[..i].trim_end();
            }
            None => {
                parts.push(rest);
                break;
            }
        }
    }
    parts.reverse();
    parts
}

/// Case-sensitive replace of the first `count` occurrences (all when negative)
pub(crate) fn replace_str(s: &str, old: &str, new: &str, count: isize) -> String {
    match limit(count) {
        Some(count) => s.replacen(old, new, count),
        None => s.replace(old, new),
    }
}

/// Lowercase `c` when its lowercase form is a single char, else keep it
pub(crate) fn simple_lower(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

/// Uppercase `c` when its uppercase form is a single char, else keep it
pub(crate) fn simple_upper(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

fn is_line_boundary(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{1C}' | '\u{1D}' | '\u{1E}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

fn splitlines(s: &str, keepends: bool) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = s.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if !is_line_boundary(c) {
            continue;
        }
        let mut end = i + c.len_utf8();
        if c == '\r' && chars.peek().is_some_and(|&(_, next)| next == '\n') {
            chars.next();
            end += 1;
        }
        lines.push(if keepends { &s[start..end] } else { &s[start..i] });
        start = end;
    }
    if start < s.len() {
        lines.push(&s[start..]);
    }
    lines
}

fn is_cased(c: char) -> bool {
    c.is_uppercase() || c.is_lowercase()
}

fn is_digit_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '\u{B9}' | '\u{B2}' | '\u{B3}' | '\u{2070}' | '\u{2074}'..='\u{2079}')
}

fn format_template(template: &str, args: &[Value]) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut next_auto = 0;
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '{' => {
                let mut field = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(ch) => field.push(ch),
                        None => {
                            return Err(TextError::Format(
                                "single '{' encountered in format string".to_string(),
                            ))
                        }
                    }
                }
                let index = if field.is_empty() {
                    next_auto += 1;
                    next_auto - 1
                } else {
                    field.parse::<usize>().map_err(|_| {
                        TextError::Format(format!("unsupported replacement field {{{}}}", field))
                    })?
                };
                let arg = args.get(index).ok_or_else(|| {
                    TextError::Format(format!("replacement index {} out of range", index))
                })?;
                out.push_str(&arg.to_string_value());
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '}' => {
                return Err(TextError::Format(
                    "single '}' encountered in format string".to_string(),
                ))
            }
            _ => out.push(c),
        }
    }
    Ok(out)
}

/// Iterator over the chars of a text value, each as a one-char value
#[derive(Debug, Clone)]
pub struct TextChars<'a, T> {
    chars: std::str::Chars<'a>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: TextOps> Iterator for TextChars<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.chars.next().map(|c| T::from_text(c.to_string()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chars.size_hint()
    }
}

impl<T: TextOps> DoubleEndedIterator for TextChars<'_, T> {
    fn next_back(&mut self) -> Option<T> {
        self.chars.next_back().map(|c| T::from_text(c.to_string()))
    }
}

/// The conventional string operation set over an immutable text payload
///
/// Every operation leaves the receiver untouched and returns new values.
/// Arguments that should be text are taken as `&dyn TextLike` and checked,
/// failing with `TextError::ExpectedStringLike` for anything else.
pub trait TextOps: Sized {
    /// Borrow the wrapped text
    fn as_str(&self) -> &str;

    /// Build a value of the same kind around new content
    fn from_text(text: String) -> Self;

    /// Number of chars
    fn len(&self) -> usize {
        self.as_str().chars().count()
    }

    fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }

    /// The char at `index` as a one-char value
    fn get(&self, index: isize) -> Option<Self> {
        let len = self.len();
        let index = if index < 0 {
            len.checked_sub(index.unsigned_abs())?
        } else {
            index.unsigned_abs()
        };
        self.as_str()
            .chars()
            .nth(index)
            .map(|c| Self::from_text(c.to_string()))
    }

    /// The chars in `start..end`, with out-of-range bounds clamped
    fn slice(&self, start: Option<isize>, end: Option<isize>) -> Self {
        let s = self.as_str();
        let (start, end) = resolve_bounds(start, end, self.len());
        let from = byte_offset(s, start);
        let to = byte_offset(s, end);
        Self::from_text(s[from..to].to_string())
    }

    /// Extended slice taking every `step`-th char; negative steps walk backwards
    ///
    /// # Errors
    ///
    /// Fails with `TextError::ZeroStep` when `step` is 0.
    fn slice_step(&self, start: Option<isize>, end: Option<isize>, step: isize) -> Result<Self> {
        if step == 0 {
            return Err(TextError::ZeroStep);
        }
        let chars: Vec<char> = self.as_str().chars().collect();
        let len = chars.len() as isize;

        let picked: String = if step > 0 {
            let (start, end) = resolve_bounds(start, end, chars.len());
            chars[start..end].iter().step_by(step.unsigned_abs()).collect()
        } else {
            let adjust = |index: isize| -> isize {
                if index < 0 {
                    (index + len).max(-1)
                } else {
                    index.min(len - 1)
                }
            };
            let start = start.map_or(len - 1, adjust);
            let end = end.map_or(-1, adjust);
            let mut out = String::new();
            let mut i = start;
            while i > end {
                if let Some(&c) = usize::try_from(i).ok().and_then(|i| chars.get(i)) {
                    out.push(c);
                }
                i += step;
            }
            out
        };
        Ok(Self::from_text(picked))
    }

    /// Iterate over one-char values; each call starts a fresh pass
    fn iter(&self) -> TextChars<'_, Self> {
        TextChars {
            chars: self.as_str().chars(),
            _marker: PhantomData,
        }
    }

    fn concat(&self, other: &dyn TextLike) -> Result<Self> {
        let other = other.to_text()?;
        let mut text = String::with_capacity(self.as_str().len() + other.len());
        text.push_str(self.as_str());
        text.push_str(other);
        Ok(Self::from_text(text))
    }

    fn repeat(&self, count: usize) -> Self {
        Self::from_text(self.as_str().repeat(count))
    }

    /// Substitute `{}`/`{N}` fields with `args`; `{{` and `}}` are literal braces
    ///
    /// # Errors
    ///
    /// Fails on unmatched braces, non-numeric fields or missing arguments.
    fn format(&self, args: &[Value]) -> Result<Self> {
        format_template(self.as_str(), args).map(Self::from_text)
    }

    fn upper(&self) -> Self {
        Self::from_text(self.as_str().to_uppercase())
    }

    fn lower(&self) -> Self {
        Self::from_text(self.as_str().to_lowercase())
    }

    fn casefold(&self) -> Self {
        Self::from_text(self.as_str().to_lowercase())
    }

    /// Uppercase the first cased char of every word and lowercase the rest
    fn title(&self) -> Self {
        let mut out = String::with_capacity(self.as_str().len());
        let mut prev_cased = false;
        for c in self.as_str().chars() {
            if prev_cased {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_cased = is_cased(c);
        }
        Self::from_text(out)
    }

    /// Swap the case of every char; chars without a single-char mapping are kept
    fn swapcase(&self) -> Self {
        let swapped = self
            .as_str()
            .chars()
            .map(|c| {
                if c.is_uppercase() {
                    simple_lower(c)
                } else if c.is_lowercase() {
                    simple_upper(c)
                } else {
                    c
                }
            })
            .collect();
        Self::from_text(swapped)
    }

    /// Uppercase the first char and lowercase the rest
    fn capitalize(&self) -> Self {
        let mut chars = self.as_str().chars();
        let mut out = String::with_capacity(self.as_str().len());
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            for c in chars {
                out.extend(c.to_lowercase());
            }
        }
        Self::from_text(out)
    }

    /// Trim whitespace, or any of `chars` when given, from both ends
    fn strip(&self, chars: Option<&dyn TextLike>) -> Result<Self> {
        let s = self.as_str();
        let trimmed = match optional_text(chars)? {
            Some(set) => s.trim_matches(|c: char| set.contains(c)),
            None => s.trim(),
        };
        Ok(Self::from_text(trimmed.to_string()))
    }

    fn lstrip(&self, chars: Option<&dyn TextLike>) -> Result<Self> {
        let s = self.as_str();
        let trimmed = match optional_text(chars)? {
            Some(set) => s.trim_start_matches(|c: char| set.contains(c)),
            None => s.trim_start(),
        };
        Ok(Self::from_text(trimmed.to_string()))
    }

    fn rstrip(&self, chars: Option<&dyn TextLike>) -> Result<Self> {
        let s = self.as_str();
        let trimmed = match optional_text(chars)? {
            Some(set) => s.trim_end_matches(|c: char| set.contains(c)),
            None => s.trim_end(),
        };
        Ok(Self::from_text(trimmed.to_string()))
    }

    /// Center in a field of `width` chars padded with `fill`
    fn center(&self, width: usize, fill: char) -> Self {
        let len = self.len();
        if width <= len {
            return Self::from_text(self.as_str().to_string());
        }
        let margin = width - len;
        let left = margin / 2 + (margin & width & 1);
        let mut out = String::with_capacity(self.as_str().len() + margin);
        out.extend(std::iter::repeat(fill).take(left));
        out.push_str(self.as_str());
        out.extend(std::iter::repeat(fill).take(margin - left));
        Self::from_text(out)
    }

    fn ljust(&self, width: usize, fill: char) -> Self {
        let pad = width.saturating_sub(self.len());
        let mut out = self.as_str().to_string();
        out.extend(std::iter::repeat(fill).take(pad));
        Self::from_text(out)
    }

    fn rjust(&self, width: usize, fill: char) -> Self {
        let pad = width.saturating_sub(self.len());
        let mut out: String = std::iter::repeat(fill).take(pad).collect();
        out.push_str(self.as_str());
        Self::from_text(out)
    }

    /// Left-pad with zeros to `width`, keeping a leading sign in front
    fn zfill(&self, width: usize) -> Self {
        let s = self.as_str();
        let pad = width.saturating_sub(self.len());
        let (sign, digits) = match s.chars().next() {
            Some(c @ ('+' | '-')) => s.split_at(c.len_utf8()),
            _ => ("", s),
        };
        let mut out = String::with_capacity(s.len() + pad);
        out.push_str(sign);
        out.extend(std::iter::repeat('0').take(pad));
        out.push_str(digits);
        Self::from_text(out)
    }

    /// Replace tabs with spaces up to the next multiple of `tabsize` columns
    fn expandtabs(&self, tabsize: usize) -> Self {
        let mut out = String::with_capacity(self.as_str().len());
        let mut column = 0;
        for c in self.as_str().chars() {
            match c {
                '\t' => {
                    if tabsize > 0 {
                        let pad = tabsize - column % tabsize;
                        out.extend(std::iter::repeat(' ').take(pad));
                        column += pad;
                    }
                }
                '\n' | '\r' => {
                    out.push(c);
                    column = 0;
                }
                _ => {
                    out.push(c);
                    column += 1;
                }
            }
        }
        Self::from_text(out)
    }

    fn contains(&self, sub: &dyn TextLike) -> Result<bool> {
        Ok(self.as_str().contains(sub.to_text()?))
    }

    fn starts_with(&self, prefix: &dyn TextLike) -> Result<bool> {
        Ok(self.as_str().starts_with(prefix.to_text()?))
    }

    fn ends_with(&self, suffix: &dyn TextLike) -> Result<bool> {
        Ok(self.as_str().ends_with(suffix.to_text()?))
    }

    fn remove_prefix(&self, prefix: &dyn TextLike) -> Result<Self> {
        let s = self.as_str();
        let rest = s.strip_prefix(prefix.to_text()?).unwrap_or(s);
        Ok(Self::from_text(rest.to_string()))
    }

    fn remove_suffix(&self, suffix: &dyn TextLike) -> Result<Self> {
        let s = self.as_str();
        let rest = s.strip_suffix(suffix.to_text()?).unwrap_or(s);
        Ok(Self::from_text(rest.to_string()))
    }

    /// Char index of the first occurrence of `sub`
    fn find(&self, sub: &dyn TextLike) -> Result<Option<usize>> {
        let s = self.as_str();
        Ok(s.find(sub.to_text()?).map(|offset| char_index(s, offset)))
    }

    /// Char index of the last occurrence of `sub`
    fn rfind(&self, sub: &dyn TextLike) -> Result<Option<usize>> {
        let s = self.as_str();
        Ok(s.rfind(sub.to_text()?).map(|offset| char_index(s, offset)))
    }

    /// Like `find`, but a missing substring is an error
    fn index(&self, sub: &dyn TextLike) -> Result<usize> {
        self.find(sub)?.ok_or(TextError::SubstringNotFound)
    }

    fn rindex(&self, sub: &dyn TextLike) -> Result<usize> {
        self.rfind(sub)?.ok_or(TextError::SubstringNotFound)
    }

    /// Number of non-overlapping occurrences of `sub`
    fn count(&self, sub: &dyn TextLike) -> Result<usize> {
        Ok(self.as_str().matches(sub.to_text()?).count())
    }

    /// Split on `sep`, or on whitespace runs when `sep` is not given
    ///
    /// At most `maxsplit` splits are made from the left; negative means no limit.
    ///
    /// # Errors
    ///
    /// Fails when `sep` is empty or not text-like.
    fn split(&self, sep: Option<&dyn TextLike>, maxsplit: isize) -> Result<Vec<Self>> {
        let s = self.as_str();
        let pieces: Vec<&str> = match optional_text(sep)? {
            None => split_whitespace(s, limit(maxsplit)),
            Some("") => return Err(TextError::EmptySeparator),
            Some(sep) => match limit(maxsplit) {
                Some(max) => s.splitn(max + 1, sep).collect(),
                None => s.split(sep).collect(),
            },
        };
        Ok(pieces.into_iter().map(|p| Self::from_text(p.to_string())).collect())
    }

    /// Like `split`, but splits are taken from the right
    fn rsplit(&self, sep: Option<&dyn TextLike>, maxsplit: isize) -> Result<Vec<Self>> {
        let s = self.as_str();
        let pieces: Vec<&str> = match optional_text(sep)? {
            None => rsplit_whitespace(s, limit(maxsplit)),
            Some("") => return Err(TextError::EmptySeparator),
            Some(sep) => {
                let mut pieces: Vec<&str> = match limit(maxsplit) {
                    Some(max) => s.rsplitn(max + 1, sep).collect(),
                    None => s.rsplit(sep).collect(),
                };
                pieces.reverse();
                pieces
            }
        };
        Ok(pieces.into_iter().map(|p| Self::from_text(p.to_string())).collect())
    }

    /// Split at line boundaries, optionally keeping the line endings
    fn splitlines(&self, keepends: bool) -> Vec<Self> {
        splitlines(self.as_str(), keepends)
            .into_iter()
            .map(|line| Self::from_text(line.to_string()))
            .collect()
    }

    /// Split around the first `sep`: `(before, sep, after)`, or `(self, "", "")`
    fn partition(&self, sep: &dyn TextLike) -> Result<(Self, Self, Self)> {
        let s = self.as_str();
        let sep = sep.to_text()?;
        if sep.is_empty() {
            return Err(TextError::EmptySeparator);
        }
        let (before, matched, after) = match s.find(sep) {
            Some(i) => (&s[..i], sep, &s[i + sep.len()..]),
            None => (s, "", ""),
        };
        Ok((
            Self::from_text(before.to_string()),
            Self::from_text(matched.to_string()),
            Self::from_text(after.to_string()),
        ))
    }

    /// Split around the last `sep`: `(before, sep, after)`, or `("", "", self)`
    fn rpartition(&self, sep: &dyn TextLike) -> Result<(Self, Self, Self)> {
        let s = self.as_str();
        let sep = sep.to_text()?;
        if sep.is_empty() {
            return Err(TextError::EmptySeparator);
        }
        let (before, matched, after) = match s.rfind(sep) {
            Some(i) => (&s[..i], sep, &s[i + sep.len()..]),
            None => ("", "", s),
        };
        Ok((
            Self::from_text(before.to_string()),
            Self::from_text(matched.to_string()),
            Self::from_text(after.to_string()),
        ))
    }

    /// Concatenate `items` with this value between each
    fn join<I, T>(&self, items: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: TextLike,
    {
        let mut out = String::new();
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                out.push_str(self.as_str());
            }
            out.push_str(item.to_text()?);
        }
        Ok(Self::from_text(out))
    }

    /// Replace the first `count` occurrences of `old` (all when negative)
    fn replace(&self, old: &dyn TextLike, new: &dyn TextLike, count: isize) -> Result<Self> {
        let replaced = replace_str(self.as_str(), old.to_text()?, new.to_text()?, count);
        Ok(Self::from_text(replaced))
    }

    /// Map chars through `table`; unmapped chars are kept
    fn translate(&self, table: &TranslationTable) -> Self {
        let mut out = String::with_capacity(self.as_str().len());
        for c in self.as_str().chars() {
            match table.get(&c) {
                Some(Some(mapped)) => out.push_str(mapped),
                Some(None) => {}
                None => out.push(c),
            }
        }
        Self::from_text(out)
    }

    fn is_alnum(&self) -> bool {
        !self.is_empty() && self.as_str().chars().all(char::is_alphanumeric)
    }

    fn is_alpha(&self) -> bool {
        !self.is_empty() && self.as_str().chars().all(char::is_alphabetic)
    }

    fn is_ascii(&self) -> bool {
        self.as_str().is_ascii()
    }

    fn is_decimal(&self) -> bool {
        !self.is_empty() && self.as_str().chars().all(|c| c.is_ascii_digit())
    }

    fn is_digit(&self) -> bool {
        !self.is_empty() && self.as_str().chars().all(is_digit_char)
    }

    fn is_numeric(&self) -> bool {
        !self.is_empty() && self.as_str().chars().all(char::is_numeric)
    }

    fn is_space(&self) -> bool {
        !self.is_empty() && self.as_str().chars().all(char::is_whitespace)
    }

    /// At least one cased char and no uppercase chars
    fn is_lower(&self) -> bool {
        let s = self.as_str();
        s.chars().any(is_cased) && !s.chars().any(char::is_uppercase)
    }

    /// At least one cased char and no lowercase chars
    fn is_upper(&self) -> bool {
        let s = self.as_str();
        s.chars().any(is_cased) && !s.chars().any(char::is_lowercase)
    }

    /// Uppercase chars only start words and lowercase chars only follow cased ones
    fn is_title(&self) -> bool {
        let mut prev_cased = false;
        let mut any_cased = false;
        for c in self.as_str().chars() {
            if c.is_uppercase() {
                if prev_cased {
                    return false;
                }
                prev_cased = true;
                any_cased = true;
            } else if c.is_lowercase() {
                if !prev_cased {
                    return false;
                }
                prev_cased = true;
                any_cased = true;
            } else {
                prev_cased = false;
            }
        }
        any_cased
    }

    fn is_identifier(&self) -> bool {
        let mut chars = self.as_str().chars();
        match chars.next() {
            Some(first) if first == '_' || first.is_alphabetic() => {
                chars.all(|c| c == '_' || c.is_alphanumeric())
            }
            _ => false,
        }
    }

    fn is_printable(&self) -> bool {
        self.as_str()
            .chars()
            .all(|c| c == ' ' || !(c.is_control() || c.is_whitespace()))
    }
}
