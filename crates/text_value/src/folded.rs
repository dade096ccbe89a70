//! Case-insensitive, case-preserving text value
//!
//! All matching runs against folded text while every returned piece is cut
//! from the original content. Folding maps each char through its
//! single-char uppercase and then lowercase mapping, so `ς`, `σ` and `Σ`
//! fold alike and the folded view has exactly as many chars as the
//! original. Byte lengths can differ (KELVIN SIGN folds to `k`), so
//! positions found in the folded view are carried back through char
//! boundaries.
//!
//! Separator operations never split the folded view. They locate matches
//! with a literal matcher over the folded text and slice the original at
//! the corresponding offsets.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Range;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TextError};
use crate::ops::{
    byte_offset, char_index, limit, replace_str, rsplit_whitespace, simple_lower, simple_upper,
    split_whitespace, TextChars, TextOps,
};
use crate::text::TextValue;
use crate::text_like::{optional_text, TextLike};

fn fold(text: &str) -> String {
    text.chars().map(|c| simple_lower(simple_upper(c))).collect()
}

/// Compile a matcher for a folded literal separator
fn literal_matcher(folded_sep: &str) -> Result<Regex> {
    tracing::trace!(separator = folded_sep, "Compiling folded separator matcher");
    Regex::new(&regex_lite::escape(folded_sep)).map_err(|e| TextError::Pattern(e.to_string()))
}

/// Text of `s` around and between the given match spans
fn pieces_around<'a>(s: &'a str, spans: &[Range<usize>]) -> Vec<&'a str> {
    let mut pieces = Vec::with_capacity(spans.len() + 1);
    let mut start = 0;
    for span in spans {
        pieces.push(&s[start..span.start]);
        start = span.end;
    }
    pieces.push(&s[start..]);
    pieces
}

/// An immutable string that compares, hashes and searches case-insensitively
/// while keeping its original casing in everything it returns
///
/// `CaseFoldedTextValue` and [`TextValue`] are deliberately not comparable
/// with each other.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CaseFoldedTextValue {
    text: String,
    /// Always `fold(text)`
    folded: String,
}

impl CaseFoldedTextValue {
    /// Create a new case-folded text value
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let folded = fold(&text);
        Self { text, folded }
    }

    /// Create a value from any text-like argument
    ///
    /// # Errors
    ///
    /// Fails with `TextError::ExpectedStringLike` for non-text values.
    pub fn try_new(value: &dyn TextLike) -> Result<Self> {
        Ok(Self::new(value.to_text()?))
    }

    /// The folded text used for comparisons
    pub fn folded(&self) -> &str {
        &self.folded
    }

    /// Case-sensitive copy of the original text
    pub fn to_text_value(&self) -> TextValue {
        TextValue::new(self.text.as_str())
    }

    /// Unwrap into the original string
    pub fn into_string(self) -> String {
        self.text
    }

    /// A value whose content is the folded text
    fn folded_value(&self) -> Self {
        Self {
            text: self.folded.clone(),
            folded: self.folded.clone(),
        }
    }

    /// Byte spans in the original text of every non-overlapping match of `sep`
    fn match_spans(&self, sep: &str) -> Result<Vec<Range<usize>>> {
        let matcher = literal_matcher(&fold(sep))?;

        // (folded offset, original offset) at every char boundary
        let boundaries: Vec<(usize, usize)> = self
            .folded
            .char_indices()
            .map(|(i, _)| i)
            .zip(self.text.char_indices().map(|(i, _)| i))
            .chain(std::iter::once((self.folded.len(), self.text.len())))
            .collect();
        let original = |offset: usize| {
            let i = boundaries.partition_point(|&(folded, _)| folded < offset);
            boundaries.get(i).map_or(self.text.len(), |&(_, original)| original)
        };

        Ok(matcher
            .find_iter(&self.folded)
            .map(|m| original(m.start())..original(m.end()))
            .collect())
    }

    fn wrap_all(pieces: Vec<&str>) -> Vec<Self> {
        pieces.into_iter().map(Self::new).collect()
    }
}

impl TextOps for CaseFoldedTextValue {
    fn as_str(&self) -> &str {
        &self.text
    }

    fn from_text(text: String) -> Self {
        Self::new(text)
    }

    /// Built from the cached folded text
    fn lower(&self) -> Self {
        self.folded_value()
    }

    fn casefold(&self) -> Self {
        self.folded_value()
    }

    fn contains(&self, sub: &dyn TextLike) -> Result<bool> {
        Ok(self.folded.contains(&fold(sub.to_text()?)))
    }

    fn starts_with(&self, prefix: &dyn TextLike) -> Result<bool> {
        Ok(self.folded.starts_with(&fold(prefix.to_text()?)))
    }

    fn ends_with(&self, suffix: &dyn TextLike) -> Result<bool> {
        Ok(self.folded.ends_with(&fold(suffix.to_text()?)))
    }

    fn remove_prefix(&self, prefix: &dyn TextLike) -> Result<Self> {
        let prefix = fold(prefix.to_text()?);
        let rest = if self.folded.starts_with(&prefix) {
            &self.text[byte_offset(&self.text, prefix.chars().count())..]
        } else {
            self.text.as_str()
        };
        Ok(Self::new(rest))
    }

    fn remove_suffix(&self, suffix: &dyn TextLike) -> Result<Self> {
        let suffix = fold(suffix.to_text()?);
        let rest = if self.folded.ends_with(&suffix) {
            let keep = self.text.chars().count() - suffix.chars().count();
            &self.text[..byte_offset(&self.text, keep)]
        } else {
            self.text.as_str()
        };
        Ok(Self::new(rest))
    }

    fn find(&self, sub: &dyn TextLike) -> Result<Option<usize>> {
        let sub = fold(sub.to_text()?);
        Ok(self
            .folded
            .find(&sub)
            .map(|offset| char_index(&self.folded, offset)))
    }

    fn rfind(&self, sub: &dyn TextLike) -> Result<Option<usize>> {
        let sub = fold(sub.to_text()?);
        Ok(self
            .folded
            .rfind(&sub)
            .map(|offset| char_index(&self.folded, offset)))
    }

    fn count(&self, sub: &dyn TextLike) -> Result<usize> {
        Ok(self.folded.matches(&fold(sub.to_text()?)).count())
    }

    fn split(&self, sep: Option<&dyn TextLike>, maxsplit: isize) -> Result<Vec<Self>> {
        let sep = match optional_text(sep)? {
            None => return Ok(Self::wrap_all(split_whitespace(&self.text, limit(maxsplit)))),
            Some("") => return Err(TextError::EmptySeparator),
            Some(sep) => sep,
        };
        let spans = self.match_spans(sep)?;
        let take = limit(maxsplit).map_or(spans.len(), |max| max.min(spans.len()));
        Ok(Self::wrap_all(pieces_around(&self.text, &spans[..take])))
    }

    fn rsplit(&self, sep: Option<&dyn TextLike>, maxsplit: isize) -> Result<Vec<Self>> {
        let sep = match optional_text(sep)? {
            None => return Ok(Self::wrap_all(rsplit_whitespace(&self.text, limit(maxsplit)))),
            Some("") => return Err(TextError::EmptySeparator),
            Some(sep) => sep,
        };
        let spans = self.match_spans(sep)?;
        let skip = limit(maxsplit).map_or(0, |max| spans.len().saturating_sub(max));
        Ok(Self::wrap_all(pieces_around(&self.text, &spans[skip..])))
    }

    fn partition(&self, sep: &dyn TextLike) -> Result<(Self, Self, Self)> {
        let sep = sep.to_text()?;
        if sep.is_empty() {
            return Err(TextError::EmptySeparator);
        }
        let spans = self.match_spans(sep)?;
        let s = &self.text;
        Ok(match spans.first() {
            Some(span) => (
                Self::new(&s[..span.start]),
                Self::new(&s[span.clone()]),
                Self::new(&s[span.end..]),
            ),
            None => (Self::new(s.as_str()), Self::new(""), Self::new("")),
        })
    }

    fn rpartition(&self, sep: &dyn TextLike) -> Result<(Self, Self, Self)> {
        let sep = sep.to_text()?;
        if sep.is_empty() {
            return Err(TextError::EmptySeparator);
        }
        let spans = self.match_spans(sep)?;
        let s = &self.text;
        Ok(match spans.last() {
            Some(span) => (
                Self::new(&s[..span.start]),
                Self::new(&s[span.clone()]),
                Self::new(&s[span.end..]),
            ),
            None => (Self::new(""), Self::new(""), Self::new(s.as_str())),
        })
    }

    fn replace(&self, old: &dyn TextLike, new: &dyn TextLike, count: isize) -> Result<Self> {
        let old = old.to_text()?;
        let new = new.to_text()?;
        if old.is_empty() {
            return Ok(Self::new(replace_str(&self.text, old, new, count)));
        }

        let spans = self.match_spans(old)?;
        let take = limit(count).map_or(spans.len(), |max| max.min(spans.len()));
        let mut out = String::with_capacity(self.text.len());
        let mut start = 0;
        for span in &spans[..take] {
            out.push_str(&self.text[start..span.start]);
            out.push_str(new);
            start = span.end;
        }
        out.push_str(&self.text[start..]);
        Ok(Self::new(out))
    }
}

impl TextLike for CaseFoldedTextValue {
    fn to_text(&self) -> Result<&str> {
        Ok(&self.text)
    }
}

impl PartialEq for CaseFoldedTextValue {
    fn eq(&self, other: &Self) -> bool {
        self.folded == other.folded
    }
}

impl Eq for CaseFoldedTextValue {}

impl Hash for CaseFoldedTextValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.folded.hash(state);
    }
}

impl PartialOrd for CaseFoldedTextValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CaseFoldedTextValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.folded.cmp(&other.folded)
    }
}

impl PartialEq<str> for CaseFoldedTextValue {
    fn eq(&self, other: &str) -> bool {
        self.folded == fold(other)
    }
}

impl PartialEq<&str> for CaseFoldedTextValue {
    fn eq(&self, other: &&str) -> bool {
        *self == **other
    }
}

impl PartialEq<String> for CaseFoldedTextValue {
    fn eq(&self, other: &String) -> bool {
        *self == **other
    }
}

impl fmt::Display for CaseFoldedTextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for CaseFoldedTextValue {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl From<String> for CaseFoldedTextValue {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl From<&str> for CaseFoldedTextValue {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<TextValue> for CaseFoldedTextValue {
    fn from(value: TextValue) -> Self {
        Self::new(value.into_string())
    }
}

impl From<CaseFoldedTextValue> for String {
    fn from(value: CaseFoldedTextValue) -> Self {
        value.text
    }
}

impl<'a> IntoIterator for &'a CaseFoldedTextValue {
    type Item = CaseFoldedTextValue;
    type IntoIter = TextChars<'a, CaseFoldedTextValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::UNLIMITED;
    use crate::text_like::Value;
    use std::collections::{HashMap, HashSet};

    fn cf(s: &str) -> CaseFoldedTextValue {
        CaseFoldedTextValue::new(s)
    }

    fn strings(values: Vec<CaseFoldedTextValue>) -> Vec<String> {
        values.into_iter().map(CaseFoldedTextValue::into_string).collect()
    }

    fn parts(
        (a, b, c): (CaseFoldedTextValue, CaseFoldedTextValue, CaseFoldedTextValue),
    ) -> [String; 3] {
        [a.into_string(), b.into_string(), c.into_string()]
    }

    #[test]
    fn test_folded_cache() {
        let value = cf("ResRef_01");
        assert_eq!(value.as_str(), "ResRef_01");
        assert_eq!(value.folded(), "resref_01");
    }

    #[test]
    fn test_equality_ignores_case() {
        assert_eq!(cf("Hello"), cf("hELLO"));
        assert_ne!(cf("Hello"), cf("Help"));
        assert_eq!(cf("Hello"), "HELLO");
        assert_eq!(cf("Hello"), String::from("hello"));
        assert_eq!(cf("a").cmp(&cf("B")), Ordering::Less);
    }

    #[test]
    fn test_case_different_keys_collide() {
        let mut map = HashMap::new();
        map.insert(cf("p_bastila"), 1);
        map.insert(cf("P_Bastila"), 2);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&cf("P_BASTILA")), Some(&2));

        let set: HashSet<_> = ["abc", "ABC", "Abc"].into_iter().map(cf).collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_contains_and_find() {
        let value = cf("xxABCxx");
        assert!(value.contains(&"abc").unwrap());
        assert!(value.contains(&"ABC").unwrap());
        assert_eq!(value.find(&"bC").unwrap(), Some(3));
        assert_eq!(value.rfind(&"X").unwrap(), Some(6));
        assert_eq!(value.index(&"CX").unwrap(), 4);
        assert_eq!(value.count(&"X").unwrap(), 4);
        assert!(value.index(&"zz").is_err());
    }

    #[test]
    fn test_prefix_suffix_preserve_case() {
        let value = cf("Module.Name");
        assert!(value.starts_with(&"module").unwrap());
        assert!(value.ends_with(&"NAME").unwrap());
        assert_eq!(value.remove_prefix(&"MODULE.").unwrap().as_str(), "Name");
        assert_eq!(value.remove_suffix(&".name").unwrap().as_str(), "Module");
    }

    #[test]
    fn test_split_preserves_case() {
        let value = cf("Foo::Bar::Baz");
        assert_eq!(strings(value.split(Some(&"::"), UNLIMITED).unwrap()), ["Foo", "Bar", "Baz"]);

        let value = cf("fooXbarXbaz");
        assert_eq!(strings(value.split(Some(&"x"), UNLIMITED).unwrap()), ["foo", "bar", "baz"]);
    }

    #[test]
    fn test_split_maxsplit() {
        let value = cf("a.b.c");
        assert_eq!(strings(value.split(Some(&"."), 1).unwrap()), ["a", "b.c"]);
        assert_eq!(strings(value.rsplit(Some(&"."), 1).unwrap()), ["a.b", "c"]);
        assert_eq!(strings(value.split(Some(&"."), 0).unwrap()), ["a.b.c"]);
        assert_eq!(strings(value.rsplit(Some(&"."), 0).unwrap()), ["a.b.c"]);
        assert_eq!(strings(value.rsplit(Some(&"."), -5).unwrap()), ["a", "b", "c"]);
        assert_eq!(strings(value.split(Some(&"."), 10).unwrap()), ["a", "b", "c"]);
    }

    #[test]
    fn test_rsplit_cased_separator() {
        let value = cf("oneANDtwoandTHREE");
        assert_eq!(strings(value.rsplit(Some(&"And"), 1).unwrap()), ["oneANDtwo", "THREE"]);
    }

    #[test]
    fn test_split_separator_is_literal() {
        let value = cf("a.*b.*c");
        assert_eq!(strings(value.split(Some(&".*"), UNLIMITED).unwrap()), ["a", "b", "c"]);
        assert_eq!(strings(cf("abc").split(Some(&"."), UNLIMITED).unwrap()), ["abc"]);
    }

    #[test]
    fn test_split_whitespace_and_errors() {
        assert_eq!(strings(cf(" A  b ").split(None, UNLIMITED).unwrap()), ["A", "b"]);
        assert_eq!(strings(cf("A b c").rsplit(Some(&Value::Null), 1).unwrap()), ["A b", "c"]);
        assert_eq!(cf("ab").split(Some(&""), UNLIMITED).unwrap_err(), TextError::EmptySeparator);
        assert!(matches!(
            cf("ab").split(Some(&Value::Number(3.0)), UNLIMITED),
            Err(TextError::ExpectedStringLike { .. })
        ));
    }

    #[test]
    fn test_partition_preserves_case() {
        let value = cf("KeyEQvalueEqRest");
        assert_eq!(
            parts(value.partition(&"eq").unwrap()),
            ["Key", "EQ", "valueEqRest"]
        );
        assert_eq!(
            parts(value.rpartition(&"EQ").unwrap()),
            ["KeyEQvalue", "Eq", "Rest"]
        );
        assert_eq!(
            parts(value.partition(&"zz").unwrap()),
            ["KeyEQvalueEqRest", "", ""]
        );
        assert_eq!(
            parts(value.rpartition(&"zz").unwrap()),
            ["", "", "KeyEQvalueEqRest"]
        );
    }

    #[test]
    fn test_replace_preserves_surrounding_case() {
        let value = cf("Hello World, hello World");
        assert_eq!(
            value.replace(&"HELLO", &"Bye", UNLIMITED).unwrap().as_str(),
            "Bye World, Bye World"
        );
        assert_eq!(
            value.replace(&"world", &"There", 1).unwrap().as_str(),
            "Hello There, hello World"
        );
        assert_eq!(value.replace(&"xyz", &"-", UNLIMITED).unwrap().as_str(), value.as_str());
    }

    #[test]
    fn test_replace_empty_defers_to_case_sensitive() {
        assert_eq!(cf("Ab").replace(&"", &"-", UNLIMITED).unwrap().as_str(), "-A-b-");
    }

    #[test]
    fn test_lower_uses_cache() {
        let lowered = cf("MiXeD").lower();
        assert_eq!(lowered.as_str(), "mixed");
        assert_eq!(lowered.folded(), "mixed");
        assert_eq!(lowered.lower().as_str(), lowered.as_str());
    }

    #[test]
    fn test_derived_values_keep_type() {
        let upper: CaseFoldedTextValue = cf("abc").upper();
        assert_eq!(upper.as_str(), "ABC");
        assert_eq!(upper, cf("abc"));
        let first = cf("Abc").iter().next().unwrap();
        assert_eq!(first.as_str(), "A");
    }

    #[test]
    fn test_non_ascii_equality_and_search() {
        assert_eq!(cf("École"), cf("École").swapcase());
        assert_eq!(cf("ÉCOLE"), "école");
        assert!(cf("ÉCOLE").contains(&"école").unwrap());
        // Final and medial sigma fold alike
        assert_eq!(cf("ΟΔΟΣ"), cf("οδο\u{3C2}"));
        assert_eq!(cf("ΟΔΟΣ").find(&"σ").unwrap(), Some(3));
    }

    #[test]
    fn test_non_ascii_separators_preserve_case() {
        let value = cf("StraßeÄrgerätselfinal");
        assert_eq!(
            strings(value.split(Some(&"ä"), UNLIMITED).unwrap()),
            ["Straße", "rger", "tselfinal"]
        );
        assert_eq!(
            parts(value.rpartition(&"Ä").unwrap()),
            ["StraßeÄrger", "ä", "tselfinal"]
        );
    }

    #[test]
    fn test_offsets_survive_byte_length_changes() {
        // KELVIN SIGN is three bytes but folds to the one-byte `k`
        let value = cf("Zwei\u{212A}Drei\u{212A}vier");
        assert_eq!(value.folded(), "zweikdreikvier");
        assert_eq!(
            parts(value.partition(&"K").unwrap()),
            ["Zwei", "\u{212A}", "Drei\u{212A}vier"]
        );
        assert_eq!(strings(value.rsplit(Some(&"k"), 1).unwrap()), ["Zwei\u{212A}Drei", "vier"]);
        assert_eq!(value.find(&"dRei").unwrap(), Some(5));
        assert_eq!(value.remove_prefix(&"zweik").unwrap().as_str(), "Drei\u{212A}vier");
        assert_eq!(value.remove_suffix(&"KVIER").unwrap().as_str(), "Zwei\u{212A}Drei");
        assert_eq!(
            value.replace(&"k", &"+", UNLIMITED).unwrap().as_str(),
            "Zwei+Drei+vier"
        );
    }

    #[test]
    fn test_casefold_matches_lower() {
        let value = cf("Straße \u{212A}");
        assert_eq!(value.casefold().as_str(), value.lower().as_str());
        assert_eq!(value.casefold().as_str(), "straße k");
    }

    #[test]
    fn test_non_ascii_offsets() {
        let value = cf("ÉcoleXécole");
        assert_eq!(value.find(&"x").unwrap(), Some(5));
        assert_eq!(strings(value.split(Some(&"X"), UNLIMITED).unwrap()), ["École", "école"]);
    }

    #[test]
    fn test_serde_round_trip() {
        let json = serde_json::to_string(&cf("MixedCase")).unwrap();
        assert_eq!(json, "\"MixedCase\"");
        let back: CaseFoldedTextValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back.as_str(), "MixedCase");
        assert_eq!(back.folded(), "mixedcase");
    }
}
