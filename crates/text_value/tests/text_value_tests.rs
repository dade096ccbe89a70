//! Integration tests for the text value types
//! Covers the case-insensitive contract and the behaviour shared by both wrappers

use proptest::prelude::*;
use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use text_value::{
    compare_and_format, ireplace, CaseFoldedTextValue, TextError, TextOps, TextValue, Value,
    UNLIMITED,
};

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

fn strings<T: TextOps>(values: Vec<T>) -> Vec<String> {
    values.iter().map(|v| v.as_str().to_string()).collect()
}

#[test]
fn test_resource_lookup_table() {
    let mut resources: HashMap<CaseFoldedTextValue, &str> = HashMap::new();
    resources.insert(CaseFoldedTextValue::new("N_CommonerM01"), "commoner.utc");
    resources.insert(CaseFoldedTextValue::new("P_HK47"), "hk47.utc");

    assert_eq!(resources.get(&CaseFoldedTextValue::new("n_commonerm01")), Some(&"commoner.utc"));
    assert_eq!(resources.get(&CaseFoldedTextValue::new("p_hk47")), Some(&"hk47.utc"));

    // Stored keys keep their original casing
    let mut keys: Vec<String> = resources.keys().map(|k| k.to_string()).collect();
    keys.sort();
    assert_eq!(keys, ["N_CommonerM01", "P_HK47"]);
}

#[test]
fn test_case_sensitive_table_keeps_distinct_keys() {
    let mut table = HashMap::new();
    table.insert(TextValue::new("Key"), 1);
    table.insert(TextValue::new("key"), 2);
    assert_eq!(table.len(), 2);
}

#[test]
fn test_lowered_value_contains_any_casing() {
    let lowered = CaseFoldedTextValue::new("xxABCxx").lower();
    assert!(lowered.contains(&"ABC").unwrap());
    assert!(lowered.contains(&"abc").unwrap());
    assert!(lowered.contains(&"aBc").unwrap());
}

#[test]
fn test_split_and_rsplit_symmetry() {
    for (value, sep, left, right) in [
        ("a.b.c", ".", ["a", "b.c"], ["a.b", "c"]),
        ("aXbxc", "x", ["a", "bxc"], ["aXb", "c"]),
    ] {
        let folded = CaseFoldedTextValue::new(value);
        assert_eq!(strings(folded.split(Some(&sep), 1).unwrap()), left);
        assert_eq!(strings(folded.rsplit(Some(&sep), 1).unwrap()), right);
    }

    let plain = TextValue::new("a.b.c");
    assert_eq!(strings(plain.split(Some(&"."), 1).unwrap()), ["a", "b.c"]);
    assert_eq!(strings(plain.rsplit(Some(&"."), 1).unwrap()), ["a.b", "c"]);
}

#[test]
fn test_non_ascii_identifiers_compare_equal() {
    let value = CaseFoldedTextValue::new("École");
    assert_eq!(value, value.swapcase());
    assert!(CaseFoldedTextValue::new("ÉCOLE").contains(&"école").unwrap());
    assert_eq!(ireplace("ÉCOLE", "école", "x"), "x");
    assert_eq!(
        strings(CaseFoldedTextValue::new("StraßeÄrger").split(Some(&"ä"), UNLIMITED).unwrap()),
        ["Straße", "rger"]
    );
}

#[test]
fn test_wrappers_accept_each_other_as_arguments() {
    let plain = TextValue::new("Hello World");
    let folded = CaseFoldedTextValue::new("WORLD");
    assert!(!plain.contains(&folded).unwrap());
    assert!(CaseFoldedTextValue::new("Hello World").contains(&folded).unwrap());
    assert_eq!(plain.find(&TextValue::new("World")).unwrap(), Some(6));
}

#[test]
fn test_type_error_names_value_and_type() {
    let err = TextValue::new("abc").find(&Value::Boolean(false)).unwrap_err();
    assert_eq!(
        err,
        TextError::ExpectedStringLike {
            value: "false".to_string(),
            type_name: "bool",
        }
    );
    assert_eq!(err.to_string(), "expected a str or text value, got \"false\" of type bool");
}

#[test]
fn test_ireplace_leaf() {
    assert_eq!(ireplace("AAAA", "aa", "b"), "bb");
    assert_eq!(ireplace("", "a", "x"), "");
}

#[test]
fn test_diff_rendering() {
    let (old, new) = compare_and_format(&TextValue::new("abc"), &TextValue::new("abd"));
    assert_eq!(old, "abc\n  ^");
    assert_eq!(new, "abd\n  ^");
}

proptest! {
    #[test]
    fn prop_swapcase_compares_equal(s in "\\PC{0,24}") {
        let value = CaseFoldedTextValue::new(s.as_str());
        let swapped = CaseFoldedTextValue::new(s.as_str()).swapcase();
        prop_assert_eq!(&value, &swapped);
        prop_assert_eq!(hash_of(&value), hash_of(&swapped));
    }

    #[test]
    fn prop_lower_is_idempotent(s in "\\PC{0,24}") {
        let once = CaseFoldedTextValue::new(s.as_str()).lower();
        let twice = once.lower();
        prop_assert_eq!(once.as_str(), twice.as_str());
    }

    #[test]
    fn prop_split_pieces_rejoin_to_original(s in "[a-zA-Z:]{0,24}", maxsplit in -1isize..4) {
        let value = CaseFoldedTextValue::new(s.as_str());
        let pieces = value.split(Some(&"::"), maxsplit).unwrap();
        let rejoined = CaseFoldedTextValue::new("::").join(&pieces).unwrap();
        prop_assert_eq!(rejoined.as_str(), s.as_str());
    }

    #[test]
    fn prop_text_value_matches_string_equality(a in "[a-cA-C]{0,4}", b in "[a-cA-C]{0,4}") {
        prop_assert_eq!(TextValue::new(a.as_str()) == TextValue::new(b.as_str()), a == b);
    }
}
