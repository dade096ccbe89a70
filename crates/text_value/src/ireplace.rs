//! Lightweight case-insensitive literal replace

/// Replace every case-insensitive occurrence of `target` in `original`
///
/// Matches are found left to right and do not overlap. `original` is
/// returned unchanged when it or `target` is empty.
pub fn ireplace(original: &str, target: &str, replacement: &str) -> String {
    if original.is_empty() || target.is_empty() {
        return original.to_string();
    }

    let chars: Vec<char> = original.chars().collect();
    let target_len = target.chars().count();
    let target_lower = target.to_lowercase();

    let mut out = String::with_capacity(original.len());
    let mut i = 0;
    while i < chars.len() {
        let end = i + target_len;
        let is_match = end <= chars.len()
            && chars[i..end]
                .iter()
                .flat_map(|c| c.to_lowercase())
                .eq(target_lower.chars());
        if is_match {
            out.push_str(replacement);
            i = end;
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_overlapping_left_to_right() {
        assert_eq!(ireplace("AAAA", "aa", "b"), "bb");
        assert_eq!(ireplace("AAA", "aa", "b"), "bA");
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(ireplace("anything", "", "x"), "anything");
        assert_eq!(ireplace("", "a", "x"), "");
    }

    #[test]
    fn test_mixed_case() {
        assert_eq!(ireplace("Hello HELLO hello", "hello", "bye"), "bye bye bye");
        assert_eq!(ireplace("ÄpfelÄPFEL", "äpfel", "-"), "--");
    }

    #[test]
    fn test_no_match() {
        assert_eq!(ireplace("abc", "xyz", "-"), "abc");
        assert_eq!(ireplace("ab", "abc", "-"), "ab");
    }
}
