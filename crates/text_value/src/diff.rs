//! Diff rendering helpers for diagnostics and test failure output
//!
//! Both values are rendered line by line; under every line pair that
//! differs, a marker line with a caret points at the first differing char.

use std::fmt::Display;

/// Index of the first char where `a` and `b` differ
///
/// When one is a prefix of the other this is the shorter length. Returns
/// `None` when the two are identical.
pub fn first_char_diff_index(a: &str, b: &str) -> Option<usize> {
    let mut a_chars = a.chars();
    let mut b_chars = b.chars();
    let mut index = 0;
    loop {
        match (a_chars.next(), b_chars.next()) {
            (None, None) => return None,
            (Some(x), Some(y)) if x == y => index += 1,
            _ => return Some(index),
        }
    }
}

/// `index` spaces and a caret, padded with spaces to `length`
///
/// Returns an empty string when there is no difference.
pub fn generate_diff_marker_line(index: Option<usize>, length: usize) -> String {
    let Some(index) = index else {
        return String::new();
    };
    let mut line = " ".repeat(index);
    line.push('^');
    let pad = length.saturating_sub(index + 1);
    line.extend(std::iter::repeat(' ').take(pad));
    line
}

/// Render both values with a marker line under every differing line
///
/// Lines are paired by position; a side with fewer lines is treated as
/// having empty lines. Returns the rebuilt old and new texts.
pub fn compare_and_format(old_value: &impl Display, new_value: &impl Display) -> (String, String) {
    let old_text = old_value.to_string();
    let new_text = new_value.to_string();
    let old_lines: Vec<&str> = old_text.split('\n').collect();
    let new_lines: Vec<&str> = new_text.split('\n').collect();

    let mut formatted_old = Vec::new();
    let mut formatted_new = Vec::new();
    for i in 0..old_lines.len().max(new_lines.len()) {
        let old_line = old_lines.get(i).copied().unwrap_or("");
        let new_line = new_lines.get(i).copied().unwrap_or("");
        formatted_old.push(old_line.to_string());
        formatted_new.push(new_line.to_string());

        let diff_index = first_char_diff_index(old_line, new_line);
        if diff_index.is_some() {
            let width = old_line.chars().count().max(new_line.chars().count());
            let marker = generate_diff_marker_line(diff_index, width);
            formatted_old.push(marker.clone());
            formatted_new.push(marker);
        }
    }

    (formatted_old.join("\n"), formatted_new.join("\n"))
}
