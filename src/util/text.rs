//! Char-column helpers for line text
//!
//! Editor columns count chars, while `str` searches return byte offsets.

/// Byte index of the char at `char_col`, or `text.len()` past the end
pub fn char_col_to_byte(text: &str, char_col: usize) -> usize {
    text.char_indices()
        .nth(char_col)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}

/// Char column of the byte index `byte` (must be on a char boundary)
pub fn byte_to_char_col(text: &str, byte: usize) -> usize {
    text[..byte].chars().count()
}

/// Find `needle` in `text` at or after char column `from`.
///
/// Returns the absolute char column of the first occurrence.
pub fn find_from(text: &str, needle: &str, from: usize) -> Option<usize> {
    let start = char_col_to_byte(text, from);
    text[start..]
        .find(needle)
        .map(|rel| byte_to_char_col(text, start + rel))
}

/// Text of the first `char_col` chars
pub fn prefix_chars(text: &str, char_col: usize) -> &str {
    &text[..char_col_to_byte(text, char_col)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_from_reports_char_columns() {
        let line = "éé `tpl`";
        assert_eq!(find_from(line, "`", 0), Some(3));
        assert_eq!(find_from(line, "`", 4), Some(7));
        assert_eq!(find_from(line, "`", 8), None);
        assert_eq!(find_from(line, "`", 50), None);
    }

    #[test]
    fn test_prefix_chars_clamps() {
        assert_eq!(prefix_chars("añb", 2), "añ");
        assert_eq!(prefix_chars("ab", 9), "ab");
        assert_eq!(prefix_chars("ab", 0), "");
    }
}
