//! Text helpers for log and error previews.

/// Longest prefix of `s` that is at most `max_bytes` long and ends on a
/// char boundary.
pub fn clip(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let end = (0..=max_bytes)
        .rev()
        .find(|&i| s.is_char_boundary(i))
        .unwrap_or(0);
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_input_is_unchanged() {
        assert_eq!(clip("运势", 10), "运势");
        assert_eq!(clip("", 0), "");
    }

    #[test]
    fn ascii_is_cut_exactly() {
        assert_eq!(clip("fortune", 4), "fort");
    }

    #[test]
    fn cjk_is_cut_on_char_boundary() {
        // each character is 3 bytes
        assert_eq!(clip("命理师", 4), "命");
        assert_eq!(clip("命理师", 6), "命理");
        assert_eq!(clip("命理师", 2), "");
    }
}
