/// Truncates to at most `max` characters without splitting a code point.
#[must_use]
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_chars_is_noop_under_limit() {
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("abc", 3), "abc");
        assert_eq!(truncate_chars("abc", 0), "");
    }

    #[test]
    fn truncate_chars_counts_code_points() {
        assert_eq!(truncate_chars("Größe über", 4), "Größ");
        assert_eq!(truncate_chars("🚗🚙🚕", 2), "🚗🚙");
    }
}
