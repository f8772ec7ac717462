//! String utilities for the domain layer.

/// Truncate a string to a maximum byte length with ellipsis (UTF-8 safe)
///
/// Truncation only occurs at valid UTF-8 character boundaries. Strings
/// already within the limit are returned unchanged.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let target = max_len.saturating_sub(3);
        let mut end = target.min(s.len());
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_short_is_unchanged() {
        assert_eq!(truncate("osmosis", 20), "osmosis");
    }

    #[test]
    fn truncate_long_gets_ellipsis() {
        assert_eq!(truncate("generate questions", 10), "generat...");
    }

    #[test]
    fn truncate_respects_multibyte_boundary() {
        // 'é' is 2 bytes; cutting inside it must back up
        let s = "résumé résumé";
        let out = truncate(s, 6);
        assert!(out.ends_with("..."));
        assert!(out.is_char_boundary(out.len()));
    }
}
