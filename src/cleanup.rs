//! Text normalization applied to every span at construction and after merges.

use std::sync::OnceLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Hidden separators dropped without replacement.
const HIDDEN_CHARS: &[char] = &[
    '\u{200B}', // zero width space
    '\u{200C}', // zero width non-joiner
    '\u{200D}', // zero width joiner
    '\u{2060}', // word joiner
    '\u{FEFF}', // zero width no-break space
    '\u{00AD}', // soft hyphen
];

/// Characters replaced by a plain space before collapsing.
const SPACE_LIKE_CHARS: &[char] = &['\t', '\n', '\r', '\u{000B}', '\u{000C}', '\u{00A0}'];

fn repeated_spaces() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r" {2,}").expect("repeated-space pattern is valid"))
}

/// Normalize span text.
///
/// Applies NFC, drops hidden separators, turns tabs, line breaks and
/// non-breaking spaces into spaces, collapses space runs and trims.
/// Returns `None` when nothing but whitespace remains.
///
/// # Example
///
/// ```
/// use pdf_contents::cleanup::normalize_text;
///
/// assert_eq!(normalize_text("  Total\t\tdue\u{2060} "), Some("Total due".to_string()));
/// assert_eq!(normalize_text(" \u{200B}\t"), None);
/// ```
pub fn normalize_text(text: &str) -> Option<String> {
    let cleaned: String = text
        .nfc()
        .filter(|c| !HIDDEN_CHARS.contains(c))
        .map(|c| if SPACE_LIKE_CHARS.contains(&c) { ' ' } else { c })
        .collect();

    let collapsed = repeated_spaces().replace_all(&cleaned, " ");
    let trimmed = collapsed.trim();

    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_spaces_and_tabs() {
        assert_eq!(
            normalize_text("Invoice \t  #123"),
            Some("Invoice #123".to_string())
        );
    }

    #[test]
    fn test_hidden_chars_removed() {
        assert_eq!(
            normalize_text("To\u{200B}tal\u{00AD}"),
            Some("Total".to_string())
        );
    }

    #[test]
    fn test_nbsp_and_newline_become_spaces() {
        assert_eq!(
            normalize_text("42,00\u{00A0}EUR\nnet"),
            Some("42,00 EUR net".to_string())
        );
    }

    #[test]
    fn test_whitespace_only_is_none() {
        assert_eq!(normalize_text(""), None);
        assert_eq!(normalize_text("   "), None);
        assert_eq!(normalize_text("\t\u{2060}\n"), None);
    }

    #[test]
    fn test_nfc_normalization() {
        // "e" + combining acute accent composes into "é"
        assert_eq!(normalize_text("caf\u{0065}\u{0301}"), Some("café".to_string()));
    }

    #[test]
    fn test_idempotent() {
        let once = normalize_text(" a \t b  c ").unwrap();
        assert_eq!(normalize_text(&once), Some(once.clone()));
    }
}
