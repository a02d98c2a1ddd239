//! Escaping for pages served in a legacy 8-bit encoding

use maud::{html, PreEscaped};

/// German letters replaced by named entities after markup escaping.
pub const LEGACY_ENTITIES: [(char, &str); 7] = [
    ('ä', "&auml;"),
    ('ö', "&ouml;"),
    ('ü', "&uuml;"),
    ('Ä', "&Auml;"),
    ('Ö', "&Ouml;"),
    ('Ü', "&Uuml;"),
    ('ß', "&szlig;"),
];

/// Escape `text` for HTML, then replace umlauts and `ß` with named entities.
///
/// The markup pass runs first so the `&` of the inserted entities is not
/// escaped again. The result is marked pre-escaped for the page templates.
pub fn escape_legacy(text: &str) -> PreEscaped<String> {
    let escaped = html! { (text) }.into_string();

    let mut out = String::with_capacity(escaped.len());
    for ch in escaped.chars() {
        match LEGACY_ENTITIES.iter().find(|(c, _)| *c == ch) {
            Some((_, entity)) => out.push_str(entity),
            None => out.push(ch),
        }
    }
    PreEscaped(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_ampersand_once_and_umlauts() {
        let out = escape_legacy("Müller & Köln").into_string();
        assert_eq!(out, "M&uuml;ller &amp; K&ouml;ln");
        assert_eq!(out.matches("&amp;").count(), 1);
        assert!(!out.contains("&amp;uuml;"));
    }

    #[test]
    fn test_escape_markup_characters() {
        assert_eq!(
            escape_legacy("<b>\"Größe\"</b>").into_string(),
            "&lt;b&gt;&quot;Gr&ouml;&szlig;e&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_escape_uppercase_umlauts() {
        assert_eq!(escape_legacy("ÄÖÜ").into_string(), "&Auml;&Ouml;&Uuml;");
    }

    #[test]
    fn test_escape_plain_text_unchanged() {
        assert_eq!(escape_legacy("Core Guide 1.0").into_string(), "Core Guide 1.0");
    }
}
