//! HTML escaping.

use std::borrow::Cow;

/// Escape HTML-reserved characters.
///
/// Returns the input unchanged (borrowed) when nothing needs escaping.
#[must_use]
pub fn escape_html(text: &str) -> Cow<'_, str> {
    let needs_escape = text
        .bytes()
        .any(|b| matches!(b, b'&' | b'<' | b'>' | b'"' | b'\''));
    if !needs_escape {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_plain_text_borrowed() {
        assert!(matches!(escape_html("plain text"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_reserved_characters_escaped() {
        assert_eq!(
            escape_html(r#"Array.<string> | {a: "b"} & 'c'"#),
            "Array.&lt;string&gt; | {a: &quot;b&quot;} &amp; &#39;c&#39;"
        );
    }

    #[test]
    fn test_empty() {
        assert_eq!(escape_html(""), "");
    }
}
