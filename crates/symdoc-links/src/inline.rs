//! Inline `{@link}` tag resolution in rendered HTML.
//!
//! Supported forms: `{@link target}`, `{@link target text}`,
//! `{@link target|text}` and `[text]{@link target}`. Unknown targets
//! degrade to their display text, unlinked.

use regex::Regex;

use crate::registry::LinkRegistry;

/// Replace `{@link}` tags with anchors resolved through the registry.
#[must_use]
pub fn resolve_doc_links(html: &str, registry: &LinkRegistry) -> String {
    let tag_re = Regex::new(r"(?:\[(?P<label>[^\[\]]+)\])?\{@link\s+(?P<body>[^}\s][^}]*)\}")
        .unwrap();

    tag_re
        .replace_all(html, |captures: &regex::Captures<'_>| {
            let body = captures["body"].trim();
            let label = captures.name("label").map(|m| m.as_str());

            let (target, text) = if let Some((target, text)) = body.split_once('|') {
                (target.trim(), Some(text.trim()))
            } else if let Some((target, text)) = body.split_once(char::is_whitespace) {
                (target.trim(), Some(text.trim()))
            } else {
                (body, None)
            };

            let display = label.or(text).unwrap_or(target);
            registry.link_to(target, display)
        })
        .into_owned()
}
