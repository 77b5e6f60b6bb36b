//! Menu tree serialization.
//!
//! Output shape, indentation included, is a pure function of the tree so
//! snapshots stay stable across runs. Two spaces per nesting level.

use std::fmt::Write;

use crate::tree::{ItemData, MenuGroup, MenuItem};

/// Serialize a navigation tree into nested list markup.
///
/// With `skip_empty_groups` enabled (the default policy), a group with no
/// direct items splices its descendants into the parent instead of
/// emitting a hollow heading and wrapper.
#[must_use]
pub fn render_menu(group: &MenuGroup, skip_empty_groups: bool) -> String {
    render_group(group, 0, skip_empty_groups)
}

fn pad(units: usize) -> String {
    "  ".repeat(units)
}

fn render_group(group: &MenuGroup, level: usize, skip_empty: bool) -> String {
    let mut body = String::new();
    for item in &group.items {
        body.push_str(&render_item(item, level, skip_empty));
    }
    for child in &group.groups {
        body.push_str(&render_group(child, level + 1, skip_empty));
    }
    if body.is_empty() {
        return String::new();
    }
    // no direct items: splice descendants into the parent
    if group.items.is_empty() && skip_empty {
        return body;
    }

    let mut html = String::new();
    if let Some(heading) = &group.heading {
        let tag = if level == 0 { "h3" } else { "li" };
        let _ = writeln!(
            html,
            "{}<{tag}>\n{}{}\n{}</{tag}>",
            pad(level),
            pad(level + 1),
            heading,
            pad(level)
        );
    }
    let class_attr = group
        .css_class
        .as_ref()
        .map(|c| format!(" class=\"{c}\""))
        .unwrap_or_default();
    let _ = writeln!(
        html,
        "{}<ul{}>\n{}{}</ul>",
        pad(level),
        class_attr,
        body,
        pad(level)
    );
    html
}

fn render_item(item: &MenuItem, level: usize, skip_empty: bool) -> String {
    let detail_body: String = item
        .details
        .iter()
        .map(|detail| render_group(detail, level + 2, skip_empty))
        .collect();
    let details = if detail_body.is_empty() {
        String::new()
    } else {
        format!(
            "{}<ul>\n{}{}</ul>\n",
            pad(level + 1),
            detail_body,
            pad(level + 1)
        )
    };

    let mut out = String::new();
    if let Some(data) = &item.data {
        let _ = writeln!(out, "{}<li{}>", pad(level + 1), data_attributes(data));
        if !item.link.is_empty() {
            let _ = writeln!(out, "{}{}", pad(level + 2), item.link);
        }
        out.push_str(&details);
        let _ = writeln!(out, "{}</li>", pad(level + 1));
    } else if !item.link.is_empty() {
        let _ = writeln!(out, "{}<li>", pad(level + 1));
        let _ = writeln!(out, "{}{}", pad(level + 2), item.link);
        out.push_str(&details);
        let _ = writeln!(out, "{}</li>", pad(level + 1));
    } else {
        out.push_str(&details);
    }
    out
}

fn data_attributes(data: &ItemData) -> String {
    let mut attrs = String::new();
    if let Some(kind) = &data.kind {
        let _ = write!(attrs, " data-kind=\"{kind}\"");
    }
    if let Some(access) = &data.access {
        let _ = write!(attrs, " data-access=\"{access}\"");
    }
    if data.is_async {
        attrs.push_str(" data-async=\"true\"");
    }
    attrs
}
