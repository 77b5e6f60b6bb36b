//! Template engine collaborator.

use serde_json::Value;

/// External template engine: turns a page model into HTML text.
///
/// The orchestrator builds JSON page models (`type`, `title`, `docs`,
/// `nav`, …) and never inspects the produced markup beyond inline
/// `{@link}` resolution.
pub trait TemplateRenderer {
    fn render(&self, template: &str, model: &Value) -> String;
}
