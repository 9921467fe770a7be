use crate::events::generate_event_map;
use crate::template_ast::{Element, Node};

/// Handler code for one element of the template.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementHandlers {
    /// Tag chain from the root, e.g. `form > input`.
    pub path: String,
    /// Data-object entries, e.g. `on:{"click":submit}`.
    pub code: String,
}

/// `on:{...}` and `nativeOn:{...}` entries for an element, joined by a comma.
/// `None` when the element has no event bindings.
pub fn emit_element_handlers(el: &Element) -> Option<String> {
    if !el.has_handlers() {
        return None;
    }
    let mut parts = Vec::with_capacity(2);
    if !el.events.is_empty() {
        parts.push(generate_event_map(&el.events, false));
    }
    if !el.native_events.is_empty() {
        parts.push(generate_event_map(&el.native_events, true));
    }
    Some(parts.join(","))
}

/// Handler code for every element with bindings, in document order.
pub fn collect_handlers(nodes: &[Node]) -> Vec<ElementHandlers> {
    let mut out = Vec::new();
    for node in nodes {
        collect_node(node, "", &mut out);
    }
    out
}

fn collect_node(node: &Node, parent: &str, out: &mut Vec<ElementHandlers>) {
    let Node::Element(el) = node else {
        return;
    };
    let path = if parent.is_empty() {
        el.tag.clone()
    } else {
        format!("{parent} > {}", el.tag)
    };
    if let Some(code) = emit_element_handlers(el) {
        out.push(ElementHandlers {
            path: path.clone(),
            code,
        });
    }
    for child in &el.children {
        collect_node(child, &path, out);
    }
}

/// Double-quoted JavaScript string literal.
pub(crate) fn string_lit(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}
