use crate::error::{CompileError, Result};
use crate::events::{HandlerSpec, Modifiers};
use crate::expression::parse_for;
use crate::template_ast::{AttrKind, Element, Node, TemplateAttr};
use crate::template_codegen::string_lit;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Minimal hand-rolled HTML-ish parser with support for:
/// - nested elements, self-closing tags (`<input/>`) and void elements
/// - attributes: static (`class="x"`), bind (`:value="expr"`), event
///   (`@click.stop="foo"`) and directives (`v-for="item in items"`)
/// - text, with `{{ interpolation }}` runs turned into expression nodes
/// - comments and doctypes are skipped
///
/// Event bindings are extracted into each element's event maps and `v-for`
/// is split into its source and bound names.
pub fn parse_template_to_ast(input: &str) -> Result<Vec<Node>> {
    let mut i = 0usize;
    let bytes = input.as_bytes();
    let mut stack: Vec<Element> = Vec::new();
    let mut roots: Vec<Node> = Vec::new();

    fn push_child(stack: &mut [Element], roots: &mut Vec<Node>, node: Node) {
        if let Some(parent) = stack.last_mut() {
            parent.children.push(node);
        } else {
            roots.push(node);
        }
    }

    while i < bytes.len() {
        if bytes[i] == b'<' && is_tag_start(bytes, i) {
            if input[i..].starts_with("<!--") {
                i = input[i + 4..]
                    .find("-->")
                    .map_or(bytes.len(), |end| i + 4 + end + 3);
                continue;
            }
            if bytes[i + 1] == b'!' {
                // doctype
                i = input[i..].find('>').map_or(bytes.len(), |end| i + end + 1);
                continue;
            }

            // closing tag?
            if bytes[i + 1] == b'/' {
                i += 2;
                let tag = read_ident(input, &mut i);
                skip_ws(bytes, &mut i);
                if i < bytes.len() && bytes[i] == b'>' {
                    i += 1;
                }
                // close everything opened after the matching tag; stray
                // closing tags are ignored
                if let Some(pos) = stack.iter().rposition(|el| el.tag == tag) {
                    while stack.len() > pos {
                        if let Some(el) = stack.pop() {
                            push_child(&mut stack, &mut roots, Node::Element(el));
                        }
                    }
                }
                continue;
            }

            // opening or self-closing tag
            i += 1;
            let mut el = Element::new(read_ident(input, &mut i));

            loop {
                skip_ws(bytes, &mut i);
                if i >= bytes.len() {
                    break;
                }
                match bytes[i] {
                    b'/' => {
                        // possible "/>"
                        el.self_closing = true;
                        i += 1;
                        skip_ws(bytes, &mut i);
                        if i < bytes.len() && bytes[i] == b'>' {
                            i += 1;
                        }
                        break;
                    }
                    b'>' => {
                        i += 1;
                        break;
                    }
                    _ => {
                        if let Some(attr) = read_attribute(input, &mut i)? {
                            el.attrs.push(attr);
                        } else {
                            // skip unknown token
                            i += 1;
                        }
                    }
                }
            }

            process_attrs(&mut el);
            if el.self_closing || VOID_ELEMENTS.contains(&el.tag.as_str()) {
                push_child(&mut stack, &mut roots, Node::Element(el));
            } else {
                stack.push(el);
            }
        } else {
            let start = i;
            i = read_text(input, i)?;
            let text = &input[start..i];
            if is_all_ws(text) {
                // keep a single space between inline siblings
                if !stack.is_empty() {
                    push_child(&mut stack, &mut roots, Node::Text(" ".to_string()));
                }
                continue;
            }
            let node = match parse_text(text) {
                Some(expression) => Node::Expression {
                    expression,
                    text: text.to_string(),
                },
                None => Node::Text(text.to_string()),
            };
            push_child(&mut stack, &mut roots, node);
        }
    }

    // Unclosed tags: drain stack into their parents (best-effort)
    while let Some(el) = stack.pop() {
        push_child(&mut stack, &mut roots, Node::Element(el));
    }

    Ok(roots)
}

/// Builds the render expression for a text run containing `{{ }}`:
/// static parts are quoted and interpolations become `_s(expr)` calls.
/// Returns `None` for plain text.
pub fn parse_text(text: &str) -> Option<String> {
    if !text.contains("{{") {
        return None;
    }
    let mut tokens: Vec<String> = Vec::new();
    let mut rest = text;
    while let Some(open) = rest.find("{{") {
        let after = &rest[open + 2..];
        let Some(close) = after.find("}}") else {
            break;
        };
        if open > 0 {
            tokens.push(string_lit(&rest[..open]));
        }
        tokens.push(format!("_s({})", after[..close].trim()));
        rest = &after[close + 2..];
    }
    if !rest.is_empty() {
        tokens.push(string_lit(rest));
    }
    Some(tokens.join("+"))
}

/// Records an event binding on `el`. `binding` is the attribute name with
/// the `@`/`v-on:` prefix removed, e.g. `keyup.enter.native`.
pub fn add_handler(el: &mut Element, binding: &str, value: String) {
    let mut parts = binding.split('.');
    let mut name = parts.next().unwrap_or_default().to_string();
    let names: Modifiers = parts.filter(|m| !m.is_empty()).map(String::from).collect();
    let mut modifiers = (!names.is_empty()).then_some(names);

    let mut native = false;
    if let Some(mods) = modifiers.as_mut() {
        if mods.shift_remove("capture") {
            name.insert(0, '!');
        }
        native = mods.shift_remove("native");
    }

    let events = if native {
        &mut el.native_events
    } else {
        &mut el.events
    };
    let spec = HandlerSpec { value, modifiers };
    match events.get_mut(&name) {
        Some(existing) => existing.push(spec),
        None => {
            events.insert(name, spec.into());
        }
    }
}

fn process_attrs(el: &mut Element) {
    let bindings: Vec<(String, String)> = el
        .attrs
        .iter()
        .filter(|a| a.kind == AttrKind::On || a.name == "v-for")
        .map(|a| (a.name.clone(), a.value.clone().unwrap_or_default()))
        .collect();

    for (name, value) in bindings {
        if name == "v-for" {
            process_for(el, &value);
        } else {
            let binding = name
                .strip_prefix('@')
                .or_else(|| name.strip_prefix("v-on:"))
                .unwrap_or(&name);
            add_handler(el, binding, value);
        }
    }
}

fn process_for(el: &mut Element, exp: &str) {
    if exp.is_empty() {
        return;
    }
    let Some(syntax) = parse_for(exp) else {
        log::warn!("invalid v-for expression: {exp}");
        return;
    };
    el.for_expr = Some(syntax.source);
    el.alias = Some(syntax.alias);
    el.iterator1 = syntax.iterator1;
    el.iterator2 = syntax.iterator2;
}

fn is_tag_start(bytes: &[u8], i: usize) -> bool {
    matches!(bytes.get(i + 1), Some(c) if c.is_ascii_alphabetic() || *c == b'/' || *c == b'!')
}

// Text until the next tag, skipping over `{{ }}` so that `<` inside an
// interpolation does not end the run.
fn read_text(input: &str, start: usize) -> Result<usize> {
    let bytes = input.as_bytes();
    let mut i = start;
    while i < bytes.len() {
        if bytes[i..].starts_with(b"{{") {
            let close = input[i + 2..]
                .find("}}")
                .ok_or(CompileError::UnterminatedInterpolation { offset: i })?;
            i += 2 + close + 2;
            continue;
        }
        if i > start && bytes[i] == b'<' && is_tag_start(bytes, i) {
            break;
        }
        i += 1;
    }
    Ok(i)
}

fn is_all_ws(s: &str) -> bool {
    s.chars().all(|c| c.is_whitespace())
}

fn skip_ws(bytes: &[u8], i: &mut usize) {
    while *i < bytes.len() && bytes[*i].is_ascii_whitespace() {
        *i += 1;
    }
}

fn read_ident(input: &str, i: &mut usize) -> String {
    let bytes = input.as_bytes();
    let start = *i;
    while *i < bytes.len() {
        let c = bytes[*i] as char;
        if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
            *i += 1;
        } else {
            break;
        }
    }
    input[start..*i].to_string()
}

fn read_attribute(input: &str, i: &mut usize) -> Result<Option<TemplateAttr>> {
    let bytes = input.as_bytes();
    let name_start = *i;
    while *i < bytes.len() {
        let c = bytes[*i] as char;
        if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | ':' | '@' | '.' | '#' | '$') {
            *i += 1;
        } else {
            break;
        }
    }
    if *i == name_start {
        return Ok(None);
    }
    let name = input[name_start..*i].to_string();

    skip_ws(bytes, i);
    let mut value: Option<String> = None;
    if *i < bytes.len() && bytes[*i] == b'=' {
        *i += 1;
        skip_ws(bytes, i);
        value = Some(read_value(input, i, &name)?);
    }

    let kind = attr_kind(&name);
    Ok(Some(TemplateAttr { name, value, kind }))
}

fn attr_kind(name: &str) -> AttrKind {
    if name.starts_with(':') || name.starts_with("v-bind:") {
        AttrKind::Bind
    } else if name.starts_with('@') || name.starts_with("v-on:") {
        AttrKind::On
    } else if name.starts_with("v-") {
        AttrKind::Directive
    } else {
        AttrKind::Static
    }
}

fn read_value(input: &str, i: &mut usize, name: &str) -> Result<String> {
    let bytes = input.as_bytes();
    let Some(&quote) = bytes.get(*i) else {
        return Ok(String::new());
    };
    if quote != b'"' && quote != b'\'' {
        // unquoted: up to whitespace or tag end
        let start = *i;
        while *i < bytes.len() && !bytes[*i].is_ascii_whitespace() && bytes[*i] != b'>' {
            *i += 1;
        }
        return Ok(input[start..*i].to_string());
    }
    *i += 1;
    let start = *i;
    while *i < bytes.len() && bytes[*i] != quote {
        *i += 1;
    }
    if *i >= bytes.len() {
        return Err(CompileError::UnterminatedAttribute {
            name: name.to_string(),
        });
    }
    let s = input[start..*i].to_string();
    *i += 1; // consume closing quote
    Ok(s)
}
