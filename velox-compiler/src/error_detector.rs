use std::fmt;

use crate::expression::{find_prohibited_keyword, is_identifier, is_valid_return_body};
use crate::template_ast::{Element, Node};

/// Which `v-for` name failed the identifier check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    Alias,
    Iterator,
}

impl fmt::Display for BindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingKind::Alias => f.write_str("v-for alias"),
            BindingKind::Iterator => f.write_str("v-for iterator"),
        }
    }
}

/// A problem found in a template expression. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Diagnostic {
    #[error("- invalid {kind} \"{ident}\" in expression: {text}")]
    InvalidIdentifier {
        kind: BindingKind,
        ident: String,
        text: String,
    },
    #[error("- avoid using JavaScript keyword as property name: \"{keyword}\" in expression {text}")]
    ProhibitedKeyword { keyword: &'static str, text: String },
    #[error("- invalid expression: {text}")]
    InvalidExpression { text: String },
}

/// Detects problematic expressions in a template and returns one message
/// per problem, in document order.
pub fn detect_errors(ast: &Node) -> Vec<String> {
    check_template(ast).iter().map(ToString::to_string).collect()
}

/// Same as [`detect_errors`] but keeps the structured diagnostics.
pub fn check_template(ast: &Node) -> Vec<Diagnostic> {
    let mut errors = Vec::new();
    check_node(ast, &mut errors);
    errors
}

fn check_node(node: &Node, errors: &mut Vec<Diagnostic>) {
    match node {
        Node::Element(el) => {
            for attr in el.attrs.iter().filter(|a| a.is_directive()) {
                let Some(value) = attr.value.as_deref().filter(|v| !v.is_empty()) else {
                    continue;
                };
                if attr.name == "v-for" {
                    check_for(el, &format!("v-for=\"{value}\""), errors);
                } else {
                    check_expression(value, &format!("{}=\"{}\"", attr.name, value), errors);
                }
            }
            for child in &el.children {
                check_node(child, errors);
            }
        }
        Node::Expression { expression, text } => check_expression(expression, text, errors),
        Node::Text(_) => {}
    }
}

fn check_for(el: &Element, text: &str, errors: &mut Vec<Diagnostic>) {
    check_expression(el.for_expr.as_deref().unwrap_or_default(), text, errors);
    check_identifier(el.alias.as_deref(), BindingKind::Alias, text, errors);
    check_identifier(el.iterator1.as_deref(), BindingKind::Iterator, text, errors);
    check_identifier(el.iterator2.as_deref(), BindingKind::Iterator, text, errors);
}

fn check_identifier(
    ident: Option<&str>,
    kind: BindingKind,
    text: &str,
    errors: &mut Vec<Diagnostic>,
) {
    if let Some(ident) = ident.filter(|i| !i.is_empty() && !is_identifier(i)) {
        log::debug!("invalid {kind} {ident:?}");
        errors.push(Diagnostic::InvalidIdentifier {
            kind,
            ident: ident.to_string(),
            text: text.to_string(),
        });
    }
}

fn check_expression(exp: &str, text: &str, errors: &mut Vec<Diagnostic>) {
    if is_valid_return_body(exp) {
        return;
    }
    let diagnostic = match find_prohibited_keyword(exp) {
        Some(keyword) => Diagnostic::ProhibitedKeyword {
            keyword,
            text: text.to_string(),
        },
        None => Diagnostic::InvalidExpression {
            text: text.to_string(),
        },
    };
    log::debug!("{diagnostic}");
    errors.push(diagnostic);
}
