use indexmap::{IndexMap, IndexSet};

use crate::expression::is_simple_path;
use crate::keycodes::normalize_key_code;
use crate::template_codegen::string_lit;

/// Modifier names attached to one binding, in source order.
pub type Modifiers = IndexSet<String>;

/// Event name (directive syntax stripped) to its handler(s).
pub type EventMap = IndexMap<String, Handler>;

/// Emitted when a handler is missing.
pub const NOOP_HANDLER: &str = "function(){}";

/// Modifiers with fixed code, in emission order.
const STRUCTURAL_MODIFIERS: [(&str, &str); 3] = [
    ("stop", "$event.stopPropagation();"),
    ("prevent", "$event.preventDefault();"),
    ("self", "if($event.target !== $event.currentTarget)return;"),
];

/// One event binding: `@keyup.enter="submit"` becomes
/// `{ value: "submit", modifiers: Some({"enter"}) }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerSpec {
    pub value: String,
    pub modifiers: Option<Modifiers>,
}

impl HandlerSpec {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            modifiers: None,
        }
    }

    pub fn with_modifiers<I, S>(value: impl Into<String>, modifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            value: value.into(),
            modifiers: Some(modifiers.into_iter().map(Into::into).collect()),
        }
    }
}

/// All listeners bound to one event name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handler {
    Single(HandlerSpec),
    Multiple(Vec<HandlerSpec>),
}

impl Handler {
    /// Appends another listener, turning a single handler into a list.
    pub fn push(&mut self, spec: HandlerSpec) {
        match self {
            Handler::Multiple(specs) => specs.push(spec),
            Handler::Single(first) => {
                let first = first.clone();
                *self = Handler::Multiple(vec![first, spec]);
            }
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Handler::Single(_) => 1,
            Handler::Multiple(specs) => specs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<HandlerSpec> for Handler {
    fn from(spec: HandlerSpec) -> Self {
        Handler::Single(spec)
    }
}

/// Modifiers split into structural prologue code and residual key tokens.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedModifiers<'a> {
    pub prologue: String,
    pub keys: Vec<&'a str>,
}

pub fn resolve_modifiers(modifiers: &Modifiers) -> ResolvedModifiers<'_> {
    let prologue = STRUCTURAL_MODIFIERS
        .iter()
        .filter(|(name, _)| modifiers.contains(*name))
        .map(|(_, code)| *code)
        .collect();
    let keys = modifiers
        .iter()
        .map(String::as_str)
        .filter(|name| !STRUCTURAL_MODIFIERS.iter().any(|(s, _)| s == name))
        .collect();
    ResolvedModifiers { prologue, keys }
}

/// Serializes an element's event map as `on:{...}` (or `nativeOn:{...}`).
pub fn generate_event_map(events: &EventMap, native: bool) -> String {
    let key = if native { "nativeOn" } else { "on" };
    let entries: Vec<String> = events
        .iter()
        .map(|(name, handler)| format!("{}:{}", string_lit(name), generate_handler(Some(handler))))
        .collect();
    log::debug!("{key}: generated {} event entries", entries.len());
    format!("{key}:{{{}}}", entries.join(","))
}

pub fn generate_handler(handler: Option<&Handler>) -> String {
    match handler {
        None => NOOP_HANDLER.to_string(),
        Some(Handler::Single(spec)) => generate_handler_spec(spec),
        Some(Handler::Multiple(specs)) => {
            let items: Vec<String> = specs.iter().map(generate_handler_spec).collect();
            format!("[{}]", items.join(","))
        }
    }
}

fn generate_handler_spec(spec: &HandlerSpec) -> String {
    let simple = is_simple_path(&spec.value);
    let Some(modifiers) = &spec.modifiers else {
        return if simple {
            spec.value.clone()
        } else {
            format!("function($event){{{}}}", spec.value)
        };
    };

    let ResolvedModifiers { prologue, keys } = resolve_modifiers(modifiers);
    let guard = if keys.is_empty() {
        String::new()
    } else {
        generate_key_filter(&keys)
    };
    let body = if simple {
        format!("{}($event)", spec.value)
    } else {
        spec.value.clone()
    };
    format!("function($event){{{guard}{prologue}{body}}}")
}

/// Early-return guard letting the handler run only for the given keys.
pub fn generate_key_filter<S: AsRef<str>>(keys: &[S]) -> String {
    let codes: Vec<_> = keys.iter().map(|k| normalize_key_code(k.as_ref())).collect();
    match codes.as_slice() {
        [] => String::new(),
        [code] if code.is_single() => {
            format!("if($event.keyCode!=={})return;", code.operands().join(""))
        }
        _ => {
            let checks: Vec<String> = codes
                .iter()
                .flat_map(|code| code.operands())
                .map(|operand| format!("$event.keyCode!=={operand}"))
                .collect();
            format!("if({})return;", checks.join("&&"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structural_order_ignores_source_order() {
        let mods: Modifiers = ["self", "prevent", "stop"].into_iter().map(String::from).collect();
        let resolved = resolve_modifiers(&mods);
        assert_eq!(
            resolved.prologue,
            "$event.stopPropagation();$event.preventDefault();if($event.target !== $event.currentTarget)return;"
        );
        assert!(resolved.keys.is_empty());
    }

    #[test]
    fn unknown_modifiers_are_keys() {
        let mods: Modifiers = ["enter", "stop", "f2"].into_iter().map(String::from).collect();
        let resolved = resolve_modifiers(&mods);
        assert_eq!(resolved.keys, vec!["enter", "f2"]);
    }

    #[test]
    fn push_turns_single_into_list() {
        let mut h = Handler::from(HandlerSpec::new("a"));
        h.push(HandlerSpec::new("b"));
        assert_eq!(h.len(), 2);
        assert_eq!(
            h,
            Handler::Multiple(vec![HandlerSpec::new("a"), HandlerSpec::new("b")])
        );
    }
}
