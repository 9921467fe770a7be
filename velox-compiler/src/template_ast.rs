use crate::events::EventMap;

#[derive(Debug, Clone, PartialEq)]
pub enum AttrKind {
    Static,    // class="app"
    Bind,      // :value="count"
    On,        // @click="increment"
    Directive, // v-if="show"
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateAttr {
    /// Raw attribute name as written, e.g. `@keyup.enter` or `v-for`.
    pub name: String,
    pub value: Option<String>,
    pub kind: AttrKind,
}

impl TemplateAttr {
    pub fn is_directive(&self) -> bool {
        is_directive(&self.name)
    }
}

/// `v-*`, `@*` and `:*` attributes carry expressions.
pub fn is_directive(name: &str) -> bool {
    name.starts_with("v-") || name.starts_with('@') || name.starts_with(':')
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<TemplateAttr>,
    pub children: Vec<Node>,
    pub self_closing: bool,
    /// Source expression of `v-for`.
    pub for_expr: Option<String>,
    pub alias: Option<String>,
    pub iterator1: Option<String>,
    pub iterator2: Option<String>,
    pub events: EventMap,
    pub native_events: EventMap,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn has_handlers(&self) -> bool {
        !self.events.is_empty() || !self.native_events.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    /// Text containing `{{ }}`; `expression` is the generated render
    /// expression and `text` the original source.
    Expression { expression: String, text: String },
    Text(String),
}
