pub mod compiler;
pub mod error;
pub mod error_detector;
pub mod events;
pub mod expression;
pub mod keycodes;
pub mod template_ast;
pub mod template_codegen;
pub mod template_parse;

pub use compiler::{CompiledTemplate, compile_template};
pub use error::CompileError;
pub use error_detector::{Diagnostic, check_template, detect_errors};
pub use events::{
    EventMap, Handler, HandlerSpec, Modifiers, generate_event_map, generate_handler,
    generate_key_filter, resolve_modifiers,
};
pub use keycodes::{KeyCode, normalize_key_code};
pub use template_ast::{AttrKind, Element, Node, TemplateAttr};
pub use template_codegen::{ElementHandlers, collect_handlers, emit_element_handlers};
pub use template_parse::{add_handler, parse_template_to_ast};
