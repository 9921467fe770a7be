use crate::error::Result;
use crate::error_detector::detect_errors;
use crate::template_ast::Node;
use crate::template_codegen::{ElementHandlers, collect_handlers};
use crate::template_parse::parse_template_to_ast;

/// Everything the compiler derives from one template.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledTemplate {
    pub ast: Vec<Node>,
    /// Diagnostics from every root, in document order.
    pub errors: Vec<String>,
    pub handlers: Vec<ElementHandlers>,
}

/// Public API: parse a template, detect expression errors and generate the
/// handler code of every element. The two passes are independent.
pub fn compile_template(template_src: &str) -> Result<CompiledTemplate> {
    let ast = parse_template_to_ast(template_src)?;
    let errors: Vec<String> = ast.iter().flat_map(detect_errors).collect();
    let handlers = collect_handlers(&ast);
    log::debug!(
        "compiled template: {} root(s), {} diagnostic(s), {} element(s) with handlers",
        ast.len(),
        errors.len(),
        handlers.len()
    );
    Ok(CompiledTemplate {
        ast,
        errors,
        handlers,
    })
}
