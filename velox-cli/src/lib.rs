use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use velox_compiler::CompiledTemplate;

/// Compile a template file and return its diagnostics.
pub fn check_cmd(input: &Path) -> Result<Vec<String>> {
    let compiled = compile_file(input)?;
    Ok(compiled.errors)
}

/// Compile a template file and write its handler code to
/// `<out_dir>/<stem>.handlers.js`. Returns the written path.
pub fn build_cmd(input: &Path, out_dir: Option<&Path>, deny_warnings: bool) -> Result<PathBuf> {
    let compiled = compile_file(input)?;

    for err in &compiled.errors {
        log::warn!("{}: {}", input.display(), err);
    }
    if deny_warnings && !compiled.errors.is_empty() {
        anyhow::bail!(
            "{} problem(s) found in {}",
            compiled.errors.len(),
            input.display()
        );
    }

    let name = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("component");

    let mut code = String::new();
    for el in &compiled.handlers {
        code.push_str(&format!("// {}\n{{{}}}\n", el.path, el.code));
    }

    let out_dir = out_dir
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("target/velox-gen"));
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let out_path = out_dir.join(format!("{}.handlers.js", name));
    fs::write(&out_path, code)
        .with_context(|| format!("failed to write {}", out_path.display()))?;

    log::info!(
        "{}: {} element(s) with handlers",
        input.display(),
        compiled.handlers.len()
    );
    Ok(out_path)
}

fn compile_file(input: &Path) -> Result<CompiledTemplate> {
    let src =
        fs::read_to_string(input).with_context(|| format!("failed to read {}", input.display()))?;
    velox_compiler::compile_template(&src)
        .with_context(|| format!("failed to parse {}", input.display()))
}
