use swc_core::common::sync::Lrc;
use swc_core::common::{FileName, SourceFile, SourceMap};
use swc_core::ecma::ast::{EsVersion, Module, Program};
use swc_core::ecma::parser::{self, error::Error, EsSyntax, Syntax};

use crate::error::CompileError;

fn syntax() -> Syntax {
    Syntax::Es(EsSyntax {
        decorators: true,
        ..Default::default()
    })
}

fn load(cm: &Lrc<SourceMap>, filename: &str, source: &str) -> Lrc<SourceFile> {
    cm.new_source_file(
        FileName::Custom(filename.to_string()).into(),
        source.to_string(),
    )
}

fn into_compile_error(filename: &str, err: Error) -> CompileError {
    CompileError::parse(filename, err.kind().msg())
}

/// Parse `source` as an ES module. Recoverable errors are treated as fatal.
pub fn parse_module(
    cm: &Lrc<SourceMap>,
    filename: &str,
    source: &str,
) -> Result<Module, CompileError> {
    let fm = load(cm, filename, source);
    let mut errors = vec![];
    let module = parser::parse_file_as_module(&fm, syntax(), EsVersion::Es2022, None, &mut errors)
        .map_err(|err| into_compile_error(filename, err))?;

    match errors.into_iter().next() {
        Some(err) => Err(into_compile_error(filename, err)),
        None => Ok(module),
    }
}

/// Parse `source` as either a module or a script, depending on whether it
/// contains `import`/`export` declarations.
pub fn parse_program(filename: &str, source: &str) -> Result<Program, CompileError> {
    let cm: Lrc<SourceMap> = Default::default();
    let fm = load(&cm, filename, source);
    let mut errors = vec![];
    let program = parser::parse_file_as_program(&fm, syntax(), EsVersion::Es2022, None, &mut errors)
        .map_err(|err| into_compile_error(filename, err))?;

    match errors.into_iter().next() {
        Some(err) => Err(into_compile_error(filename, err)),
        None => Ok(program),
    }
}
