use swc_core::common::comments::SingleThreadedComments;
use swc_core::common::sync::Lrc;
use swc_core::common::{Globals, Mark, SourceMap, GLOBALS};
use swc_core::ecma::ast::{Pass, Program};
use swc_core::ecma::transforms::module::common_js::FeatureFlag;
use swc_core::ecma::transforms::base::fixer::fixer;
use swc_core::ecma::transforms::base::helpers::{inject_helpers, Helpers, HELPERS};
use swc_core::ecma::transforms::base::hygiene::hygiene;
use swc_core::ecma::transforms::base::resolver;
use swc_core::ecma::transforms::compat::{es2015, es2016, es2017};
use swc_core::ecma::transforms::module::common_js::common_js;
use swc_core::ecma::transforms::module::path::Resolver;

use crate::config::Preset;
use crate::context::Transformed;
use crate::emit::emit_program;
use crate::error::CompileError;
use crate::parse::{parse_module, parse_program};

/// Source-to-source compilation of a single file.
pub trait Compiler {
    fn compile(
        &self,
        filename: &str,
        source: &str,
        presets: &[Preset],
    ) -> Result<Transformed, CompileError>;
}

/// Compiles with swc. Each call gets a fresh source map, mark table and
/// helper set, so a single instance can be shared between threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwcCompiler;

impl Compiler for SwcCompiler {
    fn compile(
        &self,
        filename: &str,
        source: &str,
        presets: &[Preset],
    ) -> Result<Transformed, CompileError> {
        GLOBALS.set(&Globals::new(), || {
            HELPERS.set(&Helpers::new(false), || compile_module(filename, source, presets))
        })
    }
}

fn compile_module(
    filename: &str,
    source: &str,
    presets: &[Preset],
) -> Result<Transformed, CompileError> {
    let cm: Lrc<SourceMap> = Default::default();
    let module = parse_module(&cm, filename, source)?;

    let unresolved_mark = Mark::new();
    let top_level_mark = Mark::new();

    let mut program = Program::Module(module);
    run(&mut program, resolver(unresolved_mark, top_level_mark, false));

    let mut interop_done = false;
    for preset in presets {
        downlevel(&mut program, *preset, unresolved_mark);
        if preset.applies_module_interop() && !interop_done {
            run(
                &mut program,
                common_js(
                    Resolver::Default,
                    unresolved_mark,
                    Default::default(),
                    FeatureFlag::default(),
                ),
            );
            interop_done = true;
        }
    }

    // Helpers are inlined as plain functions, so injecting them after the
    // module pass also covers the interop helpers `common_js` marks.
    run(&mut program, inject_helpers(unresolved_mark));
    run(&mut program, hygiene());
    run(&mut program, fixer(None));

    let code = emit_program(cm, &program)?;
    // Spans in `program` point into the input source; reparse so the
    // tree matches the text that replaces it.
    let ast = parse_program(filename, &code)?;

    Ok(Transformed { source: code, ast })
}

fn downlevel(program: &mut Program, preset: Preset, unresolved_mark: Mark) {
    match preset {
        Preset::ModulesCommonJs => {}
        Preset::Es2015 => run(
            program,
            es2015::es2015(
                unresolved_mark,
                None::<SingleThreadedComments>,
                Default::default(),
            ),
        ),
        Preset::Es2016 => run(program, es2016::es2016()),
        Preset::Es2017 => run(program, es2017::es2017(Default::default(), unresolved_mark)),
    }
}

fn run(program: &mut Program, mut pass: impl Pass) {
    pass.process(program);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::find_module_syntax;

    fn compile(source: &str, presets: &[Preset]) -> Transformed {
        SwcCompiler.compile("file.js", source, presets).unwrap()
    }

    #[test]
    fn es2015_downlevels_block_scoping() {
        let out = compile("export const f = (a) => { let b = a; return b; };", &[Preset::Es2015]);
        assert!(!out.source.contains("let "), "Got: {}", out.source);
        assert!(out.source.contains("var b = a"), "Got: {}", out.source);
    }

    #[test]
    fn es2015_rewrites_imports_to_require() {
        let out = compile("import foo from './bar.js'; foo();", &[Preset::Es2015]);
        assert!(out.source.contains("require("), "Got: {}", out.source);
        assert!(out.source.contains("./bar.js"), "Got: {}", out.source);
        assert!(matches!(out.ast, Program::Script(_)));
    }

    #[test]
    fn es2015_inlines_interop_helpers() {
        let out = compile("import foo from './bar.js'; export default foo;", &[Preset::Es2015]);
        assert!(!out.source.contains("import "), "Got: {}", out.source);
        assert!(!out.source.contains("@swc/helpers"), "Got: {}", out.source);
        assert!(matches!(out.ast, Program::Script(_)));
        assert_eq!(find_module_syntax(&out.ast), None);
    }

    #[test]
    fn es2015_inlines_class_helpers() {
        let out = compile("export class A {}", &[Preset::Es2015]);
        assert!(!out.source.contains("import "), "Got: {}", out.source);
        assert!(!out.source.contains("@swc/helpers"), "Got: {}", out.source);
        assert!(out.source.contains("function _class_call_check"), "Got: {}", out.source);
        assert!(matches!(out.ast, Program::Script(_)));
    }

    #[test]
    fn commonjs_keeps_block_scoping() {
        let out = compile("let x = 1; export default x", &[Preset::ModulesCommonJs]);
        assert!(out.source.contains("__esModule"), "Got: {}", out.source);
        assert!(out.source.contains("let x = 1"), "Got: {}", out.source);
        assert!(matches!(out.ast, Program::Script(_)));
    }

    #[test]
    fn interop_runs_once_for_overlapping_presets() {
        let out = compile(
            "export default 1;",
            &[Preset::ModulesCommonJs, Preset::Es2015],
        );
        assert_eq!(out.source.matches("__esModule").count(), 1, "Got: {}", out.source);
    }

    #[test]
    fn es2017_lowers_async_functions() {
        let out = compile("export async function f() { await g(); }", &[Preset::Es2017]);
        assert!(!out.source.contains("async function"), "Got: {}", out.source);
        assert!(out.source.contains("export"), "Got: {}", out.source);
    }

    #[test]
    fn no_presets_keeps_module_syntax() {
        let out = compile("export default 1;", &[]);
        assert!(out.source.contains("export default 1"), "Got: {}", out.source);
        assert!(matches!(out.ast, Program::Module(_)));
    }

    #[test]
    fn syntax_errors_are_reported() {
        let err = SwcCompiler
            .compile("broken.js", "export default (;", &[Preset::Es2015])
            .unwrap_err();
        assert!(matches!(err, CompileError::Parse { .. }));
    }
}
