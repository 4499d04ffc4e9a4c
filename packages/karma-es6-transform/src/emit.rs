use swc_core::common::sync::Lrc;
use swc_core::common::SourceMap;
use swc_core::ecma::ast::Program;
use swc_core::ecma::codegen::{text_writer::JsWriter, Config, Emitter};

use crate::error::CompileError;

/// Generate code text for `program`, whose spans must belong to `cm`.
pub fn emit_program(cm: Lrc<SourceMap>, program: &Program) -> Result<String, CompileError> {
    let mut buf = vec![];
    {
        let mut emitter = Emitter {
            cfg: Config::default().with_minify(false),
            cm: cm.clone(),
            comments: None,
            wr: JsWriter::new(cm, "\n", &mut buf, None),
        };

        match program {
            Program::Module(module) => emitter.emit_module(module)?,
            Program::Script(script) => emitter.emit_script(script)?,
        }
    }

    Ok(String::from_utf8(buf)?)
}
