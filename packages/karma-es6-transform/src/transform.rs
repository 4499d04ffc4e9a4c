use tracing::{debug, warn};

use crate::compiler::{Compiler, SwcCompiler};
use crate::config::TransformOptions;
use crate::context::{TransformContext, Transformed};
use crate::detect::find_module_syntax;
use crate::error::CompileError;

/// Error-first completion: `(error, dirty)`.
pub type Done<'a> = Box<dyn FnOnce(Option<CompileError>, bool) + 'a>;

/// Recompiles files that use ES module syntax.
pub struct ModuleSyntaxTransformer<C = SwcCompiler> {
    options: TransformOptions,
    compiler: C,
}

impl ModuleSyntaxTransformer {
    pub fn new(options: TransformOptions) -> Self {
        Self::with_compiler(options, SwcCompiler)
    }
}

impl<C: Compiler> ModuleSyntaxTransformer<C> {
    pub fn with_compiler(options: TransformOptions, compiler: C) -> Self {
        Self { options, compiler }
    }

    pub fn compiler(&self) -> &C {
        &self.compiler
    }

    /// Compute the rewrite for `context` without touching it.
    ///
    /// Returns `Ok(None)` when there is no syntax tree or the tree has no
    /// top-level import/export; the compiler is not invoked in that case.
    pub fn transform(&self, context: &TransformContext) -> Result<Option<Transformed>, CompileError> {
        let filename = context.paths.filename.as_str();

        let Some(ast) = context.ast() else {
            debug!(filename, "no syntax tree, skipping");
            return Ok(None);
        };

        let Some(kind) = find_module_syntax(ast) else {
            debug!(filename, "no es module syntax");
            return Ok(None);
        };

        self.options
            .resolve_presets()
            .and_then(|presets| {
                debug!(filename, %kind, ?presets, "compiling es module");
                self.compiler.compile(filename, &context.source, &presets)
            })
            .map(Some)
            .map_err(|err| {
                warn!(filename, error = %err, "es module compilation failed");
                err
            })
    }

    /// Rewrite `context` in place and report whether it changed. On error the
    /// context is left as it was.
    pub fn run(&self, context: &mut TransformContext) -> Result<bool, CompileError> {
        match self.transform(context)? {
            Some(transformed) => {
                context.apply(transformed);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Callback form of [`Self::run`]. `done` is called exactly once.
    pub fn handle<F>(&self, context: &mut TransformContext, done: F)
    where
        F: FnOnce(Option<CompileError>, bool),
    {
        match self.run(context) {
            Ok(dirty) => done(None, dirty),
            Err(err) => done(Some(err), false),
        }
    }
}

/// Build the bundler hook. `None` uses the default options.
pub fn transform(options: Option<TransformOptions>) -> impl Fn(&mut TransformContext, Done<'_>) {
    let transformer = ModuleSyntaxTransformer::new(options.unwrap_or_default());
    move |context, done| transformer.handle(context, done)
}
