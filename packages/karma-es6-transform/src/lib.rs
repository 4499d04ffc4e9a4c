pub mod compiler;
pub mod config;
pub mod context;
pub mod detect;
pub mod emit;
pub mod error;
pub mod parse;
pub mod transform;

#[cfg(test)]
mod tests;

pub use compiler::{Compiler, SwcCompiler};
pub use config::{Preset, TransformOptions};
pub use context::{JsContext, LogOptions, PathContext, TransformContext, Transformed};
pub use detect::{find_module_syntax, has_module_syntax, ModuleSyntaxKind};
pub use error::CompileError;
pub use transform::{transform, Done, ModuleSyntaxTransformer};
