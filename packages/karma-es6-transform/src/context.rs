use serde::Deserialize;
use swc_core::ecma::ast::Program;

use crate::error::CompileError;
use crate::parse::parse_program;

/// Per-file record handed from one bundler stage to the next.
#[derive(Debug, Clone)]
pub struct TransformContext {
    pub source: String,
    /// `None` when an earlier stage skipped parsing this file.
    pub js: Option<JsContext>,
    pub module: String,
    pub paths: PathContext,
    pub log: LogOptions,
}

#[derive(Debug, Clone)]
pub struct JsContext {
    pub ast: Program,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PathContext {
    #[serde(default)]
    pub basepath: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default = "default_urlroot")]
    pub urlroot: String,
}

/// Logger settings owned by the host. Only carried along.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LogOptions {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub appenders: Vec<serde_json::Value>,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            appenders: Vec::new(),
        }
    }
}

fn default_urlroot() -> String {
    "/".to_string()
}

fn default_log_level() -> String {
    "INFO".to_string()
}

/// Output of a successful compile: regenerated code and the tree parsed
/// from it.
#[derive(Debug, Clone)]
pub struct Transformed {
    pub source: String,
    pub ast: Program,
}

impl TransformContext {
    /// Build a context for `filename` and parse `source` into `js.ast`.
    pub fn new(filename: impl Into<String>, source: impl Into<String>) -> Result<Self, CompileError> {
        let mut context = Self::without_ast(filename, source);
        let ast = parse_program(&context.paths.filename, &context.source)?;
        context.js = Some(JsContext { ast });
        Ok(context)
    }

    pub fn without_ast(filename: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            js: None,
            module: "module".to_string(),
            paths: PathContext {
                filename: filename.into(),
                urlroot: default_urlroot(),
                ..Default::default()
            },
            log: LogOptions::default(),
        }
    }

    pub fn ast(&self) -> Option<&Program> {
        self.js.as_ref().map(|js| &js.ast)
    }

    /// Merge a compile result. Source and tree are replaced together.
    pub fn apply(&mut self, transformed: Transformed) {
        self.source = transformed.source;
        self.js = Some(JsContext {
            ast: transformed.ast,
        });
    }
}
