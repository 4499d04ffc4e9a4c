use thiserror::Error;

/// Failure of the compile step. A missing syntax tree is not an error.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("failed to parse {filename}: {message}")]
    Parse { filename: String, message: String },

    #[error("unknown preset `{0}`")]
    UnknownPreset(String),

    #[error("failed to emit code: {0}")]
    Emit(#[from] std::io::Error),

    #[error("generated code is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl CompileError {
    pub(crate) fn parse(filename: &str, message: impl Into<String>) -> Self {
        Self::Parse {
            filename: filename.to_string(),
            message: message.into(),
        }
    }
}
