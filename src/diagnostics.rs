use std::fmt::Display;

use thiserror::Error;

/// Recoverable assembly errors. Each one has a well-defined fallback
/// encoding so a single bad line never stops the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagnosticKind {
    #[error("duplicate symbol '{0}'")]
    DuplicateSymbol(String),
    #[error("undefined symbol '{0}'")]
    UndefinedSymbol(String),
    #[error("invalid register '{0}'")]
    InvalidRegister(String),
    #[error("immediate value '{0}' out of range")]
    ImmediateOutOfRange(String),
    #[error("malformed byte literal '{0}'")]
    MalformedByteLiteral(String),
    #[error("unknown mnemonic '{0}'")]
    UnknownMnemonic(String),
    #[error("label '{0}' has no mnemonic")]
    MissingMnemonic(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line_no: usize,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn new(line_no: usize, kind: DiagnosticKind) -> Self {
        Self { line_no, kind }
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line_no, self.kind)
    }
}
