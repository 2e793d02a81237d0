use std::fmt;

use thiserror::Error;

use crate::environment::Arity;

/// Represents a byte span within a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceSpan {
    pub start: usize,
    pub end: usize,
}

impl SourceSpan {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Front-end stage that rejected the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    Lexer,
    Parser,
}

/// Rich diagnostic information surfaced to end users.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub span: Option<SourceSpan>,
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            span: None,
            notes: Vec::new(),
        }
    }

    pub fn with_span(mut self, span: SourceSpan) -> Self {
        self.span = Some(span);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)?;
        if let Some(span) = self.span {
            write!(f, " ({}..{})", span.start, span.end)?;
        }
        for note in &self.notes {
            write!(f, "\n  note: {note}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostic {}

/// Unified error type for compiling NatReg programs.
///
/// Every failure aborts the whole compilation; no partial regex is produced.
#[derive(Debug, Error)]
pub enum NatRegError {
    #[error("{0}")]
    Diagnostic(#[from] Diagnostic),
    #[error("the reference to `{name}` could not be resolved")]
    MissingReference { name: String },
    #[error("`{name}` expected {expected} arguments, but got {actual}")]
    Arity {
        name: String,
        expected: Arity,
        actual: usize,
    },
    #[error("{message}")]
    ArgumentType { message: String },
    #[error("`{text}` is not a valid number")]
    LiteralParse { text: String },
    #[error("invalid environment override on line {line}: {message}")]
    Override { line: usize, message: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl NatRegError {
    pub fn argument_type(message: impl Into<String>) -> Self {
        Self::ArgumentType {
            message: message.into(),
        }
    }

    /// Stable name of the error kind, used by the command line to tag reports.
    pub fn label(&self) -> &'static str {
        match self {
            NatRegError::Diagnostic(_) => "Syntax",
            NatRegError::MissingReference { .. } => "MissingReference",
            NatRegError::Arity { .. } => "ArgumentCount",
            NatRegError::ArgumentType { .. } => "ArgumentType",
            NatRegError::LiteralParse { .. } => "LiteralParse",
            NatRegError::Override { .. } => "Override",
            NatRegError::Io(_) => "Io",
        }
    }
}

pub type Result<T> = std::result::Result<T, NatRegError>;
