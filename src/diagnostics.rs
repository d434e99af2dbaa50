use std::fmt;

use thiserror::Error;

/// Classification of a diagnostic event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    Syntax,
    Lookup,
    Attribute,
    Type,
    Arity,
    Macro,
    Runtime,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiagnosticKind::Syntax => "SyntaxError",
            DiagnosticKind::Lookup => "LookupError",
            DiagnosticKind::Attribute => "AttributeError",
            DiagnosticKind::Type => "TypeError",
            DiagnosticKind::Arity => "ArityError",
            DiagnosticKind::Macro => "MacroError",
            DiagnosticKind::Runtime => "RuntimeError",
        };
        f.write_str(name)
    }
}

/// Rich diagnostic information surfaced to end users.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            notes: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;
        for note in &self.notes {
            write!(f, "\n  note: {note}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostic {}

/// Unified error type for the Tsapa interpreter.
#[derive(Debug, Error)]
pub enum TsapaError {
    #[error("{0}")]
    Diagnostic(#[from] Diagnostic),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Raised by `!exit` and `!quit`; ends the session instead of being reported.
    #[error("session terminated")]
    Exit,
}

impl TsapaError {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        TsapaError::Diagnostic(Diagnostic::new(kind, message))
    }

    pub fn kind(&self) -> Option<DiagnosticKind> {
        match self {
            TsapaError::Diagnostic(diag) => Some(diag.kind),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, TsapaError>;
