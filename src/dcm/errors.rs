//! Error types for DCM reading and writing.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::value::ConvertError;

/// Fatal errors: parsing stops and no document is returned.
#[derive(Debug, Error)]
pub enum DcmError {
    /// IO error occurred while reading or writing the file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The first significant line is not a valid `KONSERVIERUNG_FORMAT` directive.
    #[error("Malformed header{context}: {message}")]
    MalformedHeader {
        message: String,
        context: ErrorContext,
    },

    /// A block's opening line lacks a name or a required dimension.
    #[error("Malformed block header{context}: {message}")]
    MalformedBlockHeader {
        message: String,
        context: ErrorContext,
    },

    /// A token in a numeric field is not a number.
    #[error("{source}{context}")]
    NotNumeric {
        #[source]
        source: ConvertError,
        context: ErrorContext,
    },

    /// `WERT`/`TEXT` inside a map before any `ST/Y`.
    #[error("Values before ST/Y in '{element}'{context}")]
    ValueBeforeCoordinate {
        element: String,
        context: ErrorContext,
    },

    /// Two elements share a name.
    #[error("Duplicate element name '{name}'{context}")]
    DuplicateName { name: String, context: ErrorContext },

    /// Input ended inside a block.
    #[error("Unexpected end of input{context}: missing END")]
    UnexpectedEof { context: ErrorContext },
}

impl DcmError {
    /// The context of parse errors; `None` for IO errors.
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            DcmError::Io(_) => None,
            DcmError::MalformedHeader { context, .. }
            | DcmError::MalformedBlockHeader { context, .. }
            | DcmError::NotNumeric { context, .. }
            | DcmError::ValueBeforeCoordinate { context, .. }
            | DcmError::DuplicateName { context, .. }
            | DcmError::UnexpectedEof { context } => Some(context),
        }
    }

    fn context_mut(&mut self) -> Option<&mut ErrorContext> {
        match self {
            DcmError::Io(_) => None,
            DcmError::MalformedHeader { context, .. }
            | DcmError::MalformedBlockHeader { context, .. }
            | DcmError::NotNumeric { context, .. }
            | DcmError::ValueBeforeCoordinate { context, .. }
            | DcmError::DuplicateName { context, .. }
            | DcmError::UnexpectedEof { context } => Some(context),
        }
    }

    /// Sets the line number unless one is already known.
    pub(crate) fn at_line(mut self, line: usize) -> Self {
        if let Some(context) = self.context_mut() {
            context.line.get_or_insert(line);
        }
        self
    }

    /// Records the file the error was found in.
    pub fn in_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        if let Some(context) = self.context_mut() {
            context.file_path = Some(path.into());
        }
        self
    }

    pub(crate) fn not_numeric(source: ConvertError, line: usize, parsing: &str) -> Self {
        DcmError::NotNumeric {
            source,
            context: ErrorContext::with_line(line).with_parsing(parsing),
        }
    }
}

/// Context information for error reporting.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ErrorContext {
    /// The file path where the error occurred (if available).
    pub file_path: Option<PathBuf>,
    /// The 1-based line number where the error occurred (if available).
    pub line: Option<usize>,
    /// What was being parsed, e.g. `KENNFELD m`.
    pub parsing: Option<String>,
}

impl ErrorContext {
    /// Create a new empty error context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an error context with line number.
    pub fn with_line(line: usize) -> Self {
        Self {
            line: Some(line),
            ..Self::default()
        }
    }

    /// Create an error context with file path and line number.
    pub fn with_file_and_line<P: Into<PathBuf>>(path: P, line: usize) -> Self {
        Self {
            file_path: Some(path.into()),
            line: Some(line),
            parsing: None,
        }
    }

    /// Add parsing context information.
    pub fn with_parsing<S: Into<String>>(mut self, parsing: S) -> Self {
        self.parsing = Some(parsing.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();

        if let Some(ref path) = self.file_path {
            parts.push(format!(" in file '{}'", path.display()));
        }

        if let Some(line) = self.line {
            parts.push(format!(" at line {}", line));
        }

        if let Some(ref parsing) = self.parsing {
            parts.push(format!(" while parsing {}", parsing));
        }

        if parts.is_empty() {
            return Ok(());
        }

        write!(f, "{}", parts.join(","))
    }
}
