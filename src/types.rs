use std::fmt;

/// A result type that can contain warnings alongside the successful result.
///
/// Parsing a DCM file succeeds as long as nothing fatal is found; problems
/// such as dimension mismatches or unknown fields are reported as warnings
/// next to the best-effort document.
///
/// # Type Parameters
///
/// * `T` - The success result type
/// * `W` - The warning type (typically [`Diagnostic`])
///
/// # Examples
///
/// ```rust
/// use dcmreader::types::WithWarnings;
///
/// let result = WithWarnings::Warning("parsed".to_string(), vec!["X dimension mismatch".to_string()]);
/// assert!(result.is_warning());
/// assert_eq!(result.clone().unwrap(), "parsed");
///
/// let warnings = result.warnings();
/// assert_eq!(warnings.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum WithWarnings<T, W> {
    /// Successful result without warnings
    Ok(T),
    /// Successful result with warnings
    Warning(T, Vec<W>),
}

impl<T, W> WithWarnings<T, W> {
    /// Builds `Ok` when there are no warnings and `Warning` otherwise.
    pub fn new(data: T, warnings: Vec<W>) -> Self {
        if warnings.is_empty() {
            WithWarnings::Ok(data)
        } else {
            WithWarnings::Warning(data, warnings)
        }
    }

    /// Checks if the result is successful without warnings.
    pub fn is_ok(&self) -> bool {
        matches!(self, WithWarnings::Ok(_))
    }

    /// Checks if the result has warnings.
    pub fn is_warning(&self) -> bool {
        matches!(self, WithWarnings::Warning(_, _))
    }

    /// Borrows the result value.
    pub fn value(&self) -> &T {
        match self {
            WithWarnings::Ok(data) => data,
            WithWarnings::Warning(data, _) => data,
        }
    }

    /// Borrows the warnings; empty if there were none.
    pub fn warnings_ref(&self) -> &[W] {
        match self {
            WithWarnings::Ok(_) => &[],
            WithWarnings::Warning(_, warnings) => warnings,
        }
    }

    /// Extracts the result value, discarding any warnings.
    ///
    /// This consumes the `WithWarnings` and returns the contained value,
    /// regardless of whether there were warnings.
    pub fn unwrap(self) -> T {
        match self {
            WithWarnings::Ok(data) => data,
            WithWarnings::Warning(data, _) => data,
        }
    }

    /// Extracts the warnings, discarding the result value.
    ///
    /// Returns an empty vector if there were no warnings.
    pub fn warnings(self) -> Vec<W> {
        match self {
            WithWarnings::Ok(_) => Vec::new(),
            WithWarnings::Warning(_, warnings) => warnings,
        }
    }
}

impl<T, W> From<WithWarnings<T, W>> for (T, Vec<W>) {
    /// Converts `WithWarnings` into a tuple of (result, warnings).
    ///
    /// This provides a convenient way to destructure the result and
    /// warnings simultaneously.
    fn from(value: WithWarnings<T, W>) -> Self {
        match value {
            WithWarnings::Ok(data) => (data, Vec::new()),
            WithWarnings::Warning(data, warnings) => (data, warnings),
        }
    }
}

/// Category of a recoverable problem found while reading a DCM file.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// Declared and actual array sizes disagree.
    DimensionMismatch,
    /// A line inside a block starts with a keyword the block does not accept.
    UnknownField,
    /// A top-level line starts with an unknown keyword.
    UnknownKeyword,
    /// A known field whose content could not be understood (e.g. `VAR` without `=`).
    MalformedField,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DiagnosticKind::DimensionMismatch => "dimension mismatch",
            DiagnosticKind::UnknownField => "unknown field",
            DiagnosticKind::UnknownKeyword => "unknown keyword",
            DiagnosticKind::MalformedField => "malformed field",
        };
        f.write_str(text)
    }
}

/// A recoverable problem, located by its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: usize,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn new(line: usize, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            line,
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}: {}", self.line, self.kind, self.message)
    }
}
