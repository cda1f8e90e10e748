// ABOUTME: Error types for docscrub including the ErrorCode enum and ProcessError struct.
// ABOUTME: Provides categorized errors with convenience constructors and boolean helpers.

use std::fmt;
use std::path::{Path, PathBuf};

/// Error codes representing the categories of processing failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    NotFound,
    InvalidFormat,
    ExtractionFailed,
    ParseFailed,
    Io,
    Unexpected,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::NotFound => "file not found",
            ErrorCode::InvalidFormat => "not an HTML file",
            ErrorCode::ExtractionFailed => "content extraction failed",
            ErrorCode::ParseFailed => "parse error",
            ErrorCode::Io => "I/O error",
            ErrorCode::Unexpected => "unexpected error",
        };
        write!(f, "{}", s)
    }
}

/// The main error type for document processing.
#[derive(Debug, thiserror::Error)]
pub struct ProcessError {
    pub code: ErrorCode,
    pub path: PathBuf,
    pub op: String,
    #[source]
    pub source: Option<anyhow::Error>,
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "docscrub: {} {}: {}",
            self.op,
            self.path.display(),
            self.code
        )?;
        if let Some(ref src) = self.source {
            write!(f, ": {}", src)?;
        }
        Ok(())
    }
}

impl ProcessError {
    fn new(
        code: ErrorCode,
        path: impl AsRef<Path>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code,
            path: path.as_ref().to_path_buf(),
            op: op.into(),
            source,
        }
    }

    /// Create a NotFound error.
    pub fn not_found(path: impl AsRef<Path>, op: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, path, op, None)
    }

    /// Create an InvalidFormat error.
    pub fn invalid_format(path: impl AsRef<Path>, op: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidFormat, path, op, None)
    }

    /// Create an ExtractionFailed error.
    pub fn extraction_failed(
        path: impl AsRef<Path>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::new(ErrorCode::ExtractionFailed, path, op, source)
    }

    /// Create a ParseFailed error.
    pub fn parse_failed(
        path: impl AsRef<Path>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::new(ErrorCode::ParseFailed, path, op, source)
    }

    /// Create an Io error wrapping the underlying `std::io::Error`.
    pub fn io(path: impl AsRef<Path>, op: impl Into<String>, err: std::io::Error) -> Self {
        Self::new(ErrorCode::Io, path, op, Some(anyhow::Error::new(err)))
    }

    /// Create an Unexpected error.
    pub fn unexpected(
        path: impl AsRef<Path>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::new(ErrorCode::Unexpected, path, op, source)
    }

    /// Returns true if this is a NotFound error.
    pub fn is_not_found(&self) -> bool {
        self.code == ErrorCode::NotFound
    }

    /// Returns true if this is an InvalidFormat error.
    pub fn is_invalid_format(&self) -> bool {
        self.code == ErrorCode::InvalidFormat
    }

    /// Returns true if this is an ExtractionFailed error.
    pub fn is_extraction_failed(&self) -> bool {
        self.code == ErrorCode::ExtractionFailed
    }

    /// Returns true if this is a ParseFailed error.
    pub fn is_parse_failed(&self) -> bool {
        self.code == ErrorCode::ParseFailed
    }

    /// Returns true if this is an Io error.
    pub fn is_io(&self) -> bool {
        self.code == ErrorCode::Io
    }

    /// Returns true if this is an Unexpected error.
    pub fn is_unexpected(&self) -> bool {
        self.code == ErrorCode::Unexpected
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ProcessError>;
