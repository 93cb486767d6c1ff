//! Error types for xsdwalker
//!
//! This module defines all error types used throughout the library.
//! Per-document failures (`ParseFailure`, `Error::Resolution`) are
//! non-fatal to a walk; everything else aborts the caller's operation.

use std::fmt;
use thiserror::Error;

/// Result type alias using xsdwalker Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for xsdwalker operations
#[derive(Error, Debug)]
pub enum Error {
    /// Fetch or parse failure for one schema document
    #[error("parse failure: {0}")]
    Parse(#[from] ParseFailure),

    /// Malformed reference string in an import declaration
    #[error("resolution error: {0}")]
    Resolution(String),

    /// Namespace linkage mismatch found by the strict post-pass
    #[error("linkage error: {0}")]
    Linkage(#[from] LinkageMismatch),

    /// Malformed seed input: neither an existing path nor a valid URL
    #[error("invalid input '{0}': not an existing file/directory or an absolute URL")]
    Input(String),

    /// Resource loading error
    #[error("resource error: {0}")]
    Resource(String),

    /// Limit exceeded error
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// XML parsing/writing error
    #[error("XML error: {0}")]
    Xml(String),

    /// URL parsing error
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Failure to fetch or parse one schema document
///
/// Carries the location of the offending document. During a walk this is
/// logged and the location simply contributes no node.
#[derive(Debug, Clone)]
pub struct ParseFailure {
    /// Canonical location of the document that failed
    pub location: String,
    /// What went wrong
    pub reason: String,
}

impl ParseFailure {
    /// Create a new parse failure
    pub fn new(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.reason)
    }
}

impl std::error::Error for ParseFailure {}

/// A recorded edge whose asserted namespace disagrees with the target's
/// actual target namespace
#[derive(Debug, Clone)]
pub struct LinkageMismatch {
    /// Location of the importing document
    pub source: String,
    /// Location of the imported document
    pub target: String,
    /// Namespace asserted by the import declaration
    pub asserted: String,
    /// Actual target namespace of the imported document
    pub actual: String,
}

impl LinkageMismatch {
    /// Create a new linkage mismatch
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        asserted: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            asserted: asserted.into(),
            actual: actual.into(),
        }
    }
}

impl fmt::Display for LinkageMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "import {} -> {} asserts namespace '{}' but target declares '{}'",
            self.source, self.target, self.asserted, self.actual
        )
    }
}

impl std::error::Error for LinkageMismatch {}
