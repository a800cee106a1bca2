use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

use crate::common::{atomic, Atomic};

/// Error kinds for Cubby operations
///
/// This enum represents all possible error types that can occur while working
/// with a store factory or its stores. Each error kind describes a specific
/// category of failure, enabling precise error handling.
///
/// # Examples
///
/// ```rust,ignore
/// use cubby::errors::{CubbyError, ErrorKind, CubbyResult};
///
/// fn example() -> CubbyResult<()> {
///     Err(CubbyError::new("Remove by id failed for invalid id", ErrorKind::InvalidKey))
/// }
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    // Environment Errors - fatal at factory construction
    /// The hosting environment lacks the requested storage partition
    EnvironmentUnsupported,

    // Caller Errors - always surfaced, never swallowed
    /// A wrongly-typed record was passed to `save`/`remove`
    TypeMismatch,
    /// A malformed id string was passed to `remove`
    InvalidKey,

    // Identity Errors - internal invariant violations
    /// No identifier could be derived while saving a record
    IdentifierAssignment,

    // Data Encoding Errors - serialization/deserialization failures
    /// Error encoding or decoding a stored record
    EncodingError,

    // Backend Errors - for backend providers to surface
    /// Error from the key-value backend
    BackendError,

    // Operation Errors - invalid/unsupported operations
    /// The operation is not valid in the current context
    InvalidOperation,

    // Generic/Internal Errors - used as fallback
    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::EnvironmentUnsupported => write!(f, "Environment unsupported"),
            ErrorKind::TypeMismatch => write!(f, "Type mismatch"),
            ErrorKind::InvalidKey => write!(f, "Invalid key"),
            ErrorKind::IdentifierAssignment => write!(f, "Identifier assignment failure"),
            ErrorKind::EncodingError => write!(f, "Encoding error"),
            ErrorKind::BackendError => write!(f, "Backend error"),
            ErrorKind::InvalidOperation => write!(f, "Invalid operation"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Custom Cubby error type.
///
/// `CubbyError` encapsulates error information including the error message, kind,
/// and optional cause. It supports error chaining and backtraces for debugging.
///
/// # Examples
///
/// ```rust,ignore
/// use cubby::errors::{CubbyError, ErrorKind};
///
/// // Create a simple error
/// let err = CubbyError::new("Invalid id", ErrorKind::InvalidKey);
///
/// // Create an error with a cause
/// let cause = CubbyError::new("Backend unavailable", ErrorKind::BackendError);
/// let err = CubbyError::new_with_cause("Save failed", ErrorKind::InternalError, cause);
/// ```
///
/// # Type alias
///
/// The `CubbyResult<T>` type alias is equivalent to `Result<T, CubbyError>` and is
/// used throughout the codebase for operations that can fail.
#[derive(Clone)]
pub struct CubbyError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<CubbyError>>,
    backtrace: Atomic<Backtrace>,
}

impl CubbyError {
    /// Creates a new `CubbyError` with the specified message and error kind.
    ///
    /// # Arguments
    ///
    /// * `message` - A description of the error
    /// * `error_kind` - The category of error
    ///
    /// # Returns
    ///
    /// A new `CubbyError` instance.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        CubbyError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: atomic(Backtrace::new()),
        }
    }

    /// Creates a new `CubbyError` with a cause error.
    ///
    /// This creates an error chain where the cause error is preserved for debugging.
    ///
    /// # Arguments
    ///
    /// * `message` - A description of the error
    /// * `error_kind` - The category of error
    /// * `cause` - The underlying error that caused this error
    ///
    /// # Returns
    ///
    /// A new `CubbyError` instance with the cause error attached.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: CubbyError) -> Self {
        CubbyError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: atomic(Backtrace::new()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&Box<CubbyError>> {
        self.cause.as_ref()
    }
}

impl Display for CubbyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for CubbyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{}\n{:?}", self.message, self.backtrace.read()),
        }
    }
}

impl Error for CubbyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for Cubby operations.
///
/// `CubbyResult<T>` is shorthand for `Result<T, CubbyError>`.
/// All fallible Cubby operations return this type.
pub type CubbyResult<T> = Result<T, CubbyError>;

// From trait implementations for automatic error conversion
impl From<serde_json::Error> for CubbyError {
    fn from(err: serde_json::Error) -> Self {
        CubbyError::new(
            &format!("JSON encoding error: {}", err),
            ErrorKind::EncodingError,
        )
    }
}

impl From<String> for CubbyError {
    fn from(msg: String) -> Self {
        CubbyError::new(&msg, ErrorKind::InternalError)
    }
}

impl From<&str> for CubbyError {
    fn from(msg: &str) -> Self {
        CubbyError::new(msg, ErrorKind::InternalError)
    }
}
