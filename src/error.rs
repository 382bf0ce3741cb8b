//! Centralized error handling for Parjson.
//!
//! Every failure of an encode or decode call is reported through
//! [`ParjsonError`]. Nothing is recovered locally: a failing unit of work aborts
//! the whole call and the caller receives the error with its original cause.
//!
//! ## Error Categories
//!
//! - **Parse Errors** ([`ParjsonError::Parse`]): the text is not well formed.
//! - **Schema Errors** ([`ParjsonError::Schema`]): a required key is missing or
//!   holds a value of the wrong kind.
//! - **Task Errors** ([`ParjsonError::Task`], [`ParjsonError::TaskPanicked`]):
//!   a unit of work submitted to the pool failed or panicked.
//! - **Pool / Config Errors**: the worker pool could not be built or the
//!   options were invalid.
//! - **I/O Errors** ([`ParjsonError::Io`]): the writer/reader helpers failed.
//!
//! ## Inspecting a failure
//!
//! ```rust
//! use parjson::{Parjson, ParjsonError};
//!
//! let err = Parjson::decode(r#"{"name": "Ann", "age": "30"}"#).unwrap_err();
//! match err.root_cause() {
//!     ParjsonError::Schema(msg) => println!("bad record: {msg}"),
//!     other => println!("other failure: {other}"),
//! }
//! ```

use std::fmt;
use std::io;
use std::sync::Arc;

/// A specialized `Result` type for Parjson operations.
pub type Result<T> = std::result::Result<T, ParjsonError>;

/// The master error enum covering all failure domains in Parjson.
///
/// This type is `Clone` so a failure captured on a worker thread can be handed
/// back to the joining thread. I/O errors are wrapped in `Arc` for that reason.
#[derive(Debug, Clone)]
pub enum ParjsonError {
    /// The input text is not a well-formed object/array/scalar sequence.
    Parse {
        /// Byte offset in the input where parsing stopped.
        offset: usize,
        /// What the parser expected or found.
        message: String,
    },

    /// A required key is absent or holds a value of an unexpected kind.
    Schema(String),

    /// A unit of work submitted to the pool failed.
    ///
    /// The boxed value is the original cause, available through
    /// [`std::error::Error::source`] and [`ParjsonError::root_cause`].
    Task(Box<ParjsonError>),

    /// A unit of work panicked. The string carries the panic message.
    TaskPanicked(String),

    /// The worker pool could not be built, or it went away before a task
    /// reported its result.
    Pool(String),

    /// Invalid configuration (e.g. a pool of zero workers).
    Config(String),

    /// Low-level I/O failure in the writer/reader helpers.
    Io(Arc<io::Error>),
}

impl ParjsonError {
    pub(crate) fn parse(offset: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            offset,
            message: message.into(),
        }
    }

    /// Wraps `self` as the cause of a failed task.
    ///
    /// Errors that are already task failures are returned unchanged so that a
    /// cause is never wrapped twice.
    #[must_use]
    pub fn into_task_error(self) -> Self {
        match self {
            Self::Task(_) | Self::TaskPanicked(_) => self,
            other => Self::Task(Box::new(other)),
        }
    }

    /// Returns the innermost error, looking through any `Task` wrappers.
    pub fn root_cause(&self) -> &Self {
        let mut current = self;
        while let Self::Task(inner) = current {
            current = inner;
        }
        current
    }

    /// True if the root cause is a [`ParjsonError::Parse`].
    pub fn is_parse(&self) -> bool {
        matches!(self.root_cause(), Self::Parse { .. })
    }

    /// True if the root cause is a [`ParjsonError::Schema`].
    pub fn is_schema(&self) -> bool {
        matches!(self.root_cause(), Self::Schema(_))
    }
}

impl fmt::Display for ParjsonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse { offset, message } => {
                write!(f, "Parse Error at byte {offset}: {message}")
            }
            Self::Schema(s) => write!(f, "Schema Error: {s}"),
            Self::Task(cause) => write!(f, "Task Error: {cause}"),
            Self::TaskPanicked(s) => write!(f, "Task Panicked: {s}"),
            Self::Pool(s) => write!(f, "Pool Error: {s}"),
            Self::Config(s) => write!(f, "Config Error: {s}"),
            Self::Io(e) => write!(f, "I/O Error: {e}"),
        }
    }
}

impl std::error::Error for ParjsonError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Task(cause) => Some(cause.as_ref()),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ParjsonError {
    fn from(err: io::Error) -> Self {
        Self::Io(Arc::new(err))
    }
}

impl From<rayon::ThreadPoolBuildError> for ParjsonError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        Self::Pool(err.to_string())
    }
}
