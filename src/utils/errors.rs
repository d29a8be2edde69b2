//! Error types of the genoslice library

use std::fmt;

/// Error produced by a persistent annotation store backend
///
/// The library does not interpret the message; any store failure during a
/// batched flush aborts the run, since a partially applied slice would break
/// the piece-contiguity invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    message: String,
}

impl StoreError {
    pub fn new<S: fmt::Display>(message: S) -> Self {
        StoreError {
            message: message.to_string(),
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "annotation store error: {}", self.message)
    }
}

impl std::error::Error for StoreError {}

/// Error raised while slicing an annotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SliceError {
    /// The slicer observed a state that must not occur: the position
    /// classifier matched none of its six categories, a transcript hit a
    /// second border split within one slice, or a queued intent referenced
    /// a record it does not belong to. Indicates a bug; never retried.
    InvariantViolation(String),
    /// The batched flush against the persistent store failed
    StoreFailure(StoreError),
}

impl SliceError {
    pub fn invariant<S: fmt::Display>(message: S) -> Self {
        SliceError::InvariantViolation(message.to_string())
    }
}

impl fmt::Display for SliceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SliceError::InvariantViolation(msg) => {
                write!(f, "slicing invariant violated: {}", msg)
            }
            SliceError::StoreFailure(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for SliceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SliceError::StoreFailure(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for SliceError {
    fn from(err: StoreError) -> Self {
        SliceError::StoreFailure(err)
    }
}

/// Error for reading slice definitions from an input source
#[derive(Debug)]
pub struct ReadWriteError {
    message: String,
}

impl ReadWriteError {
    pub fn new<S: fmt::Display>(message: S) -> Self {
        ReadWriteError {
            message: message.to_string(),
        }
    }
}

impl fmt::Display for ReadWriteError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ReadWriteError {}

impl From<std::io::Error> for ReadWriteError {
    fn from(err: std::io::Error) -> Self {
        ReadWriteError::new(err)
    }
}

impl From<serde_json::Error> for ReadWriteError {
    fn from(err: serde_json::Error) -> Self {
        ReadWriteError::new(err)
    }
}
