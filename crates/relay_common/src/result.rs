//! Common result and error types for the relay engine.

/// The standard result type for fallible internal operations.
///
/// `Err` indicates a broken engine invariant (a bug in relay), never a
/// problem with the circuit being evaluated. Circuit problems are reported as
/// warnings and evaluation still completes.
pub type RelayResult<T> = Result<T, InternalError>;

/// An internal error indicating a bug in relay, not a circuit problem.
#[derive(Debug, thiserror::Error)]
#[error("internal engine error: {message}")]
pub struct InternalError {
    /// Description of the internal error.
    pub message: String,
}

impl InternalError {
    /// Creates a new internal error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for InternalError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_format() {
        let err = InternalError::new("snapshot length mismatch");
        assert_eq!(
            format!("{err}"),
            "internal engine error: snapshot length mismatch"
        );
    }

    #[test]
    fn err_path() {
        let r: RelayResult<i32> = Err(InternalError::new("test error"));
        let err = r.err().unwrap();
        assert_eq!(err.message, "test error");
    }

    #[test]
    fn from_string() {
        let err: InternalError = "from string".to_string().into();
        assert_eq!(err.message, "from string");
    }
}
