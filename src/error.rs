//! Errors reported by the ledger core.

/// The ways a ledger operation can fail.
///
/// Every variant carries enough context (operation or field) for the caller
/// to show an actionable message. None of them are retried.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// Caller-supplied data violates an invariant. Nothing was written.
    #[error("invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// The store could not be reached or a statement failed. The operation
    /// had no effect.
    #[error("could not {operation}: {source}")]
    Persistence {
        operation: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    /// The period selector is incomplete or unparsable.
    ///
    /// This is a "nothing to show yet" state rather than a failure; see
    /// [LedgerError::is_pending_input].
    #[error("period not selected: {0}")]
    InvalidPeriod(String),

    /// Encoding an export failed. No file should be written.
    #[error("could not encode export: {0}")]
    Serialization(String),
}

impl LedgerError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Wrap a SQLite error with the operation that triggered it.
    ///
    /// Meant for `map_err`: `.map_err(LedgerError::persistence("list budget limits"))`.
    pub fn persistence(operation: &'static str) -> impl FnOnce(rusqlite::Error) -> Self {
        move |source| Self::Persistence { operation, source }
    }

    /// Whether the caller should prompt for more input instead of reporting
    /// a failure.
    pub fn is_pending_input(&self) -> bool {
        matches!(self, Self::InvalidPeriod(_))
    }
}

impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}
