use thiserror::Error;

/// Errors surfaced to the user by journal operations
#[derive(Debug, Error)]
pub enum JournalError {
    #[error("Please fill {field} before saving")]
    MissingField { field: &'static str },

    #[error("Cannot price trade on {symbol}: prices and sizes must be finite numbers")]
    Unpriceable { symbol: String },

    #[error("No trades to export")]
    NothingToExport,

    #[error("Storage write failed: {reason}")]
    Storage { reason: String },

    #[error("Could not attach screenshot: {reason}")]
    Attachment { reason: String },

    #[error("A screenshot is still being read, wait for it to finish")]
    SubmissionInFlight,
}

impl JournalError {
    /// True for the errors that block a trade from being saved because of
    /// what the user typed (as opposed to I/O failures).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            JournalError::MissingField { .. } | JournalError::Unpriceable { .. }
        )
    }
}
