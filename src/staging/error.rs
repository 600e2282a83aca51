// ==========================================
// GST Billing Core - Staging Error Types
// ==========================================

use thiserror::Error;

/// Errors raised by the review/edit staging sessions.
///
/// Unlike parse-time errors these are recoverable in place: the user edits
/// or re-selects and retries the commit without re-uploading the file.
#[derive(Error, Debug)]
pub enum StagingError {
    #[error("cannot {action} while the session is {state}")]
    InvalidState {
        state: &'static str,
        action: &'static str,
    },

    #[error("no staged item at index {0}")]
    UnknownIndex(usize),

    #[error("unknown editable field: {0}")]
    UnknownField(String),

    #[error("validation failed; fix the highlighted fields and retry")]
    ValidationFailed,

    #[error("Please select at least one item to import")]
    NothingSelected,
}
