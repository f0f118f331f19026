//! Error types for tipmark.
//!
//! The rendering surfaces degrade silently (an annotation that cannot be
//! placed just stays plain text), so most of these are caught at pass
//! boundaries and logged rather than surfaced to the user.

use miette::Diagnostic;

/// Main error type for tipmark operations.
#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum TipmarkError {
    /// Settings could not be read or written.
    #[error("settings error: {0}")]
    #[diagnostic(code(tipmark::settings))]
    Settings(String),

    /// IO error
    #[error(transparent)]
    #[diagnostic(code(tipmark::io))]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error(transparent)]
    #[diagnostic(code(tipmark::json))]
    Json(#[from] serde_json::Error),

    /// A text node had no parent to splice fragments into.
    #[error("cannot attach fragments: {0}")]
    #[diagnostic(
        code(tipmark::attachment),
        help("the node was detached or is not inside a container")
    )]
    Attachment(String),

    /// Tooltip or container geometry was not available.
    #[error("measurement unavailable: {0}")]
    #[diagnostic(code(tipmark::measurement))]
    Measurement(String),
}

impl TipmarkError {
    pub fn attachment(msg: impl Into<String>) -> Self {
        Self::Attachment(msg.into())
    }

    pub fn measurement(msg: impl Into<String>) -> Self {
        Self::Measurement(msg.into())
    }
}

pub type Result<T, E = TipmarkError> = std::result::Result<T, E>;
