//! Error types shared across the crate.

/// Errors surfaced by planner operations.
///
/// Failures of individual image layers inside the compositor are not
/// represented here: an undecodable source is skipped locally and never
/// fails the composite as a whole. Store *reads* likewise degrade to an
/// empty list instead of erroring, so the planner stays usable over a
/// corrupt backing file.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A user-facing precondition failed (nothing selected when saving,
    /// blank required fields when cataloguing an item). Recoverable; the
    /// operation aborts without partial state changes.
    #[error("{0}")]
    Validation(String),

    /// A payload was not valid JSON or not the expected shape. An import
    /// that fails to parse is aborted entirely, no partial merge.
    #[error("invalid JSON payload: {0}")]
    Parse(#[from] serde_json::Error),

    /// Encoding the composite thumbnail failed.
    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    /// A store write could not be persisted.
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for an [`Error::Validation`] with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
