/// Errors raised by [`crate::StatsStore`] implementations and stats decoding.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("invalid stored value for `{key}`: {value:?}")]
    InvalidValue { key: String, value: String },
}

/// Errors returned by [`crate::DrawingSession`].
#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error("a stroke is already in progress")]
    StrokeInProgress,
    #[error(transparent)]
    Store(#[from] StoreError),
}
