use perfect_circle_core::FitError;

/// Errors returned by [`crate::CircleScorer`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ScoreError {
    #[error(transparent)]
    Fit(#[from] FitError),
    #[error("invalid score parameters: {0}")]
    InvalidParams(String),
}
