/// Errors returned by the circle fitters.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitError {
    #[error("stroke needs at least 2 points to fit a circle (got {got})")]
    TooFewPoints { got: usize },
    #[error("stroke has zero arc length")]
    DegenerateStroke,
    #[error("least-squares circle system is singular")]
    UnsolvableFit,
}
