//! Accuracy scoring for freehand circle strokes.
//!
//! Scoring runs in three steps:
//! - fit a circle to the stroke (`perfect-circle-core`),
//! - combine per-point radial deviation with one closure policy into an
//!   accuracy in `[0, 1]`,
//! - classify the accuracy into a [`Tier`].

mod accuracy;
mod error;
mod params;
mod scorer;
mod tier;

pub use accuracy::{
    closure_factor, display_curve, radius_accuracy, start_end_accuracy, ScoreBreakdown,
};
pub use error::ScoreError;
pub use params::{AccuracyPolicy, ScoreParams};
pub use scorer::{CircleScore, CircleScorer};
pub use tier::{format_percent, Tier};

pub use perfect_circle_core::{CircleFit, FitError, FitStrategy, Stroke, StrokeSample};
