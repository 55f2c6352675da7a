use perfect_circle_core::{fit_circle, CircleFit, Stroke};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::accuracy::{
    closure_factor, display_curve, radius_accuracy, start_end_accuracy, ScoreBreakdown,
};
use crate::error::ScoreError;
use crate::params::{AccuracyPolicy, ScoreParams};
use crate::tier::Tier;

/// Output of scoring one stroke.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CircleScore {
    pub fit: CircleFit,
    /// Combined accuracy in `[0, 1]`; the tier is derived from this value.
    pub accuracy: f64,
    pub tier: Tier,
    pub breakdown: ScoreBreakdown,
}

/// Fits and scores finished strokes.
#[derive(Clone, Debug, Default)]
pub struct CircleScorer {
    params: ScoreParams,
}

impl CircleScorer {
    /// Validate `params` and build a scorer.
    pub fn new(params: ScoreParams) -> Result<Self, ScoreError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &ScoreParams {
        &self.params
    }

    /// Fit a circle to `stroke` and score it.
    ///
    /// This does not apply the tap guard; callers that want "no score" for
    /// short strokes check [`Stroke::is_scorable`] first.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, stroke), fields(points = stroke.len()))
    )]
    pub fn score(&self, stroke: &Stroke) -> Result<CircleScore, ScoreError> {
        let fit = fit_circle(stroke, self.params.fit)?;
        Ok(self.score_with_fit(stroke, fit))
    }

    /// Score `stroke` against an already fitted circle.
    pub fn score_with_fit(&self, stroke: &Stroke, fit: CircleFit) -> CircleScore {
        let p = &self.params;
        let arc_length = stroke.arc_length();
        let radius_acc = radius_accuracy(stroke, &fit, p.radius_tolerance);

        let (raw, start_end, closure) = match p.policy {
            AccuracyPolicy::StartEnd => {
                let se = start_end_accuracy(stroke, &fit, p.start_end_tolerance);
                let w = p.start_end_weight;
                ((1.0 - w) * radius_acc + w * se, Some(se), None)
            }
            AccuracyPolicy::ClosurePenalty => {
                let factor = closure_factor(arc_length, fit.radius, p.closure_revolutions);
                (radius_acc * factor, None, Some(factor))
            }
        };
        let raw = raw.clamp(0.0, 1.0);
        let accuracy = if p.display_curve {
            display_curve(raw)
        } else {
            raw
        };
        let tier = Tier::from_accuracy(accuracy);

        log::debug!(
            "scored stroke: points={} arc={:.1} radius_acc={:.3} raw={:.3} acc={:.3} tier={:?}",
            stroke.len(),
            arc_length,
            radius_acc,
            raw,
            accuracy,
            tier
        );

        CircleScore {
            fit,
            accuracy,
            tier,
            breakdown: ScoreBreakdown {
                radius_accuracy: radius_acc,
                start_end_accuracy: start_end,
                closure_factor: closure,
                arc_length,
                raw_accuracy: raw,
            },
        }
    }
}
