use perfect_circle_core::FitStrategy;
use serde::{Deserialize, Serialize};

use crate::error::ScoreError;

/// How the radial-deviation accuracy is combined with a closure term.
///
/// Exactly one policy applies per scorer; they are not composable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccuracyPolicy {
    /// `(1 - w) * radius + w * start_end`: rewards strokes whose end sits on
    /// the same radius as their start.
    StartEnd,
    /// `radius * closure_factor`: punishes strokes that cover less than
    /// `closure_revolutions` of a full turn, does not reward overshoot.
    #[default]
    ClosurePenalty,
}

/// Configuration for [`crate::CircleScorer`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreParams {
    /// Circle estimation strategy.
    pub fit: FitStrategy,
    /// Accuracy combination policy.
    pub policy: AccuracyPolicy,
    /// Relative radial deviation `|d / r - 1|` at which a point scores 0.
    ///
    /// The default of 0.25 keeps a 50 px circle drawn with ±2 px jitter at
    /// or above 0.90; 0.15 is noticeably harsher.
    pub radius_tolerance: f64,
    /// Relative start/end radius gap at which the start/end term scores 0.
    pub start_end_tolerance: f64,
    /// Weight of the start/end term under [`AccuracyPolicy::StartEnd`].
    pub start_end_weight: f64,
    /// Fraction of a full revolution the stroke must cover to escape the
    /// closure penalty (0.95 means a path of `1.9π·r`).
    pub closure_revolutions: f64,
    /// Apply [`crate::display_curve`] to the reported accuracy.
    pub display_curve: bool,
}

impl Default for ScoreParams {
    fn default() -> Self {
        Self {
            fit: FitStrategy::LeastSquares,
            policy: AccuracyPolicy::ClosurePenalty,
            radius_tolerance: 0.25,
            start_end_tolerance: 0.1,
            start_end_weight: 0.2,
            closure_revolutions: 0.95,
            display_curve: false,
        }
    }
}

impl ScoreParams {
    /// The pairing used by the weighted-centroid prototype: 0.15 tolerance and
    /// the start/end policy.
    pub fn weighted_start_end() -> Self {
        Self {
            fit: FitStrategy::WeightedCentroid,
            policy: AccuracyPolicy::StartEnd,
            radius_tolerance: 0.15,
            ..Self::default()
        }
    }

    /// Check that every numeric field is usable.
    pub fn validate(&self) -> Result<(), ScoreError> {
        fn positive(name: &str, v: f64) -> Result<(), ScoreError> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(ScoreError::InvalidParams(format!(
                    "{name} must be finite and > 0 (got {v})"
                )))
            }
        }

        positive("radius_tolerance", self.radius_tolerance)?;
        positive("start_end_tolerance", self.start_end_tolerance)?;
        positive("closure_revolutions", self.closure_revolutions)?;
        if !(0.0..=1.0).contains(&self.start_end_weight) {
            return Err(ScoreError::InvalidParams(format!(
                "start_end_weight must be in [0, 1] (got {})",
                self.start_end_weight
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        ScoreParams::default().validate().expect("default params");
        ScoreParams::weighted_start_end()
            .validate()
            .expect("prototype params");
    }

    #[test]
    fn default_tolerances() {
        let params = ScoreParams::default();
        assert_eq!(params.radius_tolerance, 0.25);
        assert_eq!(params.start_end_tolerance, 0.1);
        assert_eq!(ScoreParams::weighted_start_end().radius_tolerance, 0.15);
    }

    #[test]
    fn rejects_bad_numbers() {
        let params = ScoreParams {
            radius_tolerance: 0.0,
            ..ScoreParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ScoreError::InvalidParams(_))
        ));

        let params = ScoreParams {
            start_end_weight: 1.5,
            ..ScoreParams::default()
        };
        assert!(params.validate().is_err());

        let params = ScoreParams {
            closure_revolutions: f64::NAN,
            ..ScoreParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let params: ScoreParams =
            serde_json::from_str(r#"{"policy":"start_end","radius_tolerance":0.15}"#)
                .expect("parse params");
        assert_eq!(params.policy, AccuracyPolicy::StartEnd);
        assert_eq!(params.radius_tolerance, 0.15);
        assert_eq!(params.fit, FitStrategy::LeastSquares);
        assert_eq!(params.closure_revolutions, 0.95);
    }
}
