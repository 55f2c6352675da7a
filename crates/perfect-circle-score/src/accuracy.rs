use perfect_circle_core::{CircleFit, Stroke};
use serde::{Deserialize, Serialize};

/// Component accuracies reported next to the combined score.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Arc-length-weighted radial accuracy in `[0, 1]`.
    pub radius_accuracy: f64,
    /// Start/end radius agreement, set under the start/end policy.
    pub start_end_accuracy: Option<f64>,
    /// Closure multiplier, set under the closure-penalty policy.
    pub closure_factor: Option<f64>,
    /// Total path length of the stroke in pixels.
    pub arc_length: f64,
    /// Combined accuracy before the optional display curve.
    pub raw_accuracy: f64,
}

/// Arc-length-weighted mean of `max(1 - |d_i / r - 1| / tolerance, 0)` over
/// points `1..n`.
///
/// Returns 0 for strokes without any path length.
pub fn radius_accuracy(stroke: &Stroke, fit: &CircleFit, tolerance: f64) -> f64 {
    let mut total = 0.0;
    let mut acc = 0.0;
    for (p, l) in stroke.weighted_points() {
        let deviation = (fit.center_distance(p) / fit.radius - 1.0).abs();
        acc += (1.0 - deviation / tolerance).max(0.0) * l;
        total += l;
    }
    if total > 0.0 {
        acc / total
    } else {
        0.0
    }
}

/// `max(1 - (|d_last - d_first| / r / tolerance)², 0)`.
pub fn start_end_accuracy(stroke: &Stroke, fit: &CircleFit, tolerance: f64) -> f64 {
    let (Some(first), Some(last)) = (stroke.first(), stroke.last()) else {
        return 0.0;
    };
    let gap = fit.center_distance(last) - fit.center_distance(first);
    let rel = (gap / fit.radius).abs() / tolerance;
    (1.0 - rel * rel).max(0.0)
}

/// `min(L, 2π·rev·r)² / (2π·rev·r)²`.
///
/// Quadratic in the covered fraction of the target path; capped at 1 so
/// overshooting a full turn earns nothing extra.
pub fn closure_factor(arc_length: f64, radius: f64, revolutions: f64) -> f64 {
    let target = std::f64::consts::TAU * revolutions * radius;
    if target.is_nan() || target <= 0.0 {
        return 0.0;
    }
    let covered = arc_length.clamp(0.0, target) / target;
    covered * covered
}

/// Optional display remap that stretches the top of the scale.
///
/// Below 0.9: `1 - (1 + 8(1 - acc)) / 9`; above: `1 - 2(1 - acc)`. Both
/// branches meet at 0.9 → 0.8 and the result stays in `[0, 1]`.
pub fn display_curve(accuracy: f64) -> f64 {
    let miss = 1.0 - accuracy.clamp(0.0, 1.0);
    let out = if accuracy < 0.9 {
        1.0 - (1.0 + 8.0 * miss) / 9.0
    } else {
        1.0 - 2.0 * miss
    };
    out.clamp(0.0, 1.0)
}
