use nalgebra::{Matrix3, Point2, Vector2, Vector3};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::error::FitError;
use crate::linalg::solve_3x3_gauss_jordan;
use crate::stroke::Stroke;

/// A circle estimated from a stroke.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CircleFit {
    pub center: Point2<f64>,
    /// Always finite and strictly positive.
    pub radius: f64,
}

impl CircleFit {
    /// Distance from `p` to the fitted center.
    #[inline]
    pub fn center_distance(&self, p: Point2<f64>) -> f64 {
        nalgebra::distance(&self.center, &p)
    }

    /// Signed radial residual of `p`: positive outside the circle.
    #[inline]
    pub fn radial_residual(&self, p: Point2<f64>) -> f64 {
        self.center_distance(p) - self.radius
    }

    pub fn circumference(&self) -> f64 {
        std::f64::consts::TAU * self.radius
    }
}

/// Circle estimation strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitStrategy {
    /// Arc-length-weighted centroid and mean radius. Cheap, but biased by
    /// sampling density on open or uneven strokes.
    WeightedCentroid,
    /// Algebraic least-squares fit of `x² + y² = A·x + B·y + C`.
    #[default]
    LeastSquares,
}

/// Fit a circle to `stroke` with the requested strategy.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(stroke), fields(points = stroke.len()))
)]
pub fn fit_circle(stroke: &Stroke, strategy: FitStrategy) -> Result<CircleFit, FitError> {
    match strategy {
        FitStrategy::WeightedCentroid => fit_weighted_centroid(stroke),
        FitStrategy::LeastSquares => fit_least_squares(stroke),
    }
}

/// Reject strokes that have no usable path and return the total arc length.
fn checked_arc_length(stroke: &Stroke) -> Result<f64, FitError> {
    if stroke.len() < 2 {
        return Err(FitError::TooFewPoints { got: stroke.len() });
    }
    let total = stroke.arc_length();
    if !total.is_finite() || total <= 0.0 {
        return Err(FitError::DegenerateStroke);
    }
    Ok(total)
}

fn validated(center: Point2<f64>, radius: f64) -> Result<CircleFit, FitError> {
    if !center.x.is_finite() || !center.y.is_finite() || !radius.is_finite() || radius <= 0.0 {
        return Err(FitError::UnsolvableFit);
    }
    Ok(CircleFit { center, radius })
}

/// Arc-length-weighted heuristic.
///
/// Center is the average of points `1..n` weighted by the length of the
/// segment ending at each point; radius is the same weighted average of the
/// distances to that center.
pub fn fit_weighted_centroid(stroke: &Stroke) -> Result<CircleFit, FitError> {
    let total = checked_arc_length(stroke)?;

    let mut acc = Vector2::<f64>::zeros();
    for (p, l) in stroke.weighted_points() {
        acc += p.coords * l;
    }
    let center = Point2::from(acc / total);

    let radius = stroke
        .weighted_points()
        .map(|(p, l)| nalgebra::distance(&p, &center) * l)
        .sum::<f64>()
        / total;

    log::debug!(
        "weighted centroid fit: center=({:.2},{:.2}) r={:.2} over {} points",
        center.x,
        center.y,
        radius,
        stroke.len()
    );
    if radius <= 0.0 {
        return Err(FitError::DegenerateStroke);
    }
    validated(center, radius)
}

/// Translate to the centroid and scale so the mean distance to it is √2.
///
/// Returns `(centroid, scale)`; normalized coordinates are `(p - centroid) * scale`.
fn normalization(stroke: &Stroke) -> (Point2<f64>, f64) {
    let n = stroke.len() as f64;
    let mut sum = Vector2::<f64>::zeros();
    for p in stroke.points() {
        sum += p.coords;
    }
    let centroid = Point2::from(sum / n);

    let mean_dist = stroke
        .points()
        .map(|p| nalgebra::distance(&p, &centroid))
        .sum::<f64>()
        / n;

    let scale = if mean_dist > 1e-12 {
        std::f64::consts::SQRT_2 / mean_dist
    } else {
        1.0
    };
    (centroid, scale)
}

/// Algebraic least-squares fit.
///
/// Solves the normal equations of `x² + y² = A·x + B·y + C` over all points
/// with Gauss-Jordan elimination; center is `(A/2, B/2)` and radius
/// `sqrt(C + a² + b²)`. The fit runs in normalized coordinates and is mapped
/// back afterwards. Collinear strokes make the system singular and fail with
/// [`FitError::UnsolvableFit`].
pub fn fit_least_squares(stroke: &Stroke) -> Result<CircleFit, FitError> {
    checked_arc_length(stroke)?;

    let (centroid, scale) = normalization(stroke);

    let mut ata = Matrix3::<f64>::zeros();
    let mut atb = Vector3::<f64>::zeros();
    for p in stroke.points() {
        let q = (p - centroid) * scale;
        let f = Vector3::new(q.x, q.y, 1.0);
        let target = q.norm_squared();
        ata += f * f.transpose();
        atb += f * target;
    }

    let sol = solve_3x3_gauss_jordan(&ata, &atb).ok_or(FitError::UnsolvableFit)?;
    let a = 0.5 * sol[0];
    let b = 0.5 * sol[1];
    let radicand = sol[2] + a * a + b * b;
    if !radicand.is_finite() || radicand <= 0.0 {
        return Err(FitError::UnsolvableFit);
    }

    let center = centroid + Vector2::new(a, b) / scale;
    let radius = radicand.sqrt() / scale;
    log::debug!(
        "least-squares fit: center=({:.2},{:.2}) r={:.2} over {} points",
        center.x,
        center.y,
        radius,
        stroke.len()
    );
    validated(center, radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn circle_stroke(cx: f64, cy: f64, r: f64, n: usize, sweep: f64) -> Stroke {
        Stroke::from_points((0..n).map(|i| {
            let t = sweep * i as f64 / (n - 1) as f64;
            Point2::new(cx + r * t.cos(), cy + r * t.sin())
        }))
    }

    #[test]
    fn least_squares_recovers_exact_circle() {
        let stroke = circle_stroke(120.0, -40.0, 35.0, 64, std::f64::consts::TAU);
        let fit = fit_least_squares(&stroke).expect("fit");
        assert_relative_eq!(fit.center, Point2::new(120.0, -40.0), epsilon = 1e-9);
        assert_relative_eq!(fit.radius, 35.0, epsilon = 1e-9);
    }

    #[test]
    fn least_squares_recovers_partial_arc() {
        let stroke = circle_stroke(10.0, 10.0, 80.0, 40, 1.0);
        let fit = fit_least_squares(&stroke).expect("fit");
        assert_relative_eq!(fit.center, Point2::new(10.0, 10.0), epsilon = 1e-6);
        assert_relative_eq!(fit.radius, 80.0, epsilon = 1e-6);
    }

    #[test]
    fn weighted_centroid_recovers_closed_circle() {
        let stroke = circle_stroke(0.0, 0.0, 20.0, 200, std::f64::consts::TAU);
        let fit = fit_weighted_centroid(&stroke).expect("fit");
        assert_relative_eq!(fit.center, Point2::new(0.0, 0.0), epsilon = 1e-9);
        assert_relative_eq!(fit.radius, 20.0, epsilon = 1e-9);
    }

    #[test]
    fn weighted_centroid_is_pulled_inward_on_half_arc() {
        let stroke = circle_stroke(0.0, 0.0, 20.0, 100, std::f64::consts::PI);
        let fit = fit_weighted_centroid(&stroke).expect("fit");
        assert!(fit.center.y > 5.0, "centroid should sit inside the arc");
        assert!(fit.radius < 20.0);
    }

    #[test]
    fn coincident_points_are_degenerate_for_both_strategies() {
        let stroke = Stroke::from_points(std::iter::repeat(Point2::new(5.0, 5.0)).take(8));
        assert_eq!(fit_least_squares(&stroke), Err(FitError::DegenerateStroke));
        assert_eq!(fit_weighted_centroid(&stroke), Err(FitError::DegenerateStroke));
    }

    #[test]
    fn collinear_points_are_unsolvable() {
        let stroke = Stroke::from_points((0..10).map(|i| Point2::new(10.0 + 3.7 * i as f64, 20.0 + 1.3 * i as f64)));
        assert_eq!(fit_least_squares(&stroke), Err(FitError::UnsolvableFit));
    }

    #[test]
    fn single_point_is_too_few() {
        let stroke = Stroke::from_points([Point2::new(1.0, 2.0)]);
        assert_eq!(
            fit_circle(&stroke, FitStrategy::LeastSquares),
            Err(FitError::TooFewPoints { got: 1 })
        );
    }

    #[test]
    fn residual_sign_follows_side_of_circle() {
        let fit = CircleFit {
            center: Point2::new(0.0, 0.0),
            radius: 10.0,
        };
        assert!(fit.radial_residual(Point2::new(12.0, 0.0)) > 0.0);
        assert!(fit.radial_residual(Point2::new(0.0, 8.0)) < 0.0);
        assert_relative_eq!(fit.circumference(), 20.0 * std::f64::consts::PI);
    }

    #[test]
    fn strategy_serializes_snake_case() {
        let json = serde_json::to_string(&FitStrategy::WeightedCentroid).expect("json");
        assert_eq!(json, "\"weighted_centroid\"");
        assert_eq!(FitStrategy::default(), FitStrategy::LeastSquares);
    }
}
