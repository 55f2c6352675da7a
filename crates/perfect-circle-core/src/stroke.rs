//! Freehand stroke buffer.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Minimum number of samples a stroke needs before it is worth scoring.
///
/// Anything shorter is treated as an accidental tap.
pub const MIN_SCORABLE_POINTS: usize = 6;

fn default_pressure() -> f32 {
    0.5
}

/// One pointer sample in canvas pixel space.
///
/// `pressure` is carried for renderers (stroke width) and never read by the
/// fitting or scoring code.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrokeSample {
    pub position: Point2<f64>,
    #[serde(default = "default_pressure")]
    pub pressure: f32,
}

impl StrokeSample {
    pub fn new(x: f64, y: f64, pressure: f32) -> Self {
        Self {
            position: Point2::new(x, y),
            pressure,
        }
    }
}

/// Ordered sequence of samples from pointer-down to pointer-up.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stroke {
    samples: Vec<StrokeSample>,
}

impl Stroke {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a stroke from bare points with the default pressure.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Point2<f64>>,
    {
        Self {
            samples: points
                .into_iter()
                .map(|position| StrokeSample {
                    position,
                    pressure: default_pressure(),
                })
                .collect(),
        }
    }

    pub fn from_samples(samples: Vec<StrokeSample>) -> Self {
        Self { samples }
    }

    pub fn push(&mut self, sample: StrokeSample) {
        self.samples.push(sample);
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// `true` once the stroke passes the tap guard.
    pub fn is_scorable(&self) -> bool {
        self.samples.len() >= MIN_SCORABLE_POINTS
    }

    pub fn samples(&self) -> &[StrokeSample] {
        &self.samples
    }

    pub fn points(&self) -> impl ExactSizeIterator<Item = Point2<f64>> + '_ {
        self.samples.iter().map(|s| s.position)
    }

    pub fn first(&self) -> Option<Point2<f64>> {
        self.samples.first().map(|s| s.position)
    }

    pub fn last(&self) -> Option<Point2<f64>> {
        self.samples.last().map(|s| s.position)
    }

    /// Iterate `(point_i, l_i)` for `i >= 1`, where `l_i` is the length of the
    /// segment ending at `point_i`.
    ///
    /// This is the weighting used by every arc-length-weighted aggregate: the
    /// first sample never carries weight on its own.
    pub fn weighted_points(&self) -> impl Iterator<Item = (Point2<f64>, f64)> + '_ {
        self.samples
            .windows(2)
            .map(|w| (w[1].position, nalgebra::distance(&w[0].position, &w[1].position)))
    }

    /// Total path length of the polyline.
    pub fn arc_length(&self) -> f64 {
        self.weighted_points().map(|(_, l)| l).sum()
    }
}

impl FromIterator<StrokeSample> for Stroke {
    fn from_iter<T: IntoIterator<Item = StrokeSample>>(iter: T) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

impl Extend<StrokeSample> for Stroke {
    fn extend<T: IntoIterator<Item = StrokeSample>>(&mut self, iter: T) {
        self.samples.extend(iter);
    }
}
