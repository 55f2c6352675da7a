//! Deterministic synthetic strokes.
//!
//! Strokes are sampled evenly along an arc; optional noise is uniform in
//! `[-noise_px, noise_px]` on each axis, drawn from a seeded LCG so the same
//! parameters always give the same stroke.

use perfect_circle_core::{Point2, Stroke, StrokeSample};
use serde::{Deserialize, Serialize};

/// Parameters for [`circle_stroke`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthParams {
    pub center: [f64; 2],
    pub radius: f64,
    /// Number of samples, including both arc endpoints.
    pub points: usize,
    /// Arc sweep in degrees starting at angle 0; 360 closes the loop.
    pub sweep_deg: f64,
    pub noise_px: f64,
    pub seed: u64,
}

impl Default for SynthParams {
    fn default() -> Self {
        Self {
            center: [100.0, 100.0],
            radius: 50.0,
            points: 360,
            sweep_deg: 360.0,
            noise_px: 0.0,
            seed: 7,
        }
    }
}

/// 64-bit LCG (Knuth's MMIX constants), uniform in `[0, 1)`.
#[derive(Clone, Debug)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_f64(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.state >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in `[-amplitude, amplitude)`.
    pub fn symmetric(&mut self, amplitude: f64) -> f64 {
        (2.0 * self.next_f64() - 1.0) * amplitude
    }
}

/// Sample an arc as a stroke.
pub fn circle_stroke(params: &SynthParams) -> Stroke {
    let n = params.points;
    let sweep = params.sweep_deg.to_radians();
    let step = if n > 1 { sweep / (n - 1) as f64 } else { 0.0 };
    let [cx, cy] = params.center;
    let mut rng = Lcg::new(params.seed);

    (0..n)
        .map(|i| {
            let t = step * i as f64;
            let mut p = Point2::new(cx + params.radius * t.cos(), cy + params.radius * t.sin());
            if params.noise_px > 0.0 {
                p.x += rng.symmetric(params.noise_px);
                p.y += rng.symmetric(params.noise_px);
            }
            StrokeSample {
                position: p,
                pressure: 0.5,
            }
        })
        .collect()
}

/// Sample a straight segment from `from` to `to`.
pub fn line_stroke(from: [f64; 2], to: [f64; 2], points: usize) -> Stroke {
    let denom = points.saturating_sub(1).max(1) as f64;
    Stroke::from_points((0..points).map(|i| {
        let f = i as f64 / denom;
        Point2::new(from[0] + (to[0] - from[0]) * f, from[1] + (to[1] - from[1]) * f)
    }))
}
