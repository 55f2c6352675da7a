//! High-level facade crate for the `perfect-circle-*` workspace.
//!
//! This crate provides:
//! - re-exports of the fitting, scoring and session crates,
//! - JSON helpers for stroke files, scorer configs and score reports,
//! - a deterministic synthetic stroke generator,
//! - (feature `cli`) the `perfect-circle` command-line tool.
//!
//! ## Quickstart
//!
//! ```
//! use perfect_circle::session::{DrawingSession, MemoryStore};
//! use perfect_circle::score::CircleScorer;
//!
//! let mut session = DrawingSession::new(CircleScorer::default(), MemoryStore::new());
//! session.begin_stroke().unwrap();
//! for i in 0..=72 {
//!     let t = std::f64::consts::TAU * i as f64 / 72.0;
//!     session.add_point(100.0 + 40.0 * t.cos(), 100.0 + 40.0 * t.sin(), 0.5);
//! }
//! let outcome = session.end_stroke().unwrap().expect("scored");
//! assert!(outcome.score.tier.is_perfect());
//! ```
//!
//! ## API map
//! - `perfect_circle::core`: strokes, circle fits, the 3×3 Gauss-Jordan solver.
//! - `perfect_circle::score`: accuracy policies, tiers, `CircleScorer`.
//! - `perfect_circle::session`: `DrawingSession`, statistics, key-value stores.
//! - `perfect_circle::io`: stroke/config/report JSON files.
//! - `perfect_circle::synth`: synthetic strokes for demos and tests.

pub use perfect_circle_core as core;
pub use perfect_circle_score as score;
pub use perfect_circle_session as session;

pub use perfect_circle_core::{CircleFit, FitError, FitStrategy, Stroke, StrokeSample};
pub use perfect_circle_score::{
    AccuracyPolicy, CircleScore, CircleScorer, ScoreError, ScoreParams, Tier,
};
pub use perfect_circle_session::{DrawingSession, StrokeOutcome};

pub mod io;
pub mod synth;
