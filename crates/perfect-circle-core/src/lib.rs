//! Core types and utilities for freehand circle scoring.
//!
//! This crate is intentionally small and purely geometric. It knows about
//! strokes (ordered pointer samples) and how to fit a circle to them; it does
//! *not* know about scoring tiers, persistence, or any input device.

mod error;
mod fit;
mod linalg;
mod logger;
mod stroke;

pub use error::FitError;
pub use fit::{fit_circle, fit_least_squares, fit_weighted_centroid, CircleFit, FitStrategy};
pub use linalg::solve_3x3_gauss_jordan;
pub use stroke::{Stroke, StrokeSample, MIN_SCORABLE_POINTS};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;

pub use nalgebra::Point2;
