use perfect_circle_core::{Stroke, StrokeSample, MIN_SCORABLE_POINTS};
use perfect_circle_score::{CircleScore, CircleScorer, ScoreError};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::error::SessionError;
use crate::stats::ScoreStats;
use crate::store::StatsStore;

/// Result of a scored stroke.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrokeOutcome {
    pub score: CircleScore,
    /// The stroke beat the career best accuracy.
    pub is_new_best: bool,
}

/// One player's drawing session.
///
/// Holds the stroke being drawn, the drawing flag, per-session counters and
/// career counters backed by `store`. A new stroke cannot start while one is
/// in progress.
pub struct DrawingSession<S: StatsStore> {
    scorer: CircleScorer,
    store: S,
    stroke: Stroke,
    drawing: bool,
    session: ScoreStats,
    career: ScoreStats,
}

impl<S: StatsStore> DrawingSession<S> {
    /// Create a session and load career statistics from `store`.
    ///
    /// Unreadable stored statistics are logged and replaced by zeroed ones on
    /// the next save.
    pub fn new(scorer: CircleScorer, store: S) -> Self {
        let career = match ScoreStats::load(&store) {
            Ok(stats) => stats,
            Err(err) => {
                log::warn!("discarding stored career stats: {err}");
                ScoreStats::default()
            }
        };
        Self {
            scorer,
            store,
            stroke: Stroke::new(),
            drawing: false,
            session: ScoreStats::default(),
            career,
        }
    }

    pub fn scorer(&self) -> &CircleScorer {
        &self.scorer
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// The stroke being drawn, or the last finished one.
    pub fn current_stroke(&self) -> &Stroke {
        &self.stroke
    }

    pub fn session_stats(&self) -> &ScoreStats {
        &self.session
    }

    pub fn career_stats(&self) -> &ScoreStats {
        &self.career
    }

    /// Start a new stroke, clearing the point buffer.
    pub fn begin_stroke(&mut self) -> Result<(), SessionError> {
        if self.drawing {
            return Err(SessionError::StrokeInProgress);
        }
        self.stroke.clear();
        self.drawing = true;
        Ok(())
    }

    /// Append a sample to the active stroke. Returns `false` when no stroke
    /// is in progress and the sample was dropped.
    pub fn add_point(&mut self, x: f64, y: f64, pressure: f32) -> bool {
        if !self.drawing {
            return false;
        }
        self.stroke.push(StrokeSample::new(x, y, pressure));
        true
    }

    /// Abandon the active stroke without scoring it.
    pub fn cancel_stroke(&mut self) {
        self.drawing = false;
        self.stroke.clear();
    }

    /// Finish the active stroke and score it.
    ///
    /// Returns `Ok(None)` when there was no active stroke, when the stroke is
    /// shorter than [`MIN_SCORABLE_POINTS`], or when no circle can be fitted.
    /// Counters only change when a score is returned; a failed save leaves
    /// them untouched and surfaces as [`SessionError::Store`].
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self), fields(points = self.stroke.len()))
    )]
    pub fn end_stroke(&mut self) -> Result<Option<StrokeOutcome>, SessionError> {
        if !self.drawing {
            return Ok(None);
        }
        self.drawing = false;

        if self.stroke.len() < MIN_SCORABLE_POINTS {
            log::debug!(
                "stroke too short to score ({} < {} points)",
                self.stroke.len(),
                MIN_SCORABLE_POINTS
            );
            return Ok(None);
        }

        let score = match self.scorer.score(&self.stroke) {
            Ok(score) => score,
            Err(ScoreError::Fit(err)) => {
                log::warn!("no score for stroke of {} points: {err}", self.stroke.len());
                return Ok(None);
            }
            Err(err @ ScoreError::InvalidParams(_)) => {
                log::warn!("no score: {err}");
                return Ok(None);
            }
        };

        // Counters move only once the career stats are persisted.
        let mut career = self.career;
        let is_new_best = career.record(&score);
        career.save(&mut self.store)?;
        self.career = career;
        self.session.record(&score);

        log::info!(
            "stroke scored {:.1}% ({}){}",
            score.accuracy * 100.0,
            score.tier.label(),
            if is_new_best { " new best" } else { "" }
        );
        Ok(Some(StrokeOutcome { score, is_new_best }))
    }

    /// Zero the career statistics and persist the reset.
    pub fn reset_career_stats(&mut self) -> Result<(), SessionError> {
        self.career = ScoreStats::default();
        self.career.save(&mut self.store)?;
        Ok(())
    }
}
