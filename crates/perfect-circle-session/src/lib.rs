//! Game-state layer for the perfect-circle scorer.
//!
//! [`DrawingSession`] owns the current stroke buffer, the drawing flag and the
//! tier counters. Career statistics are read from and written to an injected
//! [`StatsStore`], a plain string key-value interface.

mod error;
mod session;
mod stats;
mod store;

pub use error::{SessionError, StoreError};
pub use session::{DrawingSession, StrokeOutcome};
pub use stats::{ScoreStats, TierCounts, BEST_ACCURACY_KEY};
pub use store::{JsonFileStore, MemoryStore, StatsStore};
