use perfect_circle_score::{CircleScore, Tier};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::store::StatsStore;

pub const BEST_ACCURACY_KEY: &str = "best_accuracy";

fn count_key(tier: Tier) -> String {
    format!("count_{}", tier.key())
}

fn tier_index(tier: Tier) -> usize {
    match tier {
        Tier::Bad => 0,
        Tier::Good => 1,
        Tier::Great => 2,
        Tier::Perfect => 3,
        Tier::PerfectPlus => 4,
    }
}

/// Number of strokes that landed in each tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCounts {
    counts: [u32; 5],
}

impl TierCounts {
    pub fn record(&mut self, tier: Tier) {
        let slot = &mut self.counts[tier_index(tier)];
        *slot = slot.saturating_add(1);
    }

    pub fn get(&self, tier: Tier) -> u32 {
        self.counts[tier_index(tier)]
    }

    pub fn set(&mut self, tier: Tier, count: u32) {
        self.counts[tier_index(tier)] = count;
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| u64::from(c)).sum()
    }

    /// `(tier, count)` pairs from worst to best.
    pub fn iter(&self) -> impl Iterator<Item = (Tier, u32)> + '_ {
        Tier::ALL.into_iter().map(|t| (t, self.get(t)))
    }
}

/// Tier counters plus best and last accuracy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreStats {
    pub counts: TierCounts,
    /// Best accuracy seen, always in `[0, 1]`.
    pub best_accuracy: f64,
    /// Not persisted.
    #[serde(skip)]
    pub last_accuracy: Option<f64>,
}

impl ScoreStats {
    /// Count `score` and return `true` if it set a new best accuracy.
    pub fn record(&mut self, score: &CircleScore) -> bool {
        self.counts.record(score.tier);
        let accuracy = score.accuracy.clamp(0.0, 1.0);
        self.last_accuracy = Some(accuracy);
        if accuracy > self.best_accuracy {
            self.best_accuracy = accuracy;
            true
        } else {
            false
        }
    }

    pub fn attempts(&self) -> u64 {
        self.counts.total()
    }

    /// Load from `store`; missing keys read as zero.
    pub fn load<S: StatsStore + ?Sized>(store: &S) -> Result<Self, StoreError> {
        let mut stats = Self::default();
        for tier in Tier::ALL {
            let key = count_key(tier);
            if let Some(raw) = store.get(&key)? {
                let count = raw
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| StoreError::InvalidValue { key, value: raw })?;
                stats.counts.set(tier, count);
            }
        }
        if let Some(raw) = store.get(BEST_ACCURACY_KEY)? {
            let best = raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| (0.0..=1.0).contains(v))
                .ok_or_else(|| StoreError::InvalidValue {
                    key: BEST_ACCURACY_KEY.to_owned(),
                    value: raw.clone(),
                })?;
            stats.best_accuracy = best;
        }
        Ok(stats)
    }

    /// Write every counter and the best accuracy, then flush the store.
    pub fn save<S: StatsStore + ?Sized>(&self, store: &mut S) -> Result<(), StoreError> {
        for (tier, count) in self.counts.iter() {
            store.set(&count_key(tier), count.to_string())?;
        }
        store.set(BEST_ACCURACY_KEY, self.best_accuracy.to_string())?;
        store.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use perfect_circle_core::{CircleFit, Point2};
    use perfect_circle_score::ScoreBreakdown;

    fn score(accuracy: f64) -> CircleScore {
        CircleScore {
            fit: CircleFit {
                center: Point2::new(0.0, 0.0),
                radius: 1.0,
            },
            accuracy,
            tier: Tier::from_accuracy(accuracy),
            breakdown: ScoreBreakdown {
                radius_accuracy: accuracy,
                start_end_accuracy: None,
                closure_factor: Some(1.0),
                arc_length: 6.0,
                raw_accuracy: accuracy,
            },
        }
    }

    #[test]
    fn record_tracks_best_and_counts() {
        let mut stats = ScoreStats::default();
        assert!(stats.record(&score(0.7)));
        assert!(!stats.record(&score(0.5)));
        assert!(stats.record(&score(0.93)));
        assert_eq!(stats.counts.get(Tier::Good), 1);
        assert_eq!(stats.counts.get(Tier::Bad), 1);
        assert_eq!(stats.counts.get(Tier::Perfect), 1);
        assert_eq!(stats.attempts(), 3);
        assert_eq!(stats.best_accuracy, 0.93);
        assert_eq!(stats.last_accuracy, Some(0.93));
    }

    #[test]
    fn save_then_load_round_trips() {
        let mut stats = ScoreStats::default();
        for acc in [0.2, 0.65, 0.85, 0.91, 0.97, 0.97] {
            stats.record(&score(acc));
        }
        let mut store = MemoryStore::new();
        stats.save(&mut store).expect("save");
        assert_eq!(store.get("count_perfect_plus").expect("get").as_deref(), Some("2"));

        let loaded = ScoreStats::load(&store).expect("load");
        assert_eq!(loaded.counts, stats.counts);
        assert_eq!(loaded.best_accuracy, 0.97);
        assert_eq!(loaded.last_accuracy, None);
    }

    #[test]
    fn empty_store_loads_defaults() {
        let loaded = ScoreStats::load(&MemoryStore::new()).expect("load");
        assert_eq!(loaded, ScoreStats::default());
    }

    #[test]
    fn invalid_values_are_reported() {
        let mut store = MemoryStore::new();
        store.set("count_great", "lots".to_owned()).expect("set");
        assert!(matches!(
            ScoreStats::load(&store),
            Err(StoreError::InvalidValue { key, .. }) if key == "count_great"
        ));

        let mut store = MemoryStore::new();
        store.set(BEST_ACCURACY_KEY, "1.5".to_owned()).expect("set");
        assert!(matches!(
            ScoreStats::load(&store),
            Err(StoreError::InvalidValue { .. })
        ));
    }
}
