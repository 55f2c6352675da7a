use serde::{Deserialize, Serialize};

/// Discrete judgment derived from a continuous accuracy.
///
/// Ordered from worst to best, so tiers compare naturally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Bad,
    Good,
    Great,
    Perfect,
    /// Super-tier for accuracy >= 0.95.
    PerfectPlus,
}

impl Tier {
    pub const ALL: [Tier; 5] = [
        Tier::Bad,
        Tier::Good,
        Tier::Great,
        Tier::Perfect,
        Tier::PerfectPlus,
    ];

    pub const GOOD_THRESHOLD: f64 = 0.6;
    pub const GREAT_THRESHOLD: f64 = 0.8;
    pub const PERFECT_THRESHOLD: f64 = 0.9;
    pub const PERFECT_PLUS_THRESHOLD: f64 = 0.95;

    /// Classify an accuracy. NaN is `Bad`.
    pub fn from_accuracy(accuracy: f64) -> Self {
        if accuracy >= Self::PERFECT_PLUS_THRESHOLD {
            Tier::PerfectPlus
        } else if accuracy >= Self::PERFECT_THRESHOLD {
            Tier::Perfect
        } else if accuracy >= Self::GREAT_THRESHOLD {
            Tier::Great
        } else if accuracy >= Self::GOOD_THRESHOLD {
            Tier::Good
        } else {
            Tier::Bad
        }
    }

    /// Lowest accuracy that lands in this tier.
    pub fn min_accuracy(self) -> f64 {
        match self {
            Tier::Bad => 0.0,
            Tier::Good => Self::GOOD_THRESHOLD,
            Tier::Great => Self::GREAT_THRESHOLD,
            Tier::Perfect => Self::PERFECT_THRESHOLD,
            Tier::PerfectPlus => Self::PERFECT_PLUS_THRESHOLD,
        }
    }

    /// `Perfect` or better.
    pub fn is_perfect(self) -> bool {
        self >= Tier::Perfect
    }

    /// Text shown to the player.
    pub fn label(self) -> &'static str {
        match self {
            Tier::Bad => "BAD",
            Tier::Good => "GOOD",
            Tier::Great => "GREAT!",
            Tier::Perfect => "PERFECT!",
            Tier::PerfectPlus => "PERFECT!!",
        }
    }

    /// CSS colour hint for the label.
    pub fn color(self) -> &'static str {
        match self {
            Tier::Bad => "#AAA",
            Tier::Good => "#9F3",
            Tier::Great => "#D3C",
            Tier::Perfect => "#FEB",
            Tier::PerfectPlus => "#FD3",
        }
    }

    /// Stable snake_case key, also used for persisted counters.
    pub fn key(self) -> &'static str {
        match self {
            Tier::Bad => "bad",
            Tier::Good => "good",
            Tier::Great => "great",
            Tier::Perfect => "perfect",
            Tier::PerfectPlus => "perfect_plus",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Render an accuracy as a percentage with one decimal, e.g. `"93.4%"`.
pub fn format_percent(accuracy: f64) -> String {
    format!("{:.1}%", accuracy * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_inclusive_at_lower_bound() {
        assert_eq!(Tier::from_accuracy(0.0), Tier::Bad);
        assert_eq!(Tier::from_accuracy(0.5999), Tier::Bad);
        assert_eq!(Tier::from_accuracy(0.6), Tier::Good);
        assert_eq!(Tier::from_accuracy(0.7999), Tier::Good);
        assert_eq!(Tier::from_accuracy(0.8), Tier::Great);
        assert_eq!(Tier::from_accuracy(0.8999), Tier::Great);
        assert_eq!(Tier::from_accuracy(0.9), Tier::Perfect);
        assert_eq!(Tier::from_accuracy(0.9499), Tier::Perfect);
        assert_eq!(Tier::from_accuracy(0.95), Tier::PerfectPlus);
        assert_eq!(Tier::from_accuracy(1.0), Tier::PerfectPlus);
    }

    #[test]
    fn nan_is_bad() {
        assert_eq!(Tier::from_accuracy(f64::NAN), Tier::Bad);
    }

    #[test]
    fn min_accuracy_round_trips_through_classifier() {
        for tier in Tier::ALL {
            assert_eq!(Tier::from_accuracy(tier.min_accuracy()), tier);
        }
    }

    #[test]
    fn ordering_and_perfect_flag() {
        assert!(Tier::Bad < Tier::Good && Tier::Great < Tier::Perfect);
        assert!(Tier::Perfect.is_perfect());
        assert!(Tier::PerfectPlus.is_perfect());
        assert!(!Tier::Great.is_perfect());
    }

    #[test]
    fn percent_has_one_decimal() {
        assert_eq!(format_percent(0.9344), "93.4%");
        assert_eq!(format_percent(1.0), "100.0%");
        assert_eq!(format_percent(0.0), "0.0%");
        assert_eq!(Tier::Great.to_string(), "GREAT!");
    }
}
