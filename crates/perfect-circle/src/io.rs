//! JSON stroke files, scorer configuration and score reports.

use std::{
    fs,
    path::{Path, PathBuf},
};

use perfect_circle_core::{Point2, Stroke, StrokeSample};
use perfect_circle_score::{format_percent, CircleScore, CircleScorer, ScoreError, ScoreParams};
use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum IoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] IoError),
    #[error(transparent)]
    Score(#[from] ScoreError),
}

/// A recorded stroke on disk.
///
/// Written as `{"samples": [{"position": [x, y], "pressure": p}, ...]}`;
/// a bare array of `[x, y]` pairs is accepted on load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrokeFile {
    pub samples: Vec<StrokeSample>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StrokeFileRepr {
    Samples(StrokeFile),
    Pairs(Vec<[f64; 2]>),
}

impl StrokeFile {
    pub fn from_stroke(stroke: &Stroke) -> Self {
        Self {
            samples: stroke.samples().to_vec(),
        }
    }

    pub fn to_stroke(&self) -> Stroke {
        Stroke::from_samples(self.samples.clone())
    }

    pub fn from_json_str(raw: &str) -> Result<Self, IoError> {
        Ok(match serde_json::from_str::<StrokeFileRepr>(raw)? {
            StrokeFileRepr::Samples(file) => file,
            StrokeFileRepr::Pairs(pairs) => Self {
                samples: Stroke::from_points(pairs.into_iter().map(|[x, y]| Point2::new(x, y)))
                    .samples()
                    .to_vec(),
            },
        })
    }

    /// Load a stroke file from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Write this stroke to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// Load scorer parameters from a JSON config file.
///
/// Fields missing from the file keep their [`ScoreParams::default`] values.
pub fn load_params_json(path: impl AsRef<Path>) -> Result<ScoreParams, IoError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Write scorer parameters to disk as pretty JSON.
pub fn write_params_json(params: &ScoreParams, path: impl AsRef<Path>) -> Result<(), IoError> {
    let json = serde_json::to_string_pretty(params)?;
    fs::write(path, json)?;
    Ok(())
}

/// Load a config file and build a validated scorer from it.
pub fn load_scorer(path: impl AsRef<Path>) -> Result<CircleScorer, ConfigError> {
    Ok(CircleScorer::new(load_params_json(path)?)?)
}

/// Machine-readable result of scoring one stroke file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    pub stroke_path: String,
    pub num_samples: usize,
    pub params: ScoreParams,
    #[serde(default)]
    pub score: Option<CircleScore>,
    #[serde(default)]
    pub tier_label: Option<String>,
    #[serde(default)]
    pub percent: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ScoreReport {
    /// Build a base report for a stroke before scoring.
    pub fn new(stroke_path: &Path, stroke: &Stroke, params: ScoreParams) -> Self {
        Self {
            stroke_path: stroke_path.to_string_lossy().into_owned(),
            num_samples: stroke.len(),
            params,
            score: None,
            tier_label: None,
            percent: None,
            error: None,
        }
    }

    /// Populate report fields from a successful score.
    pub fn set_score(&mut self, score: CircleScore) {
        self.tier_label = Some(score.tier.label().to_owned());
        self.percent = Some(format_percent(score.accuracy));
        self.score = Some(score);
        self.error = None;
    }

    /// Record why no score was produced.
    pub fn set_error(&mut self, err: impl std::fmt::Display) {
        self.error = Some(err.to_string());
    }

    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// Default location of the career stats file: `$HOME/.perfect-circle/stats.json`,
/// or `./perfect-circle-stats.json` when no home directory is known.
pub fn default_stats_path() -> PathBuf {
    std::env::var_os("HOME")
        .map(|home| PathBuf::from(home).join(".perfect-circle").join("stats.json"))
        .unwrap_or_else(|| PathBuf::from("perfect-circle-stats.json"))
}
