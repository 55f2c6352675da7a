//! WebAssembly bindings for a browser drawing session.
//!
//! The page forwards pointer events to [`WasmSession`] and renders the
//! returned score. Career counters live in an in-memory store; the page reads
//! them with [`WasmSession::career_entries`], persists them however it likes
//! (cookies, local storage) and hands them back through
//! [`WasmSession::restore_career`] on the next visit.

use std::collections::BTreeMap;

use perfect_circle::score::{format_percent, CircleScorer, ScoreParams, Tier};
use perfect_circle::session::{MemoryStore, ScoreStats, StatsStore, StoreError};
use perfect_circle::{DrawingSession, StrokeOutcome};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Score as handed to JavaScript.
#[derive(Serialize)]
struct ScoreView {
    accuracy: f64,
    percent: String,
    tier: Tier,
    label: &'static str,
    color: &'static str,
    center: [f64; 2],
    radius: f64,
    is_new_best: bool,
}

impl From<&StrokeOutcome> for ScoreView {
    fn from(outcome: &StrokeOutcome) -> Self {
        let score = &outcome.score;
        Self {
            accuracy: score.accuracy,
            percent: format_percent(score.accuracy),
            tier: score.tier,
            label: score.tier.label(),
            color: score.tier.color(),
            center: [score.fit.center.x, score.fit.center.y],
            radius: score.fit.radius,
            is_new_best: outcome.is_new_best,
        }
    }
}

/// Statistics as handed to JavaScript, counts keyed by tier name.
#[derive(Serialize)]
struct StatsView {
    counts: BTreeMap<&'static str, u32>,
    attempts: u64,
    best_accuracy: f64,
    last_accuracy: Option<f64>,
}

impl From<&ScoreStats> for StatsView {
    fn from(stats: &ScoreStats) -> Self {
        Self {
            counts: stats.counts.iter().map(|(t, c)| (t.key(), c)).collect(),
            attempts: stats.attempts(),
            best_accuracy: stats.best_accuracy,
            last_accuracy: stats.last_accuracy,
        }
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value.serialize(&serializer).map_err(Into::into)
}

fn js_err(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn store_from_entries(entries: BTreeMap<String, String>) -> MemoryStore {
    let mut store = MemoryStore::new();
    for (key, value) in entries {
        // MemoryStore::set never fails.
        let _ = store.set(&key, value);
    }
    store
}

fn career_entries_of(stats: &ScoreStats) -> Result<BTreeMap<String, String>, StoreError> {
    let mut store = MemoryStore::new();
    stats.save(&mut store)?;
    Ok(store
        .iter()
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .collect())
}

#[wasm_bindgen]
pub struct WasmSession {
    inner: DrawingSession<MemoryStore>,
}

#[wasm_bindgen]
impl WasmSession {
    /// `config` is an optional scorer config object (same fields as the JSON
    /// config file); `null`/`undefined` uses the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WasmSession, JsValue> {
        let params: ScoreParams = if config.is_null() || config.is_undefined() {
            ScoreParams::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        let scorer = CircleScorer::new(params).map_err(js_err)?;
        Ok(Self {
            inner: DrawingSession::new(scorer, MemoryStore::new()),
        })
    }

    /// Returns `false` when a stroke is already in progress.
    pub fn begin_stroke(&mut self) -> bool {
        self.inner.begin_stroke().is_ok()
    }

    pub fn add_point(&mut self, x: f64, y: f64, pressure: f32) -> bool {
        self.inner.add_point(x, y, pressure)
    }

    /// Score object, or `null` when the stroke was not scored.
    pub fn end_stroke(&mut self) -> Result<JsValue, JsValue> {
        match self.inner.end_stroke().map_err(js_err)? {
            Some(outcome) => to_js(&ScoreView::from(&outcome)),
            None => Ok(JsValue::NULL),
        }
    }

    pub fn cancel_stroke(&mut self) {
        self.inner.cancel_stroke();
    }

    pub fn is_drawing(&self) -> bool {
        self.inner.is_drawing()
    }

    pub fn session_stats(&self) -> Result<JsValue, JsValue> {
        to_js(&StatsView::from(self.inner.session_stats()))
    }

    pub fn career_stats(&self) -> Result<JsValue, JsValue> {
        to_js(&StatsView::from(self.inner.career_stats()))
    }

    /// Career counters as a flat `{key: string}` object for the page to persist.
    pub fn career_entries(&self) -> Result<JsValue, JsValue> {
        let entries = career_entries_of(self.inner.career_stats()).map_err(js_err)?;
        to_js(&entries)
    }

    /// Replace career counters with previously persisted entries. Session
    /// counters and any stroke in progress are dropped.
    pub fn restore_career(&mut self, entries: JsValue) -> Result<(), JsValue> {
        let entries: BTreeMap<String, String> = serde_wasm_bindgen::from_value(entries)?;
        let scorer: CircleScorer = self.inner.scorer().clone();
        self.inner = DrawingSession::new(scorer, store_from_entries(entries));
        Ok(())
    }

    pub fn reset_career(&mut self) -> Result<(), JsValue> {
        self.inner.reset_career_stats().map_err(js_err)
    }
}
