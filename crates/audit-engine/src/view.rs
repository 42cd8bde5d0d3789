//! View payloads and the renderer capability seam.
//!
//! The engine never touches a rendering surface. After every mutation it
//! recomputes and pushes structured payloads through [`ViewSink`]; each sink
//! method has a no-op default body, so any subset of render targets may be
//! absent. A fully absent sink is the headless configuration used in tests.

use serde::{Deserialize, Serialize};

use crate::chart::ChartModel;
use crate::criteria::CategoryId;
use crate::snapshot::{CategoryProgress, ScoreBand, Snapshot};
use crate::summary::SummaryTable;
use crate::verdict::VerdictRecord;

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// The four numeric counter slots. Panels may mirror these across two tabs
/// of identical semantics; the payload is the same either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountersView {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub not_applicable: usize,
}

impl CountersView {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            total: snapshot.total,
            passed: snapshot.passed,
            failed: snapshot.failed,
            not_applicable: snapshot.not_applicable,
        }
    }
}

/// Score readout with its fixed color tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreView {
    pub score: u32,
    pub band: ScoreBand,
    pub color: String,
}

impl ScoreView {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let band = snapshot.band();
        Self {
            score: snapshot.score,
            band,
            color: band.color().to_string(),
        }
    }
}

/// One category pane: heading, progress badge, and the record list, or the
/// localized empty-state line when nothing has been recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPanelView {
    pub category: CategoryId,
    pub icon: String,
    pub title: String,
    pub progress: CategoryProgress,
    pub records: Vec<VerdictRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empty_state: Option<String>,
}

// ---------------------------------------------------------------------------
// Sink
// ---------------------------------------------------------------------------

/// Render-target capability. Implementations override only the targets they
/// actually have; a missing target is skipped, never an error.
pub trait ViewSink {
    fn counters(&mut self, _view: &CountersView) {}
    fn score(&mut self, _view: &ScoreView) {}
    fn chart(&mut self, _chart: &ChartModel) {}
    fn category_progress(&mut self, _category: CategoryId, _progress: &CategoryProgress) {}
    fn category_panel(&mut self, _panel: &CategoryPanelView) {}
    fn summary(&mut self, _table: &SummaryTable) {}
}

/// No targets at all. The engine runs headless against this.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessSink;

impl ViewSink for HeadlessSink {}

/// Captures every published payload. Test double for view consistency
/// checks.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub counters: Vec<CountersView>,
    pub scores: Vec<ScoreView>,
    pub charts: Vec<ChartModel>,
    pub progress: Vec<(CategoryId, CategoryProgress)>,
    pub panels: Vec<CategoryPanelView>,
    pub summaries: Vec<SummaryTable>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ViewSink for RecordingSink {
    fn counters(&mut self, view: &CountersView) {
        self.counters.push(*view);
    }

    fn score(&mut self, view: &ScoreView) {
        self.scores.push(view.clone());
    }

    fn chart(&mut self, chart: &ChartModel) {
        self.charts.push(chart.clone());
    }

    fn category_progress(&mut self, category: CategoryId, progress: &CategoryProgress) {
        self.progress.push((category, *progress));
    }

    fn category_panel(&mut self, panel: &CategoryPanelView) {
        self.panels.push(panel.clone());
    }

    fn summary(&mut self, table: &SummaryTable) {
        self.summaries.push(table.clone());
    }
}
