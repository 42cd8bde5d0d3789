//! Distribution chart model.
//!
//! The chart is a circular diagram divided into arcs for passed / failed /
//! not-applicable verdicts, in that fixed draw order, starting at the
//! 12-o'clock position and proceeding clockwise. This module carries
//! structured data only; pixel rendering stays outside the engine.

use serde::{Deserialize, Serialize};

use crate::localize::Localizer;
use crate::snapshot::{Snapshot, round_percent};
use crate::verdict::RecordStatus;

pub const PASSED_COLOR: &str = "#4caf50";
pub const FAILED_COLOR: &str = "#f44336";
pub const NOT_APPLICABLE_COLOR: &str = "#9e9e9e";
pub const PLACEHOLDER_COLOR: &str = "#e0e0e0";

const FULL_CIRCLE_DEG: f64 = 360.0;

/// Draw order and styling for the three charted statuses.
const CHART_SLICES: [(RecordStatus, &str, &str); 3] = [
    (RecordStatus::Passed, "legend_passed", PASSED_COLOR),
    (RecordStatus::Failed, "legend_failed", FAILED_COLOR),
    (
        RecordStatus::NotApplicable,
        "legend_not_applicable",
        NOT_APPLICABLE_COLOR,
    ),
];

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

/// One arc of the diagram. Angles are degrees clockwise from 12 o'clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartArc {
    pub start_angle_deg: f64,
    pub sweep_angle_deg: f64,
    pub label: String,
    pub color: String,
    pub count: usize,
    pub percent: u32,
}

/// One legend row. Mirrors the arc data so the chart can be reproduced for
/// export without re-querying engine state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: String,
    pub count: usize,
    pub percent: u32,
}

/// Fixed drawing dimensions, part of the retained export input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartGeometry {
    pub diameter_px: u32,
    pub legend_swatch_px: u32,
    pub legend_row_height_px: u32,
}

impl Default for ChartGeometry {
    fn default() -> Self {
        Self {
            diameter_px: 200,
            legend_swatch_px: 12,
            legend_row_height_px: 18,
        }
    }
}

/// The last-built chart: arcs plus legend, or the empty placeholder disc
/// when nothing has been recorded yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartModel {
    pub total: usize,
    pub arcs: Vec<ChartArc>,
    pub legend: Vec<LegendEntry>,
    /// Localized label shown on the neutral disc when `total == 0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empty_label: Option<String>,
    pub geometry: ChartGeometry,
}

impl ChartModel {
    /// Build the chart for a snapshot. Zero-count statuses contribute no
    /// arc; a fully empty snapshot renders the placeholder disc instead.
    pub fn build(snapshot: &Snapshot, localizer: &impl Localizer) -> Self {
        let geometry = ChartGeometry::default();
        let charted_total = snapshot.passed + snapshot.failed + snapshot.not_applicable;
        if snapshot.total == 0 {
            return Self {
                total: 0,
                arcs: Vec::new(),
                legend: Vec::new(),
                empty_label: Some(localizer.resolve("chart_empty")),
                geometry,
            };
        }

        let mut arcs = Vec::new();
        let mut legend = Vec::new();
        let mut cursor_deg = 0.0;
        for (status, label_key, color) in CHART_SLICES {
            let count = match status {
                RecordStatus::Passed => snapshot.passed,
                RecordStatus::Failed => snapshot.failed,
                RecordStatus::NotApplicable => snapshot.not_applicable,
                RecordStatus::Warning => 0,
            };
            if count == 0 {
                continue;
            }
            let sweep = count as f64 / snapshot.total as f64 * FULL_CIRCLE_DEG;
            let percent = round_percent(count, snapshot.total);
            let label = localizer.resolve(label_key);
            arcs.push(ChartArc {
                start_angle_deg: cursor_deg,
                sweep_angle_deg: sweep,
                label: label.clone(),
                color: color.to_string(),
                count,
                percent,
            });
            legend.push(LegendEntry {
                label,
                color: color.to_string(),
                count,
                percent,
            });
            cursor_deg += sweep;
        }
        debug_assert!(charted_total <= snapshot.total);

        Self {
            total: snapshot.total,
            arcs,
            legend,
            empty_label: None,
            geometry,
        }
    }

    pub fn is_empty_placeholder(&self) -> bool {
        self.empty_label.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::CategoryId;
    use crate::localize::StaticLocalizer;
    use crate::snapshot::Snapshot;
    use crate::verdict::{CategoryState, VerdictRecord};
    use std::collections::BTreeMap;

    fn snapshot_with(passed: usize, failed: usize, not_applicable: usize) -> Snapshot {
        let mut categories: BTreeMap<CategoryId, CategoryState> = CategoryId::all()
            .iter()
            .map(|&id| (id, CategoryState::new(id)))
            .collect();
        let state = categories.get_mut(&CategoryId::Navigation).unwrap();
        let mut ordinal = 1;
        for (count, status) in [
            (passed, RecordStatus::Passed),
            (failed, RecordStatus::Failed),
            (not_applicable, RecordStatus::NotApplicable),
        ] {
            for _ in 0..count {
                state.upsert(VerdictRecord {
                    criterion_ordinal: ordinal,
                    name: format!("criterion {ordinal}"),
                    status,
                    description: None,
                    result_text: None,
                });
                ordinal += 1;
            }
        }
        Snapshot::compute(&categories)
    }

    #[test]
    fn arcs_follow_fixed_draw_order_from_noon() {
        let chart = ChartModel::build(&snapshot_with(2, 1, 1), &StaticLocalizer::new());
        assert_eq!(chart.arcs.len(), 3);
        assert_eq!(chart.arcs[0].color, PASSED_COLOR);
        assert_eq!(chart.arcs[0].start_angle_deg, 0.0);
        assert_eq!(chart.arcs[0].sweep_angle_deg, 180.0);
        assert_eq!(chart.arcs[1].color, FAILED_COLOR);
        assert_eq!(chart.arcs[1].start_angle_deg, 180.0);
        assert_eq!(chart.arcs[2].color, NOT_APPLICABLE_COLOR);
        assert_eq!(chart.arcs[2].start_angle_deg, 270.0);
    }

    #[test]
    fn sweeps_cover_the_full_circle() {
        let chart = ChartModel::build(&snapshot_with(3, 2, 1), &StaticLocalizer::new());
        let sum: f64 = chart.arcs.iter().map(|a| a.sweep_angle_deg).sum();
        assert!((sum - 360.0).abs() < 1e-9);
    }

    #[test]
    fn zero_count_contributes_no_arc() {
        let chart = ChartModel::build(&snapshot_with(4, 0, 1), &StaticLocalizer::new());
        assert_eq!(chart.arcs.len(), 2);
        assert!(chart.arcs.iter().all(|a| a.color != FAILED_COLOR));
        assert_eq!(chart.legend.len(), 2);
    }

    #[test]
    fn empty_snapshot_renders_placeholder() {
        let localizer = StaticLocalizer::new().with_entry("chart_empty", "No results yet");
        let chart = ChartModel::build(&snapshot_with(0, 0, 0), &localizer);
        assert!(chart.is_empty_placeholder());
        assert!(chart.arcs.is_empty());
        assert_eq!(chart.empty_label.as_deref(), Some("No results yet"));
    }

    #[test]
    fn legend_mirrors_arc_data() {
        let localizer = StaticLocalizer::new()
            .with_entry("legend_passed", "Passed")
            .with_entry("legend_failed", "Failed");
        let chart = ChartModel::build(&snapshot_with(3, 1, 0), &localizer);
        assert_eq!(chart.legend.len(), chart.arcs.len());
        for (arc, entry) in chart.arcs.iter().zip(&chart.legend) {
            assert_eq!(arc.label, entry.label);
            assert_eq!(arc.color, entry.color);
            assert_eq!(arc.count, entry.count);
            assert_eq!(arc.percent, entry.percent);
        }
        assert_eq!(chart.legend[0].label, "Passed");
        assert_eq!(chart.legend[0].percent, 75);
    }
}
