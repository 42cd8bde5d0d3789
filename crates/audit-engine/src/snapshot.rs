//! Derived aggregate snapshot and score banding.
//!
//! A snapshot has no independent lifecycle: it is a pure function of the
//! current category/record state and is recomputed after every mutation,
//! before any view is published.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::criteria::{CategoryId, TOTAL_CRITERIA};
use crate::verdict::{CategoryState, RecordStatus};

// ---------------------------------------------------------------------------
// Score banding
// ---------------------------------------------------------------------------

const SCORE_EXCELLENT_FLOOR: u32 = 90;
const SCORE_GOOD_FLOOR: u32 = 75;
const SCORE_MEDIUM_FLOOR: u32 = 50;

/// Fixed color tier for the score readout. Inclusive lower bounds, no
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Excellent,
    Good,
    Medium,
    Poor,
}

impl ScoreBand {
    pub const fn from_score(score: u32) -> Self {
        if score >= SCORE_EXCELLENT_FLOOR {
            Self::Excellent
        } else if score >= SCORE_GOOD_FLOOR {
            Self::Good
        } else if score >= SCORE_MEDIUM_FLOOR {
            Self::Medium
        } else {
            Self::Poor
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Medium => "medium",
            Self::Poor => "poor",
        }
    }

    pub const fn color(self) -> &'static str {
        match self {
            Self::Excellent => "#4caf50",
            Self::Good => "#8bc34a",
            Self::Medium => "#ff9800",
            Self::Poor => "#f44336",
        }
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Per-category progress: human-validated verdicts over the declared size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryProgress {
    pub validated: usize,
    pub declared_total: usize,
}

impl CategoryProgress {
    /// Badge text shown next to the category heading.
    pub fn badge_text(&self) -> String {
        format!("({}/{})", self.validated, self.declared_total)
    }
}

/// Recomputed aggregate over all categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub not_applicable: usize,
    /// Records in the advisory status: in `total`, in no score bucket.
    pub warnings: usize,
    /// Scoring denominator: `TOTAL_CRITERIA - not_applicable`.
    pub applicable: usize,
    /// `round(passed / applicable * 100)`, half-up; `0` when the denominator
    /// collapses to zero (every criterion marked not-applicable).
    pub score: u32,
    pub per_category: BTreeMap<CategoryId, CategoryProgress>,
}

impl Snapshot {
    /// Pure recomputation from category state.
    pub fn compute(categories: &BTreeMap<CategoryId, CategoryState>) -> Self {
        let mut total = 0;
        let mut passed = 0;
        let mut failed = 0;
        let mut not_applicable = 0;
        let mut warnings = 0;
        let mut per_category = BTreeMap::new();

        for (&id, state) in categories {
            total += state.records().len();
            passed += state.count_with(RecordStatus::Passed);
            failed += state.count_with(RecordStatus::Failed);
            not_applicable += state.count_with(RecordStatus::NotApplicable);
            warnings += state.count_with(RecordStatus::Warning);
            per_category.insert(
                id,
                CategoryProgress {
                    validated: state.validated(),
                    declared_total: id.declared_total(),
                },
            );
        }

        let applicable = TOTAL_CRITERIA.saturating_sub(not_applicable);
        let score = if applicable > 0 {
            round_percent(passed, applicable)
        } else {
            0
        };

        Self {
            total,
            passed,
            failed,
            not_applicable,
            warnings,
            applicable,
            score,
            per_category,
        }
    }

    pub const fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.score)
    }
}

/// `round(part / whole * 100)` with half-up rounding, in integers.
pub(crate) fn round_percent(part: usize, whole: usize) -> u32 {
    debug_assert!(whole > 0);
    ((part * 200 + whole) / (whole * 2)) as u32
}
