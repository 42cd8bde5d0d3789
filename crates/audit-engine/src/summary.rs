//! Canonical summary table.
//!
//! Exactly one row per registry criterion, in ordinal order, independent of
//! how many verdicts exist. The table is the cross-check a test suite
//! validates against raw category state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::criteria::{CRITERIA, CategoryId};
use crate::localize::Localizer;
use crate::verdict::{CategoryState, RecordStatus};

/// Rendered verdict cell. Pending covers both "no record" and the advisory
/// warning status, which is not a human verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictToken {
    Pending,
    Passed,
    Failed,
    NotApplicable,
}

impl VerdictToken {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "-",
            Self::Passed => "OK",
            Self::Failed => "KO",
            Self::NotApplicable => "N/A",
        }
    }

    const fn from_status(status: Option<RecordStatus>) -> Self {
        match status {
            Some(RecordStatus::Passed) => Self::Passed,
            Some(RecordStatus::Failed) => Self::Failed,
            Some(RecordStatus::NotApplicable) => Self::NotApplicable,
            Some(RecordStatus::Warning) | None => Self::Pending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub ordinal: u8,
    pub name: String,
    pub category: CategoryId,
    pub token: VerdictToken,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryTable {
    pub rows: Vec<SummaryRow>,
}

impl SummaryTable {
    /// Build the table from live category state. Each row resolves its
    /// verdict in the criterion's declared category by ordinal.
    pub fn build(
        categories: &BTreeMap<CategoryId, CategoryState>,
        localizer: &impl Localizer,
    ) -> Self {
        let rows = CRITERIA
            .iter()
            .map(|criterion| {
                let status = categories
                    .get(&criterion.category)
                    .and_then(|state| state.find(criterion.ordinal))
                    .map(|record| record.status);
                SummaryRow {
                    ordinal: criterion.ordinal,
                    name: localizer.resolve(criterion.name_key),
                    category: criterion.category,
                    token: VerdictToken::from_status(status),
                }
            })
            .collect();
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, ordinal: u8) -> Option<&SummaryRow> {
        self.rows.iter().find(|r| r.ordinal == ordinal)
    }
}
