//! Verdict vocabulary and per-category verdict records.
//!
//! A verdict is always human-supplied: one of four mutually exclusive
//! options per criterion. Records exist only for non-pending verdicts; a
//! revert to not-tested removes the record outright. The `warning` status is
//! pushed by automated advisory checks, never by the validation radio group,
//! and counts toward the total without entering any score bucket.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::criteria::CategoryId;

// ---------------------------------------------------------------------------
// Verdict vocabulary
// ---------------------------------------------------------------------------

/// The four validation options offered per criterion. `NotTested` is the
/// pending state and never produces a persistent record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerdictChoice {
    Passed,
    Failed,
    NotApplicable,
    NotTested,
}

impl VerdictChoice {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::NotApplicable => "not-applicable",
            Self::NotTested => "not-tested",
        }
    }

    /// Translation key for the default result line shown under the record.
    pub const fn result_text_key(self) -> &'static str {
        match self {
            Self::Passed => "status_passed",
            Self::Failed => "status_failed",
            Self::NotApplicable => "validation_not_applicable",
            Self::NotTested => "status_pending",
        }
    }
}

impl fmt::Display for VerdictChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status carried by a stored record. The set is closed; `Warning` is the
/// advisory status excluded from both the score numerator and denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecordStatus {
    Passed,
    Failed,
    NotApplicable,
    Warning,
}

impl RecordStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::NotApplicable => "not-applicable",
            Self::Warning => "warning",
        }
    }

    /// Stored status for a validation choice; `None` for the pending option.
    pub const fn from_choice(choice: VerdictChoice) -> Option<RecordStatus> {
        match choice {
            VerdictChoice::Passed => Some(Self::Passed),
            VerdictChoice::Failed => Some(Self::Failed),
            VerdictChoice::NotApplicable => Some(Self::NotApplicable),
            VerdictChoice::NotTested => None,
        }
    }

    /// Whether this status enters the per-category validated counter.
    pub const fn is_validated(self) -> bool {
        matches!(self, Self::Passed | Self::Failed | Self::NotApplicable)
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// One recorded verdict. Identity is the criterion ordinal; the localized
/// display name is retained for presentation only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictRecord {
    pub criterion_ordinal: u8,
    pub name: String,
    pub status: RecordStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_text: Option<String>,
}

/// Outcome of an upsert, reported in audit events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Replaced,
}

/// Live record list for one category. Insertion order is preserved but not
/// semantically meaningful; lookup is by criterion ordinal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryState {
    category: CategoryId,
    records: Vec<VerdictRecord>,
}

impl CategoryState {
    pub fn new(category: CategoryId) -> Self {
        Self {
            category,
            records: Vec::new(),
        }
    }

    pub fn category(&self) -> CategoryId {
        self.category
    }

    pub fn records(&self) -> &[VerdictRecord] {
        &self.records
    }

    pub fn find(&self, criterion_ordinal: u8) -> Option<&VerdictRecord> {
        self.records
            .iter()
            .find(|r| r.criterion_ordinal == criterion_ordinal)
    }

    /// Replace in place when a record for the ordinal exists, append
    /// otherwise. At most one record per criterion at any time.
    pub fn upsert(&mut self, record: VerdictRecord) -> UpsertOutcome {
        match self
            .records
            .iter_mut()
            .find(|r| r.criterion_ordinal == record.criterion_ordinal)
        {
            Some(existing) => {
                *existing = record;
                UpsertOutcome::Replaced
            }
            None => {
                self.records.push(record);
                UpsertOutcome::Inserted
            }
        }
    }

    /// Remove the record for a criterion. Returns whether one existed.
    pub fn remove(&mut self, criterion_ordinal: u8) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.criterion_ordinal != criterion_ordinal);
        self.records.len() != before
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn count_with(&self, status: RecordStatus) -> usize {
        self.records.iter().filter(|r| r.status == status).count()
    }

    /// Passed + failed + not-applicable within this category. Warnings are
    /// excluded: they are advisory, not human validation.
    pub fn validated(&self) -> usize {
        self.records.iter().filter(|r| r.status.is_validated()).count()
    }
}
