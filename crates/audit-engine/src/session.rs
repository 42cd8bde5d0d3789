//! Audit session: the explicit aggregation context.
//!
//! All live state for one audit sits in an [`AuditSession`] constructed by
//! the caller and passed by reference; there is no ambient global, so
//! multiple independent sessions coexist and all scoring logic runs
//! headless. Every mutation recomputes the snapshot before any view is
//! published.
//!
//! Contract violations at the public boundary (unknown category/name pair,
//! out-of-range ordinal) are logged and ignored; they never corrupt the
//! recorded verdicts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::chart::ChartModel;
use crate::criteria::{CategoryId, Criterion, criteria_in, criterion_by_ordinal};
use crate::export::{ExportArtifact, ExportError, RasterEncoder};
use crate::localize::Localizer;
use crate::snapshot::{CategoryProgress, Snapshot};
use crate::summary::SummaryTable;
use crate::verdict::{CategoryState, RecordStatus, UpsertOutcome, VerdictChoice, VerdictRecord};
use crate::view::{CategoryPanelView, CountersView, ScoreView, ViewSink};

const COMPONENT: &str = "audit_aggregation";

const ERROR_UNKNOWN_NAME: &str = "RG-AGG-0001";
const ERROR_ORDINAL_OUT_OF_RANGE: &str = "RG-AGG-0002";

/// Structured audit event accompanying engine mutations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub component: String,
    pub event: String,
    pub outcome: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criterion_ordinal: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

/// Live audit state plus the localization capability it resolves display
/// names through.
#[derive(Debug)]
pub struct AuditSession<L: Localizer> {
    localizer: L,
    categories: BTreeMap<CategoryId, CategoryState>,
    /// Last-drawn chart, kept across redraws so export never re-queries
    /// live state.
    retained_chart: Option<ChartModel>,
    events: Vec<AuditEvent>,
}

impl<L: Localizer> AuditSession<L> {
    pub fn new(localizer: L) -> Self {
        let categories = CategoryId::all()
            .iter()
            .map(|&id| (id, CategoryState::new(id)))
            .collect();
        Self {
            localizer,
            categories,
            retained_chart: None,
            events: Vec::new(),
        }
    }

    pub fn localizer(&self) -> &L {
        &self.localizer
    }

    pub fn category(&self, id: CategoryId) -> &CategoryState {
        &self.categories[&id]
    }

    pub fn events(&self) -> &[AuditEvent] {
        &self.events
    }

    // -----------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------

    /// Record a validation choice for a criterion addressed by its
    /// localized display name within a category. This is the boundary the
    /// panel's radio groups call; an unknown pair is a contract violation,
    /// logged and ignored.
    pub fn record_verdict(
        &mut self,
        category: CategoryId,
        criterion_name: &str,
        choice: VerdictChoice,
        description: Option<String>,
        result_text: Option<String>,
    ) -> Snapshot {
        let resolved = criteria_in(category)
            .find(|c| self.localizer.resolve(c.name_key) == criterion_name);
        match resolved {
            Some(criterion) => self.apply(criterion, choice, description, result_text),
            None => {
                tracing::warn!(
                    component = COMPONENT,
                    category = %category,
                    name = criterion_name,
                    "no criterion with this name in the category; verdict ignored"
                );
                self.push_event("record_verdict", "rejected", None, Some(ERROR_UNKNOWN_NAME));
                self.snapshot()
            }
        }
    }

    /// Ordinal-addressed primitive behind [`record_verdict`].
    pub fn record_verdict_by_ordinal(
        &mut self,
        ordinal: u8,
        choice: VerdictChoice,
        description: Option<String>,
        result_text: Option<String>,
    ) -> Snapshot {
        match criterion_by_ordinal(ordinal) {
            Some(criterion) => self.apply(criterion, choice, description, result_text),
            None => {
                tracing::warn!(
                    component = COMPONENT,
                    ordinal,
                    "criterion ordinal out of range; verdict ignored"
                );
                self.push_event(
                    "record_verdict",
                    "rejected",
                    Some(ordinal),
                    Some(ERROR_ORDINAL_OUT_OF_RANGE),
                );
                self.snapshot()
            }
        }
    }

    /// Upsert an advisory warning record from an automated check. Warnings
    /// share the uniqueness and removal rules of human verdicts but enter
    /// no score bucket.
    pub fn record_advisory_warning(
        &mut self,
        ordinal: u8,
        description: Option<String>,
        result_text: Option<String>,
    ) -> Snapshot {
        let Some(criterion) = criterion_by_ordinal(ordinal) else {
            tracing::warn!(
                component = COMPONENT,
                ordinal,
                "criterion ordinal out of range; warning ignored"
            );
            self.push_event(
                "record_advisory_warning",
                "rejected",
                Some(ordinal),
                Some(ERROR_ORDINAL_OUT_OF_RANGE),
            );
            return self.snapshot();
        };
        let name = self.localizer.resolve(criterion.name_key);
        let record = VerdictRecord {
            criterion_ordinal: criterion.ordinal,
            name,
            status: RecordStatus::Warning,
            description,
            result_text,
        };
        let outcome = self
            .category_state_mut(criterion.category)
            .upsert(record);
        self.push_event(
            "record_advisory_warning",
            upsert_outcome_str(outcome),
            Some(criterion.ordinal),
            None,
        );
        self.snapshot()
    }

    /// Start a fresh audit: every category's records are cleared; declared
    /// totals are untouched.
    pub fn reset_all(&mut self) -> Snapshot {
        for state in self.categories.values_mut() {
            state.clear();
        }
        self.push_event("reset_all", "cleared", None, None);
        self.snapshot()
    }

    fn apply(
        &mut self,
        criterion: &'static Criterion,
        choice: VerdictChoice,
        description: Option<String>,
        result_text: Option<String>,
    ) -> Snapshot {
        match RecordStatus::from_choice(choice) {
            None => {
                // Revert to pending: the record disappears entirely.
                let removed = self.category_state_mut(criterion.category).remove(criterion.ordinal);
                self.push_event(
                    "record_verdict",
                    if removed { "removed" } else { "already_pending" },
                    Some(criterion.ordinal),
                    None,
                );
            }
            Some(status) => {
                let name = self.localizer.resolve(criterion.name_key);
                let result_text = result_text
                    .or_else(|| Some(self.localizer.resolve(choice.result_text_key())));
                let record = VerdictRecord {
                    criterion_ordinal: criterion.ordinal,
                    name,
                    status,
                    description,
                    result_text,
                };
                let outcome = self.category_state_mut(criterion.category).upsert(record);
                self.push_event(
                    "record_verdict",
                    upsert_outcome_str(outcome),
                    Some(criterion.ordinal),
                    None,
                );
            }
        }
        self.snapshot()
    }

    fn category_state_mut(&mut self, id: CategoryId) -> &mut CategoryState {
        self.categories
            .entry(id)
            .or_insert_with(|| CategoryState::new(id))
    }

    fn push_event(
        &mut self,
        event: &str,
        outcome: &str,
        criterion_ordinal: Option<u8>,
        error_code: Option<&str>,
    ) {
        self.events.push(AuditEvent {
            component: COMPONENT.to_string(),
            event: event.to_string(),
            outcome: outcome.to_string(),
            criterion_ordinal,
            error_code: error_code.map(str::to_string),
        });
    }

    // -----------------------------------------------------------------
    // Derived views
    // -----------------------------------------------------------------

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::compute(&self.categories)
    }

    pub fn summary_table(&self) -> SummaryTable {
        SummaryTable::build(&self.categories, &self.localizer)
    }

    pub fn category_panel(&self, category: CategoryId) -> CategoryPanelView {
        let state = &self.categories[&category];
        let records = state.records().to_vec();
        let empty_state = if records.is_empty() {
            Some(self.localizer.resolve("empty_state"))
        } else {
            None
        };
        CategoryPanelView {
            category,
            icon: category.icon().to_string(),
            title: self.localizer.resolve(category.display_name_key()),
            progress: CategoryProgress {
                validated: state.validated(),
                declared_total: category.declared_total(),
            },
            records,
            empty_state,
        }
    }

    /// Recompute and push every view. The chart built here becomes the
    /// retained model that export reproduces later.
    pub fn publish<S: ViewSink>(&mut self, sink: &mut S) -> Snapshot {
        let snapshot = self.snapshot();
        sink.counters(&CountersView::from_snapshot(&snapshot));
        sink.score(&ScoreView::from_snapshot(&snapshot));
        let chart = ChartModel::build(&snapshot, &self.localizer);
        self.retained_chart = Some(chart.clone());
        sink.chart(&chart);
        for (&id, progress) in &snapshot.per_category {
            sink.category_progress(id, progress);
            let panel = self.category_panel(id);
            sink.category_panel(&panel);
        }
        sink.summary(&self.summary_table());
        snapshot
    }

    pub fn retained_chart(&self) -> Option<&ChartModel> {
        self.retained_chart.as_ref()
    }

    /// Export the last-drawn chart. Fails when no chart has been published
    /// yet; never re-derives the chart from live state.
    pub fn export_chart(
        &self,
        encoder: &mut dyn RasterEncoder,
        generated_at_unix_ms: i64,
    ) -> Result<ExportArtifact, ExportError> {
        let retained = self
            .retained_chart
            .as_ref()
            .ok_or(ExportError::NothingRendered)?;
        crate::export::export_chart(retained, encoder, generated_at_unix_ms)
    }
}

const fn upsert_outcome_str(outcome: UpsertOutcome) -> &'static str {
    match outcome {
        UpsertOutcome::Inserted => "recorded",
        UpsertOutcome::Replaced => "replaced",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::localize::StaticLocalizer;

    fn english() -> StaticLocalizer {
        StaticLocalizer::from_pairs([
            ("criterion_skip_links", "Skip links"),
            ("criterion_keyboard_access", "Keyboard access"),
            ("criterion_form_fields", "Form field labels"),
            ("empty_state", "No test run yet"),
            ("status_passed", "Validated"),
            ("status_failed", "Not validated"),
        ])
    }

    #[test]
    fn fresh_session_is_empty() {
        let session = AuditSession::new(english());
        let snapshot = session.snapshot();
        assert_eq!(snapshot.total, 0);
        assert_eq!(snapshot.score, 0);
        for &id in CategoryId::all() {
            assert!(session.category(id).records().is_empty());
        }
    }

    #[test]
    fn record_by_name_upserts_once() {
        let mut session = AuditSession::new(english());
        session.record_verdict(
            CategoryId::Navigation,
            "Skip links",
            VerdictChoice::Passed,
            None,
            None,
        );
        let snapshot = session.record_verdict(
            CategoryId::Navigation,
            "Skip links",
            VerdictChoice::Passed,
            None,
            None,
        );
        assert_eq!(snapshot.total, 1);
        assert_eq!(session.category(CategoryId::Navigation).records().len(), 1);
    }

    #[test]
    fn unknown_name_is_logged_noop() {
        let mut session = AuditSession::new(english());
        let snapshot = session.record_verdict(
            CategoryId::Navigation,
            "Form field labels", // declared under structure, not navigation
            VerdictChoice::Passed,
            None,
            None,
        );
        assert_eq!(snapshot.total, 0);
        let event = session.events().last().unwrap();
        assert_eq!(event.outcome, "rejected");
        assert_eq!(event.error_code.as_deref(), Some("RG-AGG-0001"));
    }

    #[test]
    fn revert_to_pending_removes_the_record() {
        let mut session = AuditSession::new(english());
        session.record_verdict_by_ordinal(1, VerdictChoice::Passed, None, None);
        let snapshot =
            session.record_verdict_by_ordinal(1, VerdictChoice::NotTested, None, None);
        assert_eq!(snapshot.total, 0);
        assert!(session.category(CategoryId::Navigation).records().is_empty());
    }

    #[test]
    fn default_result_text_is_localized_status() {
        let mut session = AuditSession::new(english());
        session.record_verdict_by_ordinal(1, VerdictChoice::Passed, None, None);
        let record = session.category(CategoryId::Navigation).find(1).unwrap();
        assert_eq!(record.result_text.as_deref(), Some("Validated"));
        assert_eq!(record.name, "Skip links");
    }

    #[test]
    fn explicit_result_text_wins_over_default() {
        let mut session = AuditSession::new(english());
        session.record_verdict_by_ordinal(
            2,
            VerdictChoice::Failed,
            Some("details".to_string()),
            Some("3 traps found".to_string()),
        );
        let record = session.category(CategoryId::Navigation).find(2).unwrap();
        assert_eq!(record.result_text.as_deref(), Some("3 traps found"));
        assert_eq!(record.description.as_deref(), Some("details"));
    }

    #[test]
    fn localized_name_collision_resolves_to_lowest_ordinal() {
        // Two navigation criteria sharing one localized string: resolution
        // is deterministic, the first in registry order wins.
        let localizer = StaticLocalizer::from_pairs([
            ("criterion_skip_links", "Duplicate"),
            ("criterion_keyboard_access", "Duplicate"),
        ]);
        let mut session = AuditSession::new(localizer);
        session.record_verdict(
            CategoryId::Navigation,
            "Duplicate",
            VerdictChoice::Passed,
            None,
            None,
        );
        let snapshot = session.record_verdict(
            CategoryId::Navigation,
            "Duplicate",
            VerdictChoice::Failed,
            None,
            None,
        );
        // Both calls landed on ordinal 1; ordinal 2 never gained a record.
        assert_eq!(snapshot.total, 1);
        let state = session.category(CategoryId::Navigation);
        assert_eq!(state.find(1).unwrap().status, RecordStatus::Failed);
        assert!(state.find(2).is_none());
    }

    #[test]
    fn reset_clears_records_and_keeps_declared_totals() {
        let mut session = AuditSession::new(english());
        session.record_verdict_by_ordinal(1, VerdictChoice::Passed, None, None);
        session.record_verdict_by_ordinal(14, VerdictChoice::Failed, None, None);
        let snapshot = session.reset_all();
        assert_eq!(snapshot.total, 0);
        assert_eq!(snapshot.score, 0);
        for &id in CategoryId::all() {
            assert!(session.category(id).records().is_empty());
            assert_eq!(
                snapshot.per_category[&id].declared_total,
                id.declared_total()
            );
        }
    }

    #[test]
    fn advisory_warning_shares_uniqueness_rules() {
        let mut session = AuditSession::new(english());
        session.record_advisory_warning(14, Some("2 unlabeled fields".to_string()), None);
        let snapshot = session.record_advisory_warning(14, None, None);
        assert_eq!(snapshot.total, 1);
        assert_eq!(snapshot.warnings, 1);
        // A later human verdict replaces the warning in place.
        let snapshot = session.record_verdict_by_ordinal(14, VerdictChoice::Failed, None, None);
        assert_eq!(snapshot.total, 1);
        assert_eq!(snapshot.warnings, 0);
        assert_eq!(snapshot.failed, 1);
    }

    #[test]
    fn empty_panel_carries_empty_state_label() {
        let session = AuditSession::new(english());
        let panel = session.category_panel(CategoryId::Structure);
        assert_eq!(panel.icon, "📋");
        assert_eq!(panel.empty_state.as_deref(), Some("No test run yet"));
        assert_eq!(panel.progress.badge_text(), "(0/4)");
    }
}
