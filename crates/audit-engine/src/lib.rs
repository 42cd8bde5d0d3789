#![forbid(unsafe_code)]

//! Aggregation and scoring engine for the RGAA interactive accessibility
//! audit panel.
//!
//! The engine owns the per-category verdict records for the fixed 15-point
//! checklist, recomputes the aggregate snapshot on every mutation, and
//! publishes structured payloads to whatever render targets are present.
//! Verdicts are always human-supplied; nothing here decides pass/fail on
//! its own.

pub mod channel;
pub mod chart;
pub mod criteria;
pub mod export;
pub mod localize;
pub mod session;
pub mod snapshot;
pub mod summary;
pub mod verdict;
pub mod view;

pub use channel::{InspectorToggle, PageChannel, PageException, ToggleState};
pub use chart::{ChartArc, ChartGeometry, ChartModel, LegendEntry};
pub use criteria::{CRITERIA, CategoryId, Criterion, TOTAL_CRITERIA};
pub use export::{
    CHART_EXPORT_FILE_NAME, EXPORT_ERROR_RESTORE_MS, ExportArtifact, ExportControl,
    ExportControlState, ExportError, RasterEncoder,
};
pub use localize::{Localizer, StaticLocalizer};
pub use session::{AuditEvent, AuditSession};
pub use snapshot::{CategoryProgress, ScoreBand, Snapshot};
pub use summary::{SummaryRow, SummaryTable, VerdictToken};
pub use verdict::{CategoryState, RecordStatus, VerdictChoice, VerdictRecord};
pub use view::{CategoryPanelView, CountersView, HeadlessSink, RecordingSink, ScoreView, ViewSink};
