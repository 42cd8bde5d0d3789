#![forbid(unsafe_code)]

//! Page-side logic for the RGAA audit panel's form-field analysis.
//!
//! Runs against a structured snapshot of the inspected document: classifies
//! each form control's label association through a fixed priority of
//! detection rules, and derives the overlay/cleanup plans the bridge
//! snippet applies to the live page. The classification is advisory; it
//! never records a verdict.

pub mod classify;
pub mod dom;
pub mod overlay;

pub use classify::{AssociationMethod, LabelAssociation, classify_control, is_labelable_control};
pub use dom::{BoundingRect, ComputedStyle, NodeId, PageElement, PageSnapshot};
pub use overlay::{
    Badge, CleanupPlan, ControlMark, LabelMark, OVERLAY_CONTAINER_ID, OverlayPlan,
    build_overlay_plan, cleanup_plan,
};
