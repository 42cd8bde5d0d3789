//! Field-label overlay plans.
//!
//! The overlay highlights every visible label and every visible labelable
//! control, colored by linkage, with badges naming the association method.
//! A plan is a pure function of the page snapshot and is rebuilt from
//! scratch on every scroll/resize; nothing is patched incrementally. The
//! cleanup plan names exactly what activation touched — the container id
//! and the marker attributes — so removal restores the page completely and
//! repeated activate/deactivate round-trips are idempotent.
//!
//! This module carries structured data only; applying a plan to the live
//! document is the bridge snippet's job.

use serde::{Deserialize, Serialize};

use crate::classify::{AssociationMethod, classify_control, is_labelable_control};
use crate::dom::{NodeId, PageSnapshot};

pub const OVERLAY_CONTAINER_ID: &str = "rgaa-form-fields-overlay";
pub const LABEL_MARKER_ATTR: &str = "data-rgaa-label-border";
pub const CONTROL_MARKER_ATTR: &str = "data-rgaa-input-border";

pub const LABEL_OUTLINE_COLOR: &str = "#4caf50";
pub const LINKED_OUTLINE_COLOR: &str = "#1976d2";
pub const UNLINKED_OUTLINE_COLOR: &str = "#f44336";
pub const METHOD_BADGE_COLOR: &str = "#666";

pub const OUTLINE_WIDTH_PX: u32 = 2;
pub const OUTLINE_OFFSET_PX: u32 = 2;

const LABEL_BADGE_TEXT: &str = "Label";
const LINKED_BADGE_TEXT: &str = "Input ✓";
const UNLINKED_BADGE_TEXT: &str = "Input ✗";

/// Vertical gap between a control and its status badge.
const STATUS_BADGE_GAP_PX: f64 = 2.0;
/// Vertical offset of the method badge below the status badge.
const METHOD_BADGE_GAP_PX: f64 = 20.0;

// ---------------------------------------------------------------------------
// Plan payloads
// ---------------------------------------------------------------------------

/// Floating badge anchored at viewport coordinates. `lift_above` badges are
/// shifted up by their own rendered height (label badges sit on the top
/// edge of their element).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Badge {
    pub text: String,
    pub background: String,
    pub x: f64,
    pub y: f64,
    pub lift_above: bool,
}

/// Uniform highlight for one visible label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelMark {
    pub target: NodeId,
    pub outline_color: String,
    pub marker_attribute: String,
    pub badge: Badge,
}

/// Highlight for one visible labelable control, colored by linkage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlMark {
    pub target: NodeId,
    pub linked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<AssociationMethod>,
    pub outline_color: String,
    pub marker_attribute: String,
    pub status_badge: Badge,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method_badge: Option<Badge>,
}

/// Everything one overlay pass draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayPlan {
    pub container_id: String,
    pub label_marks: Vec<LabelMark>,
    pub control_marks: Vec<ControlMark>,
}

/// Everything deactivation must undo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupPlan {
    pub remove_container_id: String,
    /// Marker attributes to strip, restoring each element's outline.
    pub clear_marker_attributes: Vec<String>,
    pub detach_scroll_listener: bool,
    pub detach_resize_listener: bool,
}

pub fn cleanup_plan() -> CleanupPlan {
    CleanupPlan {
        remove_container_id: OVERLAY_CONTAINER_ID.to_string(),
        clear_marker_attributes: vec![
            LABEL_MARKER_ATTR.to_string(),
            CONTROL_MARKER_ATTR.to_string(),
        ],
        detach_scroll_listener: true,
        detach_resize_listener: true,
    }
}

// ---------------------------------------------------------------------------
// Plan construction
// ---------------------------------------------------------------------------

/// Build the full overlay for the current snapshot. Hidden elements and
/// exempt control types contribute nothing.
pub fn build_overlay_plan(page: &PageSnapshot) -> OverlayPlan {
    let mut label_marks = Vec::new();
    for label in page.with_tag("label") {
        if !page.is_visible(label) {
            continue;
        }
        let Some(element) = page.element(label) else {
            continue;
        };
        label_marks.push(LabelMark {
            target: label,
            outline_color: LABEL_OUTLINE_COLOR.to_string(),
            marker_attribute: LABEL_MARKER_ATTR.to_string(),
            badge: Badge {
                text: LABEL_BADGE_TEXT.to_string(),
                background: LABEL_OUTLINE_COLOR.to_string(),
                x: element.rect.x,
                y: element.rect.y,
                lift_above: true,
            },
        });
    }

    let mut control_marks = Vec::new();
    for control in labelable_controls(page) {
        if !page.is_visible(control) {
            continue;
        }
        let Some(element) = page.element(control) else {
            continue;
        };
        let association = classify_control(page, control);
        let outline_color = if association.linked {
            LINKED_OUTLINE_COLOR
        } else {
            UNLINKED_OUTLINE_COLOR
        };
        let badge_y = element.rect.y + element.rect.height + STATUS_BADGE_GAP_PX;
        let method_badge = association.method.map(|method| Badge {
            text: method.as_str().to_string(),
            background: METHOD_BADGE_COLOR.to_string(),
            x: element.rect.x,
            y: element.rect.y + element.rect.height + METHOD_BADGE_GAP_PX,
            lift_above: false,
        });
        control_marks.push(ControlMark {
            target: control,
            linked: association.linked,
            method: association.method,
            outline_color: outline_color.to_string(),
            marker_attribute: CONTROL_MARKER_ATTR.to_string(),
            status_badge: Badge {
                text: if association.linked {
                    LINKED_BADGE_TEXT.to_string()
                } else {
                    UNLINKED_BADGE_TEXT.to_string()
                },
                background: outline_color.to_string(),
                x: element.rect.x,
                y: badge_y,
                lift_above: false,
            },
            method_badge,
        });
    }

    OverlayPlan {
        container_id: OVERLAY_CONTAINER_ID.to_string(),
        label_marks,
        control_marks,
    }
}

fn labelable_controls(page: &PageSnapshot) -> impl Iterator<Item = NodeId> + '_ {
    page.with_tag("input")
        .chain(page.with_tag("textarea"))
        .chain(page.with_tag("select"))
        .filter(|&id| is_labelable_control(page, id))
}
