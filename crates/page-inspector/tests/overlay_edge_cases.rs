//! Overlay plan construction under visibility and cleanup edge cases.

use rgaa_page_inspector::{
    AssociationMethod, BoundingRect, ComputedStyle, PageElement, PageSnapshot,
    build_overlay_plan, cleanup_plan,
};

fn box_at(y: f64) -> BoundingRect {
    BoundingRect::new(16.0, y, 140.0, 28.0)
}

fn hidden_style() -> ComputedStyle {
    ComputedStyle {
        visibility: "hidden".to_string(),
        ..ComputedStyle::default()
    }
}

#[test]
fn invisible_labels_are_skipped_but_still_classify() {
    // A visibility:hidden label still programmatically labels its control;
    // it just gets no highlight of its own.
    let mut page = PageSnapshot::new();
    page.push(
        PageElement::new("label")
            .with_attribute("for", "x")
            .with_rect(box_at(0.0))
            .with_style(hidden_style()),
    );
    page.push(
        PageElement::new("input")
            .with_attribute("id", "x")
            .with_rect(box_at(40.0)),
    );
    let plan = build_overlay_plan(&page);
    assert!(plan.label_marks.is_empty());
    assert_eq!(plan.control_marks.len(), 1);
    assert!(plan.control_marks[0].linked);
    assert_eq!(
        plan.control_marks[0].method,
        Some(AssociationMethod::ForId)
    );
}

#[test]
fn textareas_and_selects_are_highlighted_like_inputs() {
    let mut page = PageSnapshot::new();
    let wrap = page.push(PageElement::new("label").with_rect(box_at(0.0)));
    page.push(
        PageElement::new("textarea")
            .with_parent(wrap)
            .with_rect(box_at(40.0)),
    );
    page.push(PageElement::new("select").with_rect(box_at(80.0)));
    let plan = build_overlay_plan(&page);
    assert_eq!(plan.control_marks.len(), 2);
    let textarea_mark = &plan.control_marks[0];
    assert!(textarea_mark.linked);
    assert_eq!(
        textarea_mark.method_badge.as_ref().unwrap().text,
        "wrapping"
    );
    assert!(!plan.control_marks[1].linked);
}

#[test]
fn badges_anchor_to_the_element_box() {
    let mut page = PageSnapshot::new();
    page.push(PageElement::new("label").with_rect(BoundingRect::new(5.0, 50.0, 60.0, 18.0)));
    page.push(
        PageElement::new("input")
            .with_attribute("aria-label", "Search")
            .with_rect(BoundingRect::new(5.0, 72.0, 200.0, 30.0)),
    );
    let plan = build_overlay_plan(&page);

    let label_badge = &plan.label_marks[0].badge;
    assert_eq!((label_badge.x, label_badge.y), (5.0, 50.0));
    assert!(label_badge.lift_above);

    let status = &plan.control_marks[0].status_badge;
    assert_eq!(status.x, 5.0);
    assert_eq!(status.y, 72.0 + 30.0 + 2.0);
    assert!(!status.lift_above);

    let method = plan.control_marks[0].method_badge.as_ref().unwrap();
    assert_eq!(method.text, "aria-label");
    assert_eq!(method.y, 72.0 + 30.0 + 20.0);
}

#[test]
fn empty_page_yields_an_empty_plan() {
    let plan = build_overlay_plan(&PageSnapshot::new());
    assert!(plan.label_marks.is_empty());
    assert!(plan.control_marks.is_empty());
    // Cleanup still names the fixed touch points, so a deactivate with
    // nothing drawn remains safe.
    let cleanup = cleanup_plan();
    assert_eq!(cleanup.remove_container_id, plan.container_id);
}

#[test]
fn rebuild_reflects_only_the_new_snapshot() {
    let mut before = PageSnapshot::new();
    before.push(PageElement::new("input").with_rect(box_at(10.0)));
    before.push(PageElement::new("input").with_rect(box_at(50.0)));
    let plan_before = build_overlay_plan(&before);
    assert_eq!(plan_before.control_marks.len(), 2);

    // One control disappeared after a resize reflow.
    let mut after = PageSnapshot::new();
    after.push(PageElement::new("input").with_rect(box_at(10.0)));
    let plan_after = build_overlay_plan(&after);
    assert_eq!(plan_after.control_marks.len(), 1);
}
