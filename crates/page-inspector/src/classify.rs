//! Field-label association classifier.
//!
//! Decides, for one form control, whether and how it is programmatically
//! associated with a label. The rules are tried in a fixed priority order
//! and the first match wins; two rules can hold for the same control, so
//! the ordering is part of the contract: explicit structural association
//! (`for`/wrapping) outranks ARIA overrides, and `aria-labelledby` outranks
//! `aria-label` because it implies a visible label.

use serde::{Deserialize, Serialize};

use crate::dom::{NodeId, PageSnapshot};

/// Control types excluded from labeling requirements.
const UNLABELABLE_INPUT_TYPES: [&str; 4] = ["hidden", "submit", "button", "reset"];

/// The rule that established an association.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AssociationMethod {
    #[serde(rename = "for/id")]
    ForId,
    #[serde(rename = "wrapping")]
    Wrapping,
    #[serde(rename = "aria-labelledby")]
    AriaLabelledby,
    #[serde(rename = "aria-label")]
    AriaLabel,
}

impl AssociationMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ForId => "for/id",
            Self::Wrapping => "wrapping",
            Self::AriaLabelledby => "aria-labelledby",
            Self::AriaLabel => "aria-label",
        }
    }
}

/// Advisory classification result. Never a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelAssociation {
    pub linked: bool,
    pub method: Option<AssociationMethod>,
    /// The associated element, when the method references one. For
    /// `aria-labelledby` this need not be a `<label>`.
    pub label: Option<NodeId>,
}

impl LabelAssociation {
    pub const fn none() -> Self {
        Self {
            linked: false,
            method: None,
            label: None,
        }
    }

    const fn via(method: AssociationMethod, label: Option<NodeId>) -> Self {
        Self {
            linked: true,
            method: Some(method),
            label,
        }
    }
}

/// Whether the element is an input/textarea/select subject to the labeling
/// requirement. Hidden and push-button inputs are exempt.
pub fn is_labelable_control(page: &PageSnapshot, id: NodeId) -> bool {
    let Some(element) = page.element(id) else {
        return false;
    };
    match element.tag.as_str() {
        "textarea" | "select" => true,
        "input" => {
            let input_type = element
                .attributes
                .get("type")
                .map(String::as_str)
                .unwrap_or("text");
            !UNLABELABLE_INPUT_TYPES.contains(&input_type)
        }
        _ => false,
    }
}

/// Run the priority-ordered detection rules for one control.
pub fn classify_control(page: &PageSnapshot, control: NodeId) -> LabelAssociation {
    // 1. An id matched by some label's `for` reference.
    if let Some(dom_id) = page.attr(control, "id")
        && !dom_id.is_empty()
        && let Some(label) = page
            .with_tag("label")
            .find(|&l| page.attr(l, "for") == Some(dom_id))
    {
        return LabelAssociation::via(AssociationMethod::ForId, Some(label));
    }

    // 2. Nested inside a label element.
    if let Some(ancestor) = page
        .ancestors(control)
        .find(|&a| page.element(a).is_some_and(|e| e.tag == "label"))
    {
        return LabelAssociation::via(AssociationMethod::Wrapping, Some(ancestor));
    }

    // 3. aria-labelledby resolving to an existing element.
    if let Some(reference) = page.attr(control, "aria-labelledby")
        && !reference.is_empty()
        && let Some(target) = page.element_by_dom_id(reference)
    {
        return LabelAssociation::via(AssociationMethod::AriaLabelledby, Some(target));
    }

    // 4. Non-empty aria-label: the text itself is the label.
    if let Some(text) = page.attr(control, "aria-label")
        && !text.trim().is_empty()
    {
        return LabelAssociation::via(AssociationMethod::AriaLabel, None);
    }

    LabelAssociation::none()
}
