//! Remote-evaluation channel and the field-analysis toggle.
//!
//! The channel runs a snippet inside the inspected document and hands back a
//! result or a reported exception as a value; exceptions are never thrown
//! into the caller. Calls are fire-and-forget from the engine's point of
//! view: no retry policy, and cancellation is absent, not best-effort.
//!
//! The analyze toggle is the one consumer: activation installs the
//! field-label overlay, deactivation removes it. A reported exception logs
//! and reverts the toggle to inactive; recorded verdicts are unaffected.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

const COMPONENT: &str = "page_channel";

/// Request tokens for the two overlay snippets. The snippet bodies live on
/// the page side; the engine treats them as opaque.
pub const OVERLAY_INSTALL_REQUEST: &str = "rgaa.overlay.install";
pub const OVERLAY_CLEANUP_REQUEST: &str = "rgaa.overlay.cleanup";

const ERROR_PAGE_EXCEPTION: &str = "RG-CHN-0001";

/// Exception reported from the inspected page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageException {
    pub message: String,
}

impl PageException {
    pub fn stable_code(&self) -> &'static str {
        ERROR_PAGE_EXCEPTION
    }
}

impl fmt::Display for PageException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{ERROR_PAGE_EXCEPTION}: page exception: {}", self.message)
    }
}

impl std::error::Error for PageException {}

pub type EvalResult = Result<Value, PageException>;

/// Capability for evaluating a snippet inside the inspected document.
pub trait PageChannel {
    fn eval(&mut self, request: &str) -> EvalResult;

    /// Continuation form: the caller attaches what happens next instead of
    /// blocking on the page round-trip.
    fn eval_with(&mut self, request: &str, continuation: impl FnOnce(EvalResult))
    where
        Self: Sized,
    {
        continuation(self.eval(request));
    }
}

// ---------------------------------------------------------------------------
// Toggle
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleState {
    Inactive,
    Active,
}

/// Two-state machine behind the "analyze form fields" button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InspectorToggle {
    state: ToggleState,
}

impl Default for InspectorToggle {
    fn default() -> Self {
        Self::new()
    }
}

impl InspectorToggle {
    pub fn new() -> Self {
        Self {
            state: ToggleState::Inactive,
        }
    }

    pub fn state(&self) -> ToggleState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == ToggleState::Active
    }

    /// Install the overlay. Idempotent: an already-active toggle sends
    /// nothing. A reported exception leaves the toggle inactive and the
    /// page unmodified.
    pub fn activate(&mut self, channel: &mut impl PageChannel) -> ToggleState {
        if self.state == ToggleState::Active {
            return self.state;
        }
        match channel.eval(OVERLAY_INSTALL_REQUEST) {
            Ok(_) => self.state = ToggleState::Active,
            Err(exception) => {
                tracing::warn!(
                    component = COMPONENT,
                    error_code = exception.stable_code(),
                    message = %exception.message,
                    "overlay install failed; toggle reverted to inactive"
                );
                self.state = ToggleState::Inactive;
            }
        }
        self.state
    }

    /// Remove the overlay. Idempotent; the toggle always ends inactive,
    /// even when the cleanup snippet reports an exception.
    pub fn deactivate(&mut self, channel: &mut impl PageChannel) -> ToggleState {
        if self.state == ToggleState::Inactive {
            return self.state;
        }
        if let Err(exception) = channel.eval(OVERLAY_CLEANUP_REQUEST) {
            tracing::warn!(
                component = COMPONENT,
                error_code = exception.stable_code(),
                message = %exception.message,
                "overlay cleanup reported an exception"
            );
        }
        self.state = ToggleState::Inactive;
        self.state
    }
}
