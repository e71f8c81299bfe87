//! Completion gate: the blocking confirmation shown after the last step.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct GatePrompt {
    pub title: &'static str,
    pub description: &'static str,
    pub action_label: &'static str,
}

pub const COMPLETION_PROMPT: GatePrompt = GatePrompt {
    title: "Assessment Complete!",
    description: "Thank you for completing the assessment. Our AI will now analyze your responses to generate personalized career recommendations.",
    action_label: "View My Results",
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GateDecision {
    Confirm,
    Dismiss,
}

/// Open/closed is the gate's only state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompletionGate {
    open: bool,
}

impl CompletionGate {
    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Closes the gate and reports the decision. A closed gate ignores input.
    pub fn decide(&mut self, decision: GateDecision) -> Option<GateDecision> {
        if !self.open {
            return None;
        }
        self.open = false;
        Some(decision)
    }

    pub fn prompt(&self) -> Option<&'static GatePrompt> {
        self.open.then_some(&COMPLETION_PROMPT)
    }
}
