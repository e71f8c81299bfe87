//! Wizard controller: the assessment state machine.
//!
//! Step1 → Step2 → Step3 → Confirming → Completed, with back edges
//! Step2 → Step1, Step3 → Step2 and the gate's dismiss edge Confirming → Step3.
//! A rejected action never changes the state or the record.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::assessment::gate::{CompletionGate, GateDecision, GatePrompt};
use crate::assessment::models::{AssessmentRecord, Interests, PersonalInfo, Skills};
use crate::assessment::progress::Progress;
use crate::assessment::schema::FieldErrors;
use crate::assessment::steps::{self, StepForm, StepView, TOTAL_STEPS};

/// Route the client is sent to once the assessment is confirmed.
pub const RESULTS_ROUTE: &str = "/results";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardState {
    Step1,
    Step2,
    Step3,
    Confirming,
    Completed,
}

impl WizardState {
    pub fn can_transition_to(&self, target: WizardState) -> bool {
        use WizardState::*;
        matches!(
            (self, target),
            (Step1, Step2)
                | (Step2, Step3)
                | (Step2, Step1)
                | (Step3, Confirming)
                | (Step3, Step2)
                | (Confirming, Completed)
                | (Confirming, Step3)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// The step pointer, always within 1..=3. The gate and the terminal state
    /// sit on top of the last step.
    pub fn current_step(&self) -> u8 {
        match self {
            Self::Step1 => 1,
            Self::Step2 => 2,
            Self::Step3 | Self::Confirming | Self::Completed => 3,
        }
    }
}

impl Default for WizardState {
    fn default() -> Self {
        Self::Step1
    }
}

impl std::fmt::Display for WizardState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Step1 => "step1",
            Self::Step2 => "step2",
            Self::Step3 => "step3",
            Self::Confirming => "confirming",
            Self::Completed => "completed",
        };
        write!(f, "{s}")
    }
}

/// Data for one step, tagged with the section it belongs to.
///
/// Wire form: `{"step": "personal_info", "data": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "step", content = "data", rename_all = "snake_case")]
pub enum StepSubmission {
    PersonalInfo(PersonalInfo),
    Skills(Skills),
    Interests(Interests),
}

impl StepSubmission {
    pub fn section(&self) -> &'static str {
        match self {
            Self::PersonalInfo(_) => "personal_info",
            Self::Skills(_) => "skills",
            Self::Interests(_) => "interests",
        }
    }

    /// The submitted form shown back with its field errors, keeping what the
    /// user typed.
    pub fn render_rejected(&self, errors: &FieldErrors) -> StepView {
        match self {
            Self::PersonalInfo(data) => steps::render(data, Some(errors)),
            Self::Skills(data) => steps::render(data, Some(errors)),
            Self::Interests(data) => steps::render(data, Some(errors)),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum WizardError {
    #[error("{} field(s) failed validation", .0.len())]
    Validation(FieldErrors),

    #[error("cannot submit {submitted} while at {state}")]
    StepMismatch {
        state: WizardState,
        submitted: &'static str,
    },

    #[error("cannot {action} while at {state}")]
    InvalidTransition {
        state: WizardState,
        action: &'static str,
    },
}

/// Hand-off produced when the gate is confirmed.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Completion {
    pub record: AssessmentRecord,
    pub redirect: &'static str,
}

#[derive(Debug, Clone, Default)]
pub struct Wizard {
    state: WizardState,
    record: AssessmentRecord,
    gate: CompletionGate,
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    pub fn record(&self) -> &AssessmentRecord {
        &self.record
    }

    pub fn progress(&self) -> Progress {
        Progress::new(self.state.current_step(), TOTAL_STEPS)
    }

    pub fn gate_prompt(&self) -> Option<&'static GatePrompt> {
        self.gate.prompt()
    }

    /// The form for the current step, pre-filled from the record. While the
    /// gate is open the last step stays on screen beneath it.
    pub fn current_view(&self) -> Option<StepView> {
        match self.state {
            WizardState::Step1 => Some(steps::render(&self.record.personal_info, None)),
            WizardState::Step2 => Some(steps::render(&self.record.skills, None)),
            WizardState::Step3 | WizardState::Confirming => {
                Some(steps::render(&self.record.interests, None))
            }
            WizardState::Completed => None,
        }
    }

    /// Validates and merges the current step's data, then moves forward.
    pub fn submit(&mut self, submission: StepSubmission) -> Result<WizardState, WizardError> {
        if self.state.is_terminal() || self.gate.is_open() {
            return Err(WizardError::InvalidTransition {
                state: self.state,
                action: "submit",
            });
        }

        let section = submission.section();
        let (record, next) = match (self.state, submission) {
            (WizardState::Step1, StepSubmission::PersonalInfo(data)) => (
                merge(&self.record, data, AssessmentRecord::with_personal_info)?,
                WizardState::Step2,
            ),
            (WizardState::Step2, StepSubmission::Skills(data)) => (
                merge(&self.record, data, AssessmentRecord::with_skills)?,
                WizardState::Step3,
            ),
            (WizardState::Step3, StepSubmission::Interests(data)) => (
                merge(&self.record, data, AssessmentRecord::with_interests)?,
                WizardState::Confirming,
            ),
            (state, _) => {
                return Err(WizardError::StepMismatch {
                    state,
                    submitted: section,
                })
            }
        };

        self.transition(next, "submit")?;
        self.record = record;
        if next == WizardState::Confirming {
            self.gate.open();
        }
        debug!(section, state = %self.state, "Step accepted");
        Ok(self.state)
    }

    pub fn back(&mut self) -> Result<WizardState, WizardError> {
        let previous = match self.state {
            WizardState::Step2 => WizardState::Step1,
            WizardState::Step3 => WizardState::Step2,
            state => {
                return Err(WizardError::InvalidTransition {
                    state,
                    action: "go back",
                })
            }
        };
        self.transition(previous, "go back")?;
        Ok(self.state)
    }

    /// Resolves the gate. Confirming finishes the wizard and yields the record
    /// for hand-off; dismissing returns to the last step unchanged.
    pub fn decide(&mut self, decision: GateDecision) -> Result<WizardState, WizardError> {
        let (target, action) = match decision {
            GateDecision::Confirm => (WizardState::Completed, "confirm"),
            GateDecision::Dismiss => (WizardState::Step3, "dismiss"),
        };
        if !self.state.can_transition_to(target) || self.gate.decide(decision).is_none() {
            return Err(WizardError::InvalidTransition {
                state: self.state,
                action,
            });
        }
        self.transition(target, action)?;
        Ok(self.state)
    }

    pub fn confirm(&mut self) -> Result<Completion, WizardError> {
        self.decide(GateDecision::Confirm)?;
        info!("Assessment completed");
        Ok(Completion {
            record: self.record.clone(),
            redirect: RESULTS_ROUTE,
        })
    }

    pub fn dismiss(&mut self) -> Result<WizardState, WizardError> {
        self.decide(GateDecision::Dismiss)
    }

    fn transition(&mut self, target: WizardState, action: &'static str) -> Result<(), WizardError> {
        if !self.state.can_transition_to(target) {
            return Err(WizardError::InvalidTransition {
                state: self.state,
                action,
            });
        }
        debug!(from = %self.state, to = %target, "Wizard transition");
        self.state = target;
        Ok(())
    }
}

/// Runs a step submission and, if accepted, builds the replacement record.
fn merge<T: StepForm>(
    record: &AssessmentRecord,
    candidate: T,
    apply: fn(&AssessmentRecord, T) -> AssessmentRecord,
) -> Result<AssessmentRecord, WizardError> {
    let mut next = record.clone();
    steps::submit(candidate, |accepted| next = apply(record, accepted))
        .map_err(WizardError::Validation)?;
    Ok(next)
}
