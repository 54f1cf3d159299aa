//! Three-step signup flow: deceased details, account details, plan and theme.
//!
//! The wizard owns the draft and the current step. Network submission goes
//! through a [`SubmissionPort`]; shells that run the call on a worker thread use
//! [`SignupWizard::begin_submit`] and [`SignupWizard::finish_submit`] directly.

use thiserror::Error;

use crate::domain::{PlanSelection, SectionUpdate, SignupDraft, SignupPayload, SignupReceipt};
use crate::ports::{PortError, SubmissionPort};
use crate::state_machine::{wizard_transition, TransitionError, WizardAction, WizardStep};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error("step {step}: please fill in {}", .missing.join(", "))]
    Validation {
        step: u8,
        missing: Vec<&'static str>,
    },
    #[error("signup failed: {0}")]
    Submission(String),
    #[error("plan and theme can only be submitted from the last step")]
    NotOnFinalStep,
    #[error("a submission is already in flight")]
    InFlight,
    #[error("wizard was discarded before the submission finished")]
    Discarded,
    #[error(transparent)]
    Transition(#[from] TransitionError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    Advanced { from: WizardStep, to: WizardStep },
    Retreated { from: WizardStep, to: WizardStep },
    ValidationFailed { step: WizardStep, missing: Vec<&'static str> },
    Submitted { redirect: String },
    SubmissionFailed { message: String },
}

/// Payload handed out by [`SignupWizard::begin_submit`], tagged with the wizard epoch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    pub epoch: u64,
    pub payload: SignupPayload,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted(SignupReceipt),
    /// The wizard was discarded after the request went out; the response was dropped.
    Stale,
}

const DECEASED_REQUIRED: [&str; 2] = ["dateOfBirth", "dateOfDeath"];
const USER_REQUIRED: [&str; 6] = [
    "firstName",
    "lastName",
    "email",
    "phone",
    "password",
    "confirmPassword",
];

#[derive(Debug, Clone)]
pub struct SignupWizard {
    draft: SignupDraft,
    step: WizardStep,
    epoch: u64,
    in_flight: bool,
    last_error: Option<WizardError>,
    events: Vec<WizardEvent>,
}

impl Default for SignupWizard {
    fn default() -> Self {
        Self {
            draft: SignupDraft::default(),
            step: WizardStep::DeceasedInfo,
            epoch: 0,
            in_flight: false,
            last_error: None,
            events: Vec::new(),
        }
    }
}

impl SignupWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &SignupDraft {
        &self.draft
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight
    }

    pub fn last_error(&self) -> Option<&WizardError> {
        self.last_error.as_ref()
    }

    pub fn drain_events(&mut self) -> Vec<WizardEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn update_section(&mut self, update: SectionUpdate) {
        self.draft.apply(update);
    }

    /// Required fields of `step` that are still empty, in form order.
    pub fn missing_fields(&self, step: WizardStep) -> Vec<&'static str> {
        let d = &self.draft.deceased;
        let u = &self.draft.user;
        match step {
            WizardStep::DeceasedInfo => [&d.date_of_birth, &d.date_of_death]
                .into_iter()
                .zip(DECEASED_REQUIRED)
                .filter(|(value, _)| is_blank(value))
                .map(|(_, name)| name)
                .collect(),
            WizardStep::UserInfo => [
                &u.first_name,
                &u.last_name,
                &u.email,
                &u.phone,
                &u.password,
                &u.confirm_password,
            ]
            .into_iter()
            .zip(USER_REQUIRED)
            .filter(|(value, _)| is_blank(value))
            .map(|(_, name)| name)
            .collect(),
            WizardStep::PlanTheme | WizardStep::Submitted => Vec::new(),
        }
    }

    pub fn can_advance(&self, step: WizardStep) -> bool {
        self.missing_fields(step).is_empty()
    }

    pub fn next_step(&mut self) -> Result<WizardStep, WizardError> {
        let missing = self.missing_fields(self.step);
        if !missing.is_empty() {
            tracing::debug!(step = self.step.number(), ?missing, "step gate blocked");
            let err = WizardError::Validation {
                step: self.step.number(),
                missing: missing.clone(),
            };
            self.events.push(WizardEvent::ValidationFailed {
                step: self.step,
                missing,
            });
            self.last_error = Some(err.clone());
            return Err(err);
        }

        let (to, transition) = wizard_transition(self.step, WizardAction::Advance)?;
        tracing::debug!(from = ?transition.from, to = ?to, reason = transition.reason, "wizard advance");
        if to != self.step {
            self.events.push(WizardEvent::Advanced {
                from: self.step,
                to,
            });
        }
        self.step = to;
        self.last_error = None;
        Ok(to)
    }

    pub fn prev_step(&mut self) -> Result<WizardStep, WizardError> {
        let (to, transition) = wizard_transition(self.step, WizardAction::Retreat)?;
        tracing::debug!(from = ?transition.from, to = ?to, reason = transition.reason, "wizard retreat");
        if to != self.step {
            self.events.push(WizardEvent::Retreated {
                from: self.step,
                to,
            });
        }
        self.step = to;
        self.last_error = None;
        Ok(to)
    }

    /// Merges the plan and theme into the draft and hands out the flat payload.
    pub fn begin_submit(
        &mut self,
        selection: PlanSelection,
    ) -> Result<PendingSubmission, WizardError> {
        match self.step {
            WizardStep::PlanTheme => {}
            WizardStep::Submitted => {
                return Err(TransitionError::IllegalWizard {
                    from: WizardStep::Submitted,
                    action: WizardAction::SubmitSucceeded,
                }
                .into())
            }
            WizardStep::DeceasedInfo | WizardStep::UserInfo => {
                return Err(WizardError::NotOnFinalStep)
            }
        }
        if self.in_flight {
            return Err(WizardError::InFlight);
        }

        if selection.plan.is_some() {
            self.draft.plan = selection.plan;
        }
        if selection.theme.is_some() {
            self.draft.theme = selection.theme;
        }

        let Some(payload) = self.draft.to_payload() else {
            let mut missing = Vec::new();
            if self.draft.plan.is_none() {
                missing.push("plan");
            }
            if self.draft.theme.is_none() {
                missing.push("theme");
            }
            self.events.push(WizardEvent::ValidationFailed {
                step: self.step,
                missing: missing.clone(),
            });
            let err = WizardError::Validation {
                step: self.step.number(),
                missing,
            };
            self.last_error = Some(err.clone());
            return Err(err);
        };

        self.in_flight = true;
        self.last_error = None;
        Ok(PendingSubmission {
            epoch: self.epoch,
            payload,
        })
    }

    pub fn finish_submit(
        &mut self,
        pending: &PendingSubmission,
        outcome: Result<SignupReceipt, PortError>,
    ) -> Result<SubmitOutcome, WizardError> {
        if pending.epoch != self.epoch {
            tracing::debug!(
                pending_epoch = pending.epoch,
                epoch = self.epoch,
                "dropping stale signup response"
            );
            return Ok(SubmitOutcome::Stale);
        }
        self.in_flight = false;

        match outcome {
            Ok(receipt) => {
                let (to, _) = wizard_transition(self.step, WizardAction::SubmitSucceeded)?;
                tracing::info!(redirect = %receipt.redirect, "signup accepted");
                self.step = to;
                self.draft = SignupDraft::default();
                self.last_error = None;
                self.events.push(WizardEvent::Submitted {
                    redirect: receipt.redirect.clone(),
                });
                Ok(SubmitOutcome::Accepted(receipt))
            }
            Err(e) => {
                tracing::warn!(error = %e, "signup submission failed");
                let message = e.user_message();
                self.events.push(WizardEvent::SubmissionFailed {
                    message: message.clone(),
                });
                let err = WizardError::Submission(message);
                self.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Runs the whole submission synchronously against `port`.
    pub fn submit<S: SubmissionPort>(
        &mut self,
        selection: PlanSelection,
        port: &S,
    ) -> Result<SignupReceipt, WizardError> {
        let pending = self.begin_submit(selection)?;
        let outcome = port.submit_signup(&pending.payload);
        match self.finish_submit(&pending, outcome)? {
            SubmitOutcome::Accepted(receipt) => Ok(receipt),
            SubmitOutcome::Stale => Err(WizardError::Discarded),
        }
    }

    /// Drops the draft, e.g. when the user navigates away. In-flight responses become stale.
    pub fn discard(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        self.draft = SignupDraft::default();
        self.step = WizardStep::DeceasedInfo;
        self.in_flight = false;
        self.last_error = None;
        self.events.clear();
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
