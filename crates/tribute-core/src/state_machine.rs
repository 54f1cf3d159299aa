use thiserror::Error;

use crate::domain::{BadgeVariant, TicketStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WizardStep {
    DeceasedInfo,
    UserInfo,
    PlanTheme,
    Submitted,
}

impl WizardStep {
    pub const LAST_FORM_STEP: u8 = 3;

    /// 1-based position of the form step. `Submitted` reports the last form step.
    pub fn number(self) -> u8 {
        match self {
            WizardStep::DeceasedInfo => 1,
            WizardStep::UserInfo => 2,
            WizardStep::PlanTheme | WizardStep::Submitted => 3,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(WizardStep::DeceasedInfo),
            2 => Some(WizardStep::UserInfo),
            3 => Some(WizardStep::PlanTheme),
            _ => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::DeceasedInfo => "Deceased Info",
            WizardStep::UserInfo => "User Info",
            WizardStep::PlanTheme => "Plan & Theme",
            WizardStep::Submitted => "Submitted",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardAction {
    Advance,
    Retreat,
    SubmitSucceeded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepTransition {
    pub from: WizardStep,
    pub to: WizardStep,
    pub reason: &'static str,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("illegal wizard transition: {from:?} on {action:?}")]
    IllegalWizard {
        from: WizardStep,
        action: WizardAction,
    },
}

/// Step table for the signup flow. Field gating happens in the wizard, not here.
pub fn wizard_transition(
    from: WizardStep,
    action: WizardAction,
) -> Result<(WizardStep, StepTransition), TransitionError> {
    use WizardAction::*;
    use WizardStep::*;

    let (to, reason) = match (from, action) {
        (DeceasedInfo, Advance) => (UserInfo, "deceased_info_complete"),
        (UserInfo, Advance) => (PlanTheme, "user_info_complete"),
        (PlanTheme, Advance) => (PlanTheme, "last_step_capped"),
        (DeceasedInfo, Retreat) => (DeceasedInfo, "first_step_floored"),
        (UserInfo, Retreat) => (DeceasedInfo, "back"),
        (PlanTheme, Retreat) => (UserInfo, "back"),
        (PlanTheme, SubmitSucceeded) => (Submitted, "submission_accepted"),
        (from, action) => return Err(TransitionError::IllegalWizard { from, action }),
    };

    Ok((
        to,
        StepTransition {
            from,
            to,
            reason,
        },
    ))
}

pub fn status_variant(status: Option<TicketStatus>) -> BadgeVariant {
    match status {
        Some(TicketStatus::Open) => BadgeVariant::Info,
        Some(TicketStatus::Responded) => BadgeVariant::Warning,
        Some(TicketStatus::Closed) => BadgeVariant::Success,
        Some(TicketStatus::Unknown) | None => BadgeVariant::Default,
    }
}

/// Status the admin asks for when pressing close/reopen on a ticket.
pub fn toggled_status(current: Option<TicketStatus>) -> TicketStatus {
    match current {
        Some(TicketStatus::Closed) => TicketStatus::Open,
        _ => TicketStatus::Closed,
    }
}
