pub mod domain;
pub mod ports;
pub mod session;
pub mod state_machine;
pub mod tickets;
pub mod wizard;

pub use domain::{
    AuthSession, BadgeVariant, Credentials, DeceasedInfo, DeceasedPatch, Plan, PlanSelection,
    SectionUpdate, SessionUser, SignupDraft, SignupPayload, SignupReceipt, Theme, Ticket,
    TicketId, TicketStatus, UserInfo, UserPatch, UserRole,
};
pub use ports::{
    AuthPort, PortError, SessionStorePort, SubmissionPort, TicketFetchPort, TicketMutationPort,
};
pub use session::{sign_in_error, validate_credentials, SessionContext, SessionError};
pub use state_machine::{
    status_variant, toggled_status, wizard_transition, StepTransition, TransitionError,
    WizardAction, WizardStep,
};
pub use tickets::{FetchToken, TicketDesk, TicketError, TicketEvent, TicketIntent, TicketList};
pub use wizard::{PendingSubmission, SignupWizard, SubmitOutcome, WizardError, WizardEvent};
