use thiserror::Error;

use crate::domain::{
    AuthSession, Credentials, SignupPayload, SignupReceipt, Ticket, TicketId, TicketStatus,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PortError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("rejected by server: {0}")]
    Rejected(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("policy error: {0}")]
    Policy(String),
}

impl PortError {
    /// Text suitable for showing next to the form that triggered the call.
    pub fn user_message(&self) -> String {
        match self {
            PortError::Rejected(msg) | PortError::Validation(msg) => msg.clone(),
            PortError::NotFound(what) => format!("{what} was not found"),
            PortError::Transport(_) => "Could not reach the server. Please try again.".to_owned(),
            PortError::Policy(msg) => msg.clone(),
        }
    }
}

pub trait SubmissionPort {
    fn submit_signup(&self, payload: &SignupPayload) -> Result<SignupReceipt, PortError>;
}

pub trait TicketFetchPort {
    fn fetch_tickets(&self) -> Result<Vec<Ticket>, PortError>;
}

pub trait TicketMutationPort {
    fn set_ticket_status(&self, id: &TicketId, desired: TicketStatus) -> Result<(), PortError>;
    fn reply_to_ticket(&self, id: &TicketId, body: &str) -> Result<(), PortError>;
}

pub trait AuthPort {
    fn login(&self, credentials: &Credentials) -> Result<AuthSession, PortError>;
}

pub trait SessionStorePort {
    fn load(&self) -> Result<Option<AuthSession>, PortError>;
    fn save(&self, session: &AuthSession) -> Result<(), PortError>;
    fn clear(&self) -> Result<(), PortError>;
}
