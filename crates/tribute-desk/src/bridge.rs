//! Bridge between the egui shell and the tribute workspace crates.
//! This must remain the only shell-facing boundary for network and storage calls.

use std::sync::Arc;

use tribute_adapters::{
    AccountAdapter, AdapterConfig, ServiceMode, SessionStoreAdapter, TicketServiceAdapter,
};
use tribute_core::{
    AuthPort, AuthSession, Credentials, PortError, SignupPayload, SignupReceipt, SubmissionPort,
    Ticket, TicketDesk, TicketFetchPort, TicketIntent,
};

type AdminDesk = TicketDesk<TicketServiceAdapter, TicketServiceAdapter>;

/// Cheap to clone; clones share one backend so worker threads see the same token.
#[derive(Clone)]
pub struct DeskBridge {
    mode: ServiceMode,
    accounts: AccountAdapter,
    desk: Arc<AdminDesk>,
    session_store: SessionStoreAdapter,
}

impl Default for DeskBridge {
    fn default() -> Self {
        Self::from_config(&AdapterConfig::from_env())
    }
}

impl DeskBridge {
    pub fn from_config(config: &AdapterConfig) -> Self {
        Self::with_mode(
            ServiceMode::from_config(config),
            SessionStoreAdapter::with_config(config),
        )
    }

    pub fn with_mode(mode: ServiceMode, session_store: SessionStoreAdapter) -> Self {
        let tickets = TicketServiceAdapter::new(mode.clone());
        Self {
            accounts: AccountAdapter::new(mode.clone()),
            desk: Arc::new(TicketDesk::new(tickets.clone(), tickets)),
            mode,
            session_store,
        }
    }

    pub fn runtime_label(&self) -> String {
        self.mode.describe()
    }

    pub fn session_store(&self) -> SessionStoreAdapter {
        self.session_store.clone()
    }

    /// Re-attaches a restored session token, or drops it on sign-out.
    pub fn set_token(&self, token: Option<&str>) -> Result<(), PortError> {
        self.mode.set_token(token.map(str::to_owned))
    }

    pub fn submit_signup(&self, payload: &SignupPayload) -> Result<SignupReceipt, PortError> {
        self.accounts.submit_signup(payload)
    }

    pub fn login(&self, credentials: &Credentials) -> Result<AuthSession, PortError> {
        self.accounts.login(credentials)
    }

    pub fn fetch_tickets(&self) -> Result<Vec<Ticket>, PortError> {
        self.desk.fetch.fetch_tickets()
    }

    pub fn send_intent(&self, intent: &TicketIntent) -> Result<(), PortError> {
        self.desk.send(intent)
    }
}
