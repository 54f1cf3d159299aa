//! Admin ticket list: single selection, badge mapping and mutation intents.
//!
//! The list never edits ticket status itself. Intents go to a
//! [`TicketMutationPort`] and the list is rebuilt from the next successful fetch.

use thiserror::Error;

use crate::domain::{BadgeVariant, Ticket, TicketId, TicketStatus};
use crate::ports::{PortError, TicketFetchPort, TicketMutationPort};
use crate::state_machine::{status_variant, toggled_status};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TicketError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("could not update ticket {id}: {message}")]
    Mutation { id: TicketId, message: String },
    #[error("could not load tickets: {0}")]
    Fetch(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketIntent {
    Close { id: TicketId },
    Reopen { id: TicketId },
    Reply { id: TicketId, body: String },
}

impl TicketIntent {
    pub fn ticket_id(&self) -> &TicketId {
        match self {
            TicketIntent::Close { id }
            | TicketIntent::Reopen { id }
            | TicketIntent::Reply { id, .. } => id,
        }
    }

    /// Target status for close/reopen; `None` for replies.
    pub fn desired_status(&self) -> Option<TicketStatus> {
        match self {
            TicketIntent::Close { .. } => Some(TicketStatus::Closed),
            TicketIntent::Reopen { .. } => Some(TicketStatus::Open),
            TicketIntent::Reply { .. } => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TicketIntent::Close { .. } => "close",
            TicketIntent::Reopen { .. } => "reopen",
            TicketIntent::Reply { .. } => "reply",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketEvent {
    Selected { id: TicketId },
    IntentRaised(TicketIntent),
    MutationFailed { id: TicketId, message: String },
    Refreshed { count: usize },
}

/// Generation token handed out when a fetch starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchToken(u64);

#[derive(Debug, Clone, Default)]
pub struct TicketList {
    tickets: Vec<Ticket>,
    selected_ticket_id: Option<TicketId>,
    generation: u64,
    loading: bool,
    last_error: Option<TicketError>,
    events: Vec<TicketEvent>,
}

impl TicketList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tickets(tickets: Vec<Ticket>) -> Self {
        Self {
            tickets,
            ..Self::default()
        }
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn selected_ticket_id(&self) -> Option<&TicketId> {
        self.selected_ticket_id.as_ref()
    }

    pub fn selected(&self) -> Option<&Ticket> {
        let id = self.selected_ticket_id.as_ref()?;
        self.tickets.iter().find(|t| &t.id == id)
    }

    pub fn is_selected(&self, ticket: &Ticket) -> bool {
        self.selected_ticket_id.as_ref() == Some(&ticket.id)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&TicketError> {
        self.last_error.as_ref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    pub fn drain_events(&mut self) -> Vec<TicketEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn select_ticket(&mut self, ticket: &Ticket) {
        if self.selected_ticket_id.as_ref() == Some(&ticket.id) {
            return;
        }
        self.selected_ticket_id = Some(ticket.id.clone());
        self.events.push(TicketEvent::Selected {
            id: ticket.id.clone(),
        });
    }

    pub fn status_variant(ticket: &Ticket) -> BadgeVariant {
        status_variant(ticket.status)
    }

    pub fn request_delete_or_close(&mut self, ticket: &Ticket) -> TicketIntent {
        let id = ticket.id.clone();
        let intent = match toggled_status(ticket.status) {
            TicketStatus::Open => TicketIntent::Reopen { id },
            _ => TicketIntent::Close { id },
        };
        self.events.push(TicketEvent::IntentRaised(intent.clone()));
        intent
    }

    pub fn compose_reply(
        &mut self,
        ticket: &Ticket,
        body: &str,
    ) -> Result<TicketIntent, TicketError> {
        let body = body.trim();
        if body.is_empty() {
            let err = TicketError::Validation("reply cannot be empty".to_owned());
            self.last_error = Some(err.clone());
            return Err(err);
        }
        let intent = TicketIntent::Reply {
            id: ticket.id.clone(),
            body: body.to_owned(),
        };
        self.events.push(TicketEvent::IntentRaised(intent.clone()));
        Ok(intent)
    }

    /// Marks a fetch as started. Results for earlier tokens are ignored.
    pub fn begin_refresh(&mut self) -> FetchToken {
        self.generation = self.generation.wrapping_add(1);
        self.loading = true;
        FetchToken(self.generation)
    }

    /// Applies a fetch result. Returns `false` when the token is stale.
    pub fn apply_fetch(
        &mut self,
        token: FetchToken,
        result: Result<Vec<Ticket>, PortError>,
    ) -> bool {
        if token.0 != self.generation {
            tracing::debug!(
                token = token.0,
                generation = self.generation,
                "dropping stale ticket fetch"
            );
            return false;
        }
        self.loading = false;

        match result {
            Ok(tickets) => {
                if let Some(id) = self.selected_ticket_id.as_ref() {
                    if !tickets.iter().any(|t| &t.id == id) {
                        self.selected_ticket_id = None;
                    }
                }
                self.events.push(TicketEvent::Refreshed {
                    count: tickets.len(),
                });
                self.tickets = tickets;
                self.last_error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "ticket fetch failed");
                self.last_error = Some(TicketError::Fetch(e.user_message()));
            }
        }
        true
    }

    pub fn record_mutation_failure(&mut self, id: &TicketId, error: &PortError) -> TicketError {
        tracing::warn!(ticket = %id, error = %error, "ticket mutation failed");
        let message = error.user_message();
        self.events.push(TicketEvent::MutationFailed {
            id: id.clone(),
            message: message.clone(),
        });
        let err = TicketError::Mutation {
            id: id.clone(),
            message,
        };
        self.last_error = Some(err.clone());
        err
    }

    /// Invalidates in-flight fetches, e.g. when the admin leaves the list.
    pub fn detach(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.loading = false;
    }

    /// Forgets tickets and selection, e.g. on sign-out. Pending fetches stay stale.
    pub fn reset(&mut self) {
        self.detach();
        self.tickets.clear();
        self.selected_ticket_id = None;
        self.last_error = None;
        self.events.clear();
    }
}

/// Sends ticket intents to the message store and reloads the list afterwards.
pub struct TicketDesk<F, M>
where
    F: TicketFetchPort,
    M: TicketMutationPort,
{
    pub fetch: F,
    pub mutation: M,
}

impl<F, M> TicketDesk<F, M>
where
    F: TicketFetchPort,
    M: TicketMutationPort,
{
    pub fn new(fetch: F, mutation: M) -> Self {
        Self { fetch, mutation }
    }

    pub fn refresh(&self, list: &mut TicketList) -> Result<(), TicketError> {
        let token = list.begin_refresh();
        let result = self.fetch.fetch_tickets();
        list.apply_fetch(token, result);
        match list.last_error() {
            Some(err @ TicketError::Fetch(_)) => Err(err.clone()),
            _ => Ok(()),
        }
    }

    pub fn send(&self, intent: &TicketIntent) -> Result<(), PortError> {
        tracing::info!(ticket = %intent.ticket_id(), action = intent.label(), "dispatching ticket intent");
        match intent {
            TicketIntent::Close { id } => self.mutation.set_ticket_status(id, TicketStatus::Closed),
            TicketIntent::Reopen { id } => self.mutation.set_ticket_status(id, TicketStatus::Open),
            TicketIntent::Reply { id, body } => self.mutation.reply_to_ticket(id, body),
        }
    }

    /// Sends the intent, then reloads. A failed mutation leaves the list untouched.
    pub fn dispatch(&self, list: &mut TicketList, intent: &TicketIntent) -> Result<(), TicketError> {
        if let Err(e) = self.send(intent) {
            return Err(list.record_mutation_failure(intent.ticket_id(), &e));
        }
        self.refresh(list)
    }
}
